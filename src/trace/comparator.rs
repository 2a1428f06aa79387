use crate::trace::{
    divergence::{Divergence, DivergenceReport},
    trace_log::TraceLog,
};

use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComparatorConfig {
    /// Stop after the first mismatching index instead of visiting the whole candidate trace.
    pub stop_at_first_divergence: bool,
}

/// The candidate trace runs past the end of the reference trace.
#[derive(Debug, thiserror::Error)]
#[error(
    "candidate trace has {candidate_len} lines but reference trace has only {reference_len}; \
     no reference line at index {index}"
)]
pub struct LengthMismatchError {
    pub index: usize,
    pub reference_len: usize,
    pub candidate_len: usize,
}

/// Walks a candidate trace against a reference trace index by index. The candidate length bounds
/// the walk; there is no realignment after a mismatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceComparator {
    pub config: ComparatorConfig,
}

impl TraceComparator {
    pub fn new(config: ComparatorConfig) -> Self {
        Self { config }
    }

    pub fn compare(
        &self,
        reference: &TraceLog,
        candidate: &TraceLog,
    ) -> Result<DivergenceReport, LengthMismatchError> {
        if candidate.len() > reference.len() {
            return Err(LengthMismatchError {
                index: reference.len(),
                reference_len: reference.len(),
                candidate_len: candidate.len(),
            });
        }

        debug!(
            reference_len = reference.len(),
            candidate_len = candidate.len(),
            "comparing traces"
        );

        let mut report = DivergenceReport::default();

        for (index, (reference_line, candidate_line)) in
            reference.iter().zip(candidate.iter()).enumerate()
        {
            report.compared = index + 1;

            if reference_line.program_counter == candidate_line.program_counter {
                continue;
            }

            debug!(
                index,
                reference = ?reference_line.program_counter.to_u64().ok(),
                candidate = ?candidate_line.program_counter.to_u64().ok(),
                "program counters diverge"
            );

            report.divergences.push(Divergence {
                index,
                reference_pc: reference_line.program_counter.clone(),
                candidate_pc: candidate_line.program_counter.clone(),
            });

            if self.config.stop_at_first_divergence {
                info!(index, "stopping at first divergence");
                break;
            }
        }

        debug!(
            compared = report.compared,
            divergences = report.len(),
            "comparison finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::trace::trace_line::TraceFormat;

    fn reference(lines: &[&str]) -> TraceLog {
        TraceLog::from_lines(lines, TraceFormat::Reference).unwrap()
    }

    fn candidate(lines: &[&str]) -> TraceLog {
        TraceLog::from_lines(lines, TraceFormat::Candidate).unwrap()
    }

    #[test]
    fn test_single_divergence() {
        let report = TraceComparator::default()
            .compare(
                &reference(&["0 add 0x1000", "1 add 0x1004"]),
                &candidate(&["0 add 1000", "1 add 2000"]),
            )
            .unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report.compared, 2);

        let divergence = report.first().unwrap();
        assert_eq!(divergence.index, 1);
        assert_eq!(divergence.reference_pc, "1004");
        assert_eq!(divergence.candidate_pc, "2000");
    }

    #[test]
    fn test_identical_traces() {
        let report = TraceComparator::default()
            .compare(
                &reference(&["0 add 0x1000", "1 add 0x1004", "2 jal 0x1008"]),
                &candidate(&["0 add 1000", "1 add 1004", "2 jal 1008"]),
            )
            .unwrap();

        assert!(report.is_empty());
        assert_eq!(report.compared, 3);
    }

    #[test]
    fn test_case_insensitive() {
        let report = TraceComparator::default()
            .compare(&reference(&["0 add 0x1A2B"]), &candidate(&["0 add 1a2b"]))
            .unwrap();

        assert!(report.is_empty());
    }

    #[test]
    fn test_no_realignment() {
        // The candidate skipped one instruction; every later index mismatches.
        let report = TraceComparator::default()
            .compare(
                &reference(&["0 a 0x10", "1 a 0x14", "2 a 0x18", "3 a 0x1c"]),
                &candidate(&["0 a 10", "1 a 18", "2 a 1c"]),
            )
            .unwrap();

        let indices = report.iter().map(|item| item.index).collect::<Vec<_>>();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(report.compared, 3);
    }

    #[test]
    fn test_reports_every_divergence() {
        let report = TraceComparator::default()
            .compare(
                &reference(&["0 a 0x10", "1 a 0x14", "2 a 0x18"]),
                &candidate(&["0 a 11", "1 a 14", "2 a 19"]),
            )
            .unwrap();

        assert_eq!(
            report.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["0 10 11", "2 18 19"]
        );
    }

    #[test]
    fn test_stop_at_first_divergence() {
        let comparator = TraceComparator::new(ComparatorConfig {
            stop_at_first_divergence: true,
        });
        let report = comparator
            .compare(
                &reference(&["0 a 0x10", "1 a 0x14", "2 a 0x18"]),
                &candidate(&["0 a 10", "1 a 15", "2 a 19"]),
            )
            .unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report.first().unwrap().index, 1);
        assert_eq!(report.compared, 2);
    }

    #[test]
    fn test_shorter_candidate() {
        let report = TraceComparator::default()
            .compare(
                &reference(&["0 a 0x10", "1 a 0x14", "2 a 0x18"]),
                &candidate(&["0 a 10"]),
            )
            .unwrap();

        assert!(report.is_empty());
        assert_eq!(report.compared, 1);
    }

    #[test]
    fn test_empty_candidate() {
        let report = TraceComparator::default()
            .compare(&reference(&["0 a 0x10"]), &TraceLog::default())
            .unwrap();

        assert!(report.is_empty());
        assert_eq!(report.compared, 0);
    }

    #[test]
    fn test_longer_candidate() {
        let err = TraceComparator::default()
            .compare(
                &reference(&["0 a 0x10", "1 a 0x14"]),
                &candidate(&["0 a 99", "1 a 14", "2 a 18"]),
            )
            .unwrap_err();

        assert_eq!(err.index, 2);
        assert_eq!(err.reference_len, 2);
        assert_eq!(err.candidate_len, 3);
    }

    #[test]
    fn test_longer_candidate_with_early_stop() {
        let comparator = TraceComparator::new(ComparatorConfig {
            stop_at_first_divergence: true,
        });

        assert!(comparator
            .compare(&reference(&["0 a 0x10"]), &candidate(&["0 a 11", "1 a 14"]))
            .is_err());
    }

    #[test]
    fn test_idempotent() {
        let reference = reference(&["0 a 0x10", "1 a 0x14", "2 a 0x18"]);
        let candidate = candidate(&["0 a 10", "1 a 15", "2 a 18"]);
        let comparator = TraceComparator::default();

        let first = comparator.compare(&reference, &candidate).unwrap();
        let second = comparator.compare(&reference, &candidate).unwrap();

        assert_eq!(first, second);
    }
}
