use crate::{serde::program_counter::ProgramCounterHex, trace::program_counter::ProgramCounter};

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::fmt::Display;

/// An index at which the two traces retired different instructions.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divergence {
    pub index: usize,
    #[serde_as(as = "ProgramCounterHex")]
    pub reference_pc: ProgramCounter,
    #[serde_as(as = "ProgramCounterHex")]
    pub candidate_pc: ProgramCounter,
}

/// Every divergence found, in index order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivergenceReport {
    pub divergences: Vec<Divergence>,
    /// Number of indices visited. Less than the candidate length only when the comparison stopped
    /// early.
    pub compared: usize,
}

impl DivergenceReport {
    pub fn is_empty(&self) -> bool {
        self.divergences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.divergences.len()
    }

    pub fn first(&self) -> Option<&Divergence> {
        self.divergences.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Divergence> {
        self.divergences.iter()
    }
}

impl Display for Divergence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.index, self.reference_pc, self.candidate_pc
        )
    }
}

impl<'a> IntoIterator for &'a DivergenceReport {
    type Item = &'a Divergence;
    type IntoIter = std::slice::Iter<'a, Divergence>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
