use crate::trace::program_counter::{ProgramCounter, ProgramCounterError};

use std::path::PathBuf;

/// Which producer wrote a trace, which decides how the PC token is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceFormat {
    /// Golden model output (e.g. `spike.out`). The PC token carries a marker before a literal `x`,
    /// as in `0x80000000`.
    Reference,
    /// Retirement log of the design under test (e.g. `retire.out`). The PC token is bare hex.
    Candidate,
}

/// One retired instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLine {
    pub program_counter: ProgramCounter,
}

/// A trace line that could not be read. `line` is the zero-based index in its log.
#[derive(Debug, thiserror::Error)]
#[error("malformed trace line at index {line}{}: {kind}", in_file(.path))]
pub struct FormatError {
    pub path: Option<PathBuf>,
    pub line: usize,
    #[source]
    pub kind: FormatErrorKind,
}

#[derive(Debug, thiserror::Error)]
pub enum FormatErrorKind {
    #[error("expected at least {expected} fields, found {found}")]
    MissingField { expected: usize, found: usize },
    #[error("program counter token {token:?} has no `x` separator")]
    MissingMarker { token: String },
    #[error("invalid program counter {token:?}: {source}")]
    InvalidProgramCounter {
        token: String,
        source: ProgramCounterError,
    },
}

impl TraceFormat {
    /// Zero-based whitespace-separated field holding the PC.
    pub const PC_FIELD: usize = 2;

    pub const MARKER_SEPARATOR: char = 'x';

    /// Reduces the raw PC field to its hex digits.
    fn pc_digits<'a>(&self, token: &'a str) -> Result<&'a str, FormatErrorKind> {
        match self {
            Self::Reference => token
                .split_once(Self::MARKER_SEPARATOR)
                .map(|(_, digits)| digits)
                .ok_or_else(|| FormatErrorKind::MissingMarker {
                    token: token.to_owned(),
                }),
            Self::Candidate => Ok(token),
        }
    }
}

impl TraceLine {
    pub fn parse(line: &str, format: TraceFormat) -> Result<Self, FormatErrorKind> {
        let mut fields = line.split_whitespace();

        let token = match fields.nth(TraceFormat::PC_FIELD) {
            Some(token) => token,
            None => {
                return Err(FormatErrorKind::MissingField {
                    expected: TraceFormat::PC_FIELD + 1,
                    found: line.split_whitespace().count(),
                })
            }
        };

        let digits = format.pc_digits(token)?;
        let program_counter = digits.parse::<ProgramCounter>().map_err(|source| {
            FormatErrorKind::InvalidProgramCounter {
                token: token.to_owned(),
                source,
            }
        })?;

        Ok(Self { program_counter })
    }
}

fn in_file(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" of {}", path.display()),
        None => String::new(),
    }
}
