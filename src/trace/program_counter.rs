use hex::FromHexError;
use std::{fmt::Display, str::FromStr};

/// The address of a retired instruction, kept as it appeared in the trace: lowercase hex digits
/// without any prefix. Leading zeros are significant, so `00001000` and `1000` are different
/// values when compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgramCounter {
    digits: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProgramCounterError {
    #[error("empty program counter")]
    Empty,
    #[error("invalid hex digits: {0}")]
    InvalidHex(FromHexError),
    #[error("program counter does not fit in 64 bits")]
    TooWide,
}

impl ProgramCounter {
    pub fn new(digits: &str) -> Result<Self, ProgramCounterError> {
        if digits.is_empty() {
            return Err(ProgramCounterError::Empty);
        }

        // `hex` only accepts whole bytes
        let decoded = if digits.len() % 2 == 0 {
            hex::decode(digits)
        } else {
            let mut padded = String::from('0');
            padded.push_str(digits);

            hex::decode(&padded)
        };
        decoded.map_err(ProgramCounterError::InvalidHex)?;

        Ok(Self {
            digits: digits.to_ascii_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Returns the numeric address.
    pub fn to_u64(&self) -> Result<u64, ProgramCounterError> {
        let significant = self.digits.trim_start_matches('0');
        if significant.len() > 16 {
            return Err(ProgramCounterError::TooWide);
        }
        if significant.is_empty() {
            return Ok(0);
        }

        u64::from_str_radix(significant, 16).map_err(|_| ProgramCounterError::TooWide)
    }
}

impl Display for ProgramCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digits)
    }
}

impl FromStr for ProgramCounter {
    type Err = ProgramCounterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl PartialEq<&str> for ProgramCounter {
    fn eq(&self, other: &&str) -> bool {
        self.digits == *other
    }
}
