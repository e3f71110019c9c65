use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const NACE_CODE_LEN: usize = 5;

#[derive(Debug, Error, PartialEq)]
pub enum NaceCodeError {
    #[error("NACE code is empty")]
    Empty,
    #[error("NACE code must have 5 digits, got {0}")]
    WrongLength(usize),
    #[error("NACE code must only contain digits, found {0:?}")]
    NonDigit(char),
}

/// A NACE activity code of exactly five ASCII digits.
///
/// Matching is done on the raw string, so `01110` and `1110` are different
/// codes and leading zeros are significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaceCode(String);

impl NaceCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for NaceCode {
    type Err = NaceCodeError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        if code.is_empty() {
            return Err(NaceCodeError::Empty);
        }
        if let Some(c) = code.chars().find(|c| !c.is_ascii_digit()) {
            return Err(NaceCodeError::NonDigit(c));
        }
        if code.len() != NACE_CODE_LEN {
            return Err(NaceCodeError::WrongLength(code.len()));
        }
        Ok(Self(code.to_owned()))
    }
}

impl fmt::Display for NaceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
