use std::error::Error;
use std::fmt;

/// Precondition failures raised by the numeric routines.
#[derive(Debug, Clone, PartialEq)]
pub enum MathError {
    /// Two operands (or the rows of a collection) differ in length.
    LengthMismatch { expected: usize, found: usize },
    /// An aggregate was asked for over an empty collection.
    EmptyInput(&'static str),
    /// A distribution parameter or probability is out of its domain.
    InvalidParameter(String),
    IndexOutOfRange { index: usize, len: usize },
}

impl MathError {
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        MathError::InvalidParameter(msg.into())
    }
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MathError::LengthMismatch { expected, found } => write!(
                f,
                "vectors must have equal length (expected {}, found {})",
                expected, found
            ),
            MathError::EmptyInput(what) => write!(f, "{} requires a non-empty input", what),
            MathError::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
            MathError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            }
        }
    }
}

impl Error for MathError {}

pub type Result<T> = std::result::Result<T, MathError>;

/// Fails with `LengthMismatch` unless both lengths agree.
pub(crate) fn check_len(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(MathError::LengthMismatch { expected, found });
    }
    Ok(())
}
