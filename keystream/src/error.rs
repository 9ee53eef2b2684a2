use thiserror::Error;

/// Contract violations raised by bit vectors, registers and the combiner.
///
/// Every variant is reported at the call that broke the contract; no
/// operand is modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeystreamError {
    /// Invalid numeric input: negative integers, negative counts, empty
    /// or degree-zero polynomials, integers too wide to represent.
    #[error("domain error: {0}")]
    Domain(String),

    #[error("length mismatch: expected {expected} bits, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("bit length {0} is not a multiple of 8")]
    Alignment(usize),

    #[error("pop from an empty bit vector")]
    EmptySequence,

    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    #[error("index {index} out of range for {len} bits")]
    OutOfRange { index: usize, len: usize },
}

impl KeystreamError {
    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        KeystreamError::Domain(msg.into())
    }

    pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
        if expected != actual {
            return Err(KeystreamError::LengthMismatch { expected, actual });
        }
        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, KeystreamError>;
