use keystream::KeystreamError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiffusionError {
    #[error(transparent)]
    Bits(#[from] KeystreamError),

    #[error("bit index {index} outside a {bits}-bit block")]
    BitIndex { index: usize, bits: usize },

    #[error("{rounds} rounds requested but the cipher has {full}")]
    Rounds { rounds: usize, full: usize },
}

pub type Result<T> = std::result::Result<T, DiffusionError>;
