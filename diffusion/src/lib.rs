pub mod cipher;
pub mod error;
pub mod harness;

// Re-exports
pub use cipher::{Block, RoundCipher, BLOCK_BYTES};
pub use error::{DiffusionError, Result};
pub use harness::{
    confusion_trial, diffusion_trial, flip_bit, hamming_distance, mean_distance, measure_rounds,
    trial, Property, RoundProfile, TrialConfig,
};
