pub mod bits;
pub mod combiner;
pub mod error;
pub mod generator;
pub mod lfsr;
pub mod synthesis;

// Re-exports
pub use bits::{BitOrder, BitSource, BitVector};
pub use combiner::{AlternatingStep, CombinerConfig, CONTROL_TAPS, DATA_A_TAPS, DATA_B_TAPS};
pub use error::{KeystreamError, Result};
pub use generator::KeystreamGenerator;
pub use lfsr::{format_polynomial, polynomial_degree, Lfsr, TapSet};
pub use synthesis::{synthesize, synthesize_profile, Synthesis};
