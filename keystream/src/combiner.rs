use log::debug;
use serde::{Deserialize, Serialize};

use crate::bits::BitVector;
use crate::error::{KeystreamError, Result};
use crate::generator::KeystreamGenerator;
use crate::lfsr::{polynomial_degree, Lfsr, TapSet};

/// x^5 + x^2 + 1
pub const CONTROL_TAPS: [usize; 3] = [5, 2, 0];
/// x^3 + x + 1
pub const DATA_A_TAPS: [usize; 3] = [3, 1, 0];
/// x^4 + x + 1
pub const DATA_B_TAPS: [usize; 3] = [4, 1, 0];

/// Feedback polynomials for the three registers of an [`AlternatingStep`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinerConfig {
    pub control: TapSet,
    pub data_a: TapSet,
    pub data_b: TapSet,
}

impl Default for CombinerConfig {
    fn default() -> Self {
        Self {
            control: CONTROL_TAPS.into_iter().collect(),
            data_a: DATA_A_TAPS.into_iter().collect(),
            data_b: DATA_B_TAPS.into_iter().collect(),
        }
    }
}

impl CombinerConfig {
    pub fn with_control(mut self, taps: impl IntoIterator<Item = usize>) -> Self {
        self.control = taps.into_iter().collect();
        self
    }

    pub fn with_data_a(mut self, taps: impl IntoIterator<Item = usize>) -> Self {
        self.data_a = taps.into_iter().collect();
        self
    }

    pub fn with_data_b(mut self, taps: impl IntoIterator<Item = usize>) -> Self {
        self.data_b = taps.into_iter().collect();
        self
    }

    /// Register degrees in seed order: control, data A, data B.
    pub fn degrees(&self) -> Result<(usize, usize, usize)> {
        Ok((
            polynomial_degree(&self.control)?,
            polynomial_degree(&self.data_a)?,
            polynomial_degree(&self.data_b)?,
        ))
    }

    /// Number of seed bits a combiner built from this config expects.
    pub fn seed_len(&self) -> Result<usize> {
        let (c, a, b) = self.degrees()?;
        Ok(c + a + b)
    }
}

/// Alternating step generator.
///
/// The control register clocks every step. Its output picks which data
/// register clocks: data A on 0, data B on 1. The keystream bit is the XNOR
/// of both data outputs as they were before that clock.
#[derive(Clone, Debug)]
pub struct AlternatingStep {
    control: Lfsr,
    data_a: Lfsr,
    data_b: Lfsr,
}

impl AlternatingStep {
    /// Default polynomials; `seed` defaults to 12 one bits.
    pub fn new(seed: Option<BitVector>) -> Result<Self> {
        Self::with_config(&CombinerConfig::default(), seed)
    }

    /// The seed is split contiguously: control bits first, then data A,
    /// then data B. Its length must equal the summed degrees.
    pub fn with_config(config: &CombinerConfig, seed: Option<BitVector>) -> Result<Self> {
        let (c, a, b) = config.degrees()?;
        let seed = match seed {
            Some(seed) => {
                KeystreamError::check_len(c + a + b, seed.len())?;
                seed
            }
            None => BitVector::ones(c + a + b),
        };

        let bits = seed.as_slice();
        let register = |taps: &TapSet, part: &[bool]| {
            Lfsr::new(taps.iter().copied(), Some(BitVector::from(part)))
        };
        let control = register(&config.control, &bits[..c])?;
        let data_a = register(&config.data_a, &bits[c..c + a])?;
        let data_b = register(&config.data_b, &bits[c + a..])?;

        debug!(
            "alternating step generator: control={} data_a={} data_b={}",
            control, data_a, data_b
        );
        Ok(Self {
            control,
            data_a,
            data_b,
        })
    }

    pub fn control(&self) -> &Lfsr {
        &self.control
    }

    pub fn data_a(&self) -> &Lfsr {
        &self.data_a
    }

    pub fn data_b(&self) -> &Lfsr {
        &self.data_b
    }

    pub fn advance(&mut self) -> bool {
        let control_bit = self.control.advance();

        let out_a = self.data_a.output();
        let out_b = self.data_b.output();

        if control_bit {
            self.data_b.advance();
        } else {
            self.data_a.advance();
        }

        !(out_a ^ out_b)
    }
}

impl KeystreamGenerator for AlternatingStep {
    fn next_bit(&mut self) -> bool {
        self.advance()
    }
}

impl Iterator for AlternatingStep {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        Some(self.advance())
    }
}
