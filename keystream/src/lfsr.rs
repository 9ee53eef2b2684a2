use log::debug;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::bits::BitVector;
use crate::error::{KeystreamError, Result};
use crate::generator::KeystreamGenerator;

/// Exponents of a GF(2) feedback polynomial. The constant term is implied
/// whether or not `0` is present.
pub type TapSet = BTreeSet<usize>;

/// Degree of a feedback polynomial, i.e. the register length it needs.
pub fn polynomial_degree(taps: &TapSet) -> Result<usize> {
    match taps.last().copied() {
        None => Err(KeystreamError::domain("polynomial must not be empty")),
        Some(0) => Err(KeystreamError::domain(
            "polynomial of degree 0 leaves the register without state",
        )),
        Some(degree) => Ok(degree),
    }
}

/// Renders taps as `x^5 + x^2 + 1`.
pub fn format_polynomial(taps: &TapSet) -> String {
    taps.iter()
        .rev()
        .filter(|&&d| d > 0)
        .map(|&d| if d == 1 { "x".to_string() } else { format!("x^{}", d) })
        .chain(std::iter::once("1".to_string()))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Fibonacci-style linear feedback shift register over GF(2).
///
/// The state is read left to right. Each clock emits the rightmost bit,
/// shifts everything one place right and inserts the feedback bit on the
/// left. Tap `d` contributes `state[d - 1]` to the feedback.
#[derive(Clone, Debug)]
pub struct Lfsr {
    taps: TapSet,
    /// `coefficients[i]` is set when `i + 1` is a tap.
    coefficients: Vec<bool>,
    state: BitVector,
    output: bool,
    feedback: bool,
    clocks: u64,
}

impl Lfsr {
    /// Build a register for `taps`, seeded with `seed` or all ones.
    pub fn new<I>(taps: I, seed: Option<BitVector>) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let taps: TapSet = taps.into_iter().collect();
        let degree = polynomial_degree(&taps)?;
        let coefficients = (1..=degree).map(|d| taps.contains(&d)).collect();

        let state = match seed {
            Some(seed) => {
                KeystreamError::check_len(degree, seed.len())?;
                seed
            }
            None => BitVector::ones(degree),
        };

        let mut lfsr = Lfsr {
            taps,
            coefficients,
            state,
            output: false,
            feedback: false,
            clocks: 0,
        };
        lfsr.update();
        debug!("new register {}", lfsr);
        Ok(lfsr)
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len()
    }

    pub fn taps(&self) -> &TapSet {
        &self.taps
    }

    pub fn state(&self) -> &BitVector {
        &self.state
    }

    /// The bit the next clock will emit.
    pub fn output(&self) -> bool {
        self.output
    }

    /// The bit the next clock will shift in.
    pub fn feedback(&self) -> bool {
        self.feedback
    }

    /// Clocks since construction or the last reseed.
    pub fn clock_count(&self) -> u64 {
        self.clocks
    }

    /// Number of distinct states, saturating at `usize::MAX`.
    pub fn state_space(&self) -> usize {
        if self.degree() >= usize::BITS as usize {
            usize::MAX
        } else {
            1 << self.degree()
        }
    }

    /// Restart from `seed`. On error the register is left as it was.
    pub fn reseed(&mut self, seed: BitVector) -> Result<()> {
        KeystreamError::check_len(self.degree(), seed.len())?;
        self.state = seed;
        self.clocks = 0;
        self.update();
        debug!("reseeded register {}", self);
        Ok(())
    }

    fn update(&mut self) {
        // degree >= 1, so the state is never empty
        self.output = self.state[self.degree() - 1];
        self.feedback = self
            .coefficients
            .iter()
            .zip(self.state.iter())
            .fold(false, |acc, (&c, s)| acc ^ (c & s));
    }

    /// One clock: returns the bit shifted out, i.e. the output cached before
    /// the shift.
    pub fn advance(&mut self) -> bool {
        let output = self.output;

        self.state.rotate_right(1);
        self.state[0] = self.feedback;
        self.clocks += 1;
        self.update();

        output
    }

    /// Clock `n` times, optionally reseeding first.
    pub fn run(&mut self, n: usize, seed: Option<BitVector>) -> Result<BitVector> {
        if let Some(seed) = seed {
            self.reseed(seed)?;
        }
        Ok((0..n).map(|_| self.advance()).collect())
    }

    /// Clock until a state repeats and return everything emitted.
    ///
    /// The all-zero state is a fixed point, so seeding with zeros yields a
    /// single output. Iteration is capped at [`Lfsr::state_space`].
    pub fn full_cycle(&mut self, seed: Option<BitVector>) -> Result<BitVector> {
        if let Some(seed) = seed {
            self.reseed(seed)?;
        }

        let limit = self.state_space();
        let mut seen = HashSet::new();
        let mut outputs = BitVector::new();
        while outputs.len() < limit && seen.insert(self.state.clone()) {
            outputs.append(self.advance());
        }

        debug!(
            "full cycle of {} outputs for {}",
            outputs.len(),
            format_polynomial(&self.taps)
        );
        Ok(outputs)
    }
}

impl KeystreamGenerator for Lfsr {
    fn next_bit(&mut self) -> bool {
        self.advance()
    }
}

// never ends; bound it with `take`
impl Iterator for Lfsr {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        Some(self.advance())
    }
}

impl fmt::Display for Lfsr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LFSR(poly={}, state={})",
            format_polynomial(&self.taps),
            self.state
        )
    }
}
