use log::debug;
use std::fmt;

use crate::bits::BitVector;
use crate::error::{KeystreamError, Result};
use crate::lfsr::{format_polynomial, Lfsr, TapSet};

/// Result of running Berlekamp-Massey over an observed sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Synthesis {
    /// Non-zero coefficients of the connection polynomial. `0` is always
    /// present.
    pub taps: TapSet,
    /// Length of the shortest register that generates the sequence.
    pub linear_complexity: usize,
}

impl Synthesis {
    /// A register that replays `observed` from its first bit onward.
    ///
    /// Fails with [`KeystreamError::Domain`] when the connection polynomial's
    /// degree is below the linear complexity, since such a generator cannot
    /// be expressed with the register's degree-equals-length convention.
    pub fn to_register(&self, observed: &BitVector) -> Result<Lfsr> {
        let degree = self.taps.last().copied().unwrap_or(0);
        if degree != self.linear_complexity {
            return Err(KeystreamError::domain(format!(
                "connection polynomial of degree {} cannot model linear complexity {}",
                degree, self.linear_complexity
            )));
        }
        if observed.len() < degree {
            return Err(KeystreamError::LengthMismatch {
                expected: degree,
                actual: observed.len(),
            });
        }

        // the first output is the rightmost state bit
        let seed: BitVector = observed.iter().take(degree).collect();
        Lfsr::new(self.taps.iter().copied(), Some(seed.reversed()))
    }
}

impl fmt::Display for Synthesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (L={})",
            format_polynomial(&self.taps),
            self.linear_complexity
        )
    }
}

/// Tap degrees of the minimal feedback polynomial reproducing `observed`.
pub fn synthesize(observed: &BitVector) -> TapSet {
    synthesize_profile(observed).taps
}

/// Berlekamp-Massey over GF(2).
///
/// `c` is the connection polynomial (index 0 is the constant term), `b` its
/// value at the last length change, `l` the current linear complexity and
/// `m` the position of the last length change.
pub fn synthesize_profile(observed: &BitVector) -> Synthesis {
    let s = observed.as_slice();
    let n_bits = s.len();

    let mut c = vec![false; n_bits + 1];
    c[0] = true;
    let mut b = c.clone();
    let mut l = 0usize;
    let mut m: isize = -1;

    for n in 0..n_bits {
        // l <= n holds at every step
        let d = (1..=l).fold(s[n], |acc, i| acc ^ (c[i] & s[n - i]));
        if !d {
            continue;
        }

        let t = c.clone();
        let shift = (n as isize - m) as usize;
        for i in shift..=n_bits {
            c[i] ^= b[i - shift];
        }
        if 2 * l <= n {
            l = n + 1 - l;
            b = t;
            m = n as isize;
        }
    }

    let taps: TapSet = c
        .iter()
        .enumerate()
        .filter_map(|(i, &coeff)| coeff.then_some(i))
        .collect();

    let synthesis = Synthesis {
        taps,
        linear_complexity: l,
    };
    debug!("synthesized {} from {} bits", synthesis, n_bits);
    synthesis
}
