use keystream::{BitOrder, BitVector};
use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cipher::{Block, RoundCipher, BLOCK_BYTES};
use crate::error::{DiffusionError, Result};

/// What a trial perturbs: the plaintext (diffusion) or the key (confusion).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Property {
    Diffusion,
    Confusion,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialConfig {
    pub trials: usize,
    /// Highest round count to measure; `None` means the cipher's full count.
    pub rounds: Option<usize>,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            rounds: None,
        }
    }
}

/// Mean Hamming distances after a given number of rounds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundProfile {
    pub rounds: usize,
    pub diffusion: f64,
    pub confusion: f64,
}

/// Flip bit `index`, counting from the most significant bit of byte 0.
pub fn flip_bit(block: &Block, index: usize) -> Result<Block> {
    let bits = BLOCK_BYTES * 8;
    if index >= bits {
        return Err(DiffusionError::BitIndex { index, bits });
    }
    let mut flipped = *block;
    flipped[index / 8] ^= 1 << (7 - index % 8);
    Ok(flipped)
}

/// Number of differing bits between two equally long byte strings.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> Result<usize> {
    let a = BitVector::from_bytes(a, BitOrder::MsbFirst);
    let b = BitVector::from_bytes(b, BitOrder::MsbFirst);
    Ok(a.xor(&b)?.count_ones())
}

fn resolve_rounds<C: RoundCipher>(rounds: Option<usize>) -> Result<usize> {
    let rounds = rounds.unwrap_or(C::FULL_ROUNDS);
    if rounds > C::FULL_ROUNDS {
        return Err(DiffusionError::Rounds {
            rounds,
            full: C::FULL_ROUNDS,
        });
    }
    Ok(rounds)
}

/// One random trial: encrypt twice with a single bit of the plaintext or
/// key flipped, and return how many ciphertext bits differ.
pub fn trial<C, R>(property: Property, rng: &mut R, rounds: Option<usize>) -> Result<usize>
where
    C: RoundCipher,
    R: Rng + ?Sized,
{
    let rounds = resolve_rounds::<C>(rounds)?;
    let key: Block = rng.gen();
    let plaintext: Block = rng.gen();

    let (c1, c2) = match property {
        Property::Diffusion => {
            let cipher = C::new(&key);
            let flipped = flip_bit(&plaintext, 0)?;
            (
                cipher.partial_encrypt(&plaintext, rounds),
                cipher.partial_encrypt(&flipped, rounds),
            )
        }
        Property::Confusion => {
            let flipped = flip_bit(&key, 0)?;
            (
                C::new(&key).partial_encrypt(&plaintext, rounds),
                C::new(&flipped).partial_encrypt(&plaintext, rounds),
            )
        }
    };

    let distance = hamming_distance(&c1, &c2)?;
    trace!("{:?} trial at {} rounds: {} bits differ", property, rounds, distance);
    Ok(distance)
}

pub fn diffusion_trial<C, R>(rng: &mut R, rounds: Option<usize>) -> Result<usize>
where
    C: RoundCipher,
    R: Rng + ?Sized,
{
    trial::<C, R>(Property::Diffusion, rng, rounds)
}

pub fn confusion_trial<C, R>(rng: &mut R, rounds: Option<usize>) -> Result<usize>
where
    C: RoundCipher,
    R: Rng + ?Sized,
{
    trial::<C, R>(Property::Confusion, rng, rounds)
}

/// Mean distance over `trials` independent trials.
pub fn mean_distance<C, R>(
    property: Property,
    rng: &mut R,
    trials: usize,
    rounds: Option<usize>,
) -> Result<f64>
where
    C: RoundCipher,
    R: Rng + ?Sized,
{
    if trials == 0 {
        return Ok(0.0);
    }
    let mut total = 0usize;
    for _ in 0..trials {
        total += trial::<C, R>(property, rng, rounds)?;
    }
    Ok(total as f64 / trials as f64)
}

/// Diffusion and confusion profile for every round count from 1 up to the
/// configured limit.
pub fn measure_rounds<C, R>(rng: &mut R, config: &TrialConfig) -> Result<Vec<RoundProfile>>
where
    C: RoundCipher,
    R: Rng + ?Sized,
{
    let max_rounds = resolve_rounds::<C>(config.rounds)?;
    let mut profile = Vec::with_capacity(max_rounds);
    for rounds in 1..=max_rounds {
        let diffusion = mean_distance::<C, R>(Property::Diffusion, rng, config.trials, Some(rounds))?;
        let confusion = mean_distance::<C, R>(Property::Confusion, rng, config.trials, Some(rounds))?;
        debug!(
            "rounds={} diffusion={:.2} confusion={:.2}",
            rounds, diffusion, confusion
        );
        profile.push(RoundProfile {
            rounds,
            diffusion,
            confusion,
        });
    }
    Ok(profile)
}
