use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::{KeystreamError, Result};

/// How positions map to bit significance when converting to and from
/// integers and bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitOrder {
    /// `bits[0]` is the most significant bit.
    #[default]
    MsbFirst,
    /// `bits[0]` is the least significant bit.
    LsbFirst,
}

/// The closed set of representations a [`BitVector`] can be built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BitSource {
    Integer { value: i128, length: Option<usize> },
    Bytes(Vec<u8>),
    Bools(Vec<bool>),
    /// A string of `'0'` and `'1'` characters.
    Text(String),
}

/// Ordered sequence of bits with a declared bit-order convention.
///
/// Equality, ordering and hashing look at the bits only; two vectors with
/// the same content but different [`BitOrder`] compare equal.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct BitVector {
    bits: Vec<bool>,
    order: BitOrder,
}

impl BitVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bools(bits: impl Into<Vec<bool>>) -> Self {
        BitVector {
            bits: bits.into(),
            order: BitOrder::MsbFirst,
        }
    }

    pub fn zeros(length: usize) -> Self {
        Self::from_bools(vec![false; length])
    }

    pub fn ones(length: usize) -> Self {
        Self::from_bools(vec![true; length])
    }

    /// Builds the bit pattern of a non-negative integer.
    ///
    /// `length` defaults to the minimal width of `value` (at least 1).
    /// Negative values, and explicit lengths too short to hold `value`,
    /// fail with [`KeystreamError::Domain`].
    pub fn from_integer<T>(value: T, length: Option<usize>, order: BitOrder) -> Result<Self>
    where
        T: TryInto<u128>,
    {
        let value: u128 = value
            .try_into()
            .map_err(|_| KeystreamError::domain("negative integers have no bit representation"))?;
        let width = (u128::BITS - value.leading_zeros()) as usize;
        let length = length.unwrap_or(width).max(1);
        if length < width {
            return Err(KeystreamError::domain(format!(
                "value needs {} bits but length {} was requested",
                width, length
            )));
        }

        let bit = |i: usize| i < u128::BITS as usize && (value >> i) & 1 == 1;
        let bits = match order {
            BitOrder::MsbFirst => (0..length).rev().map(bit).collect(),
            BitOrder::LsbFirst => (0..length).map(bit).collect(),
        };
        Ok(BitVector { bits, order })
    }

    /// Eight bits per byte, bytes concatenated in input order.
    pub fn from_bytes(data: &[u8], order: BitOrder) -> Self {
        let mut bits = Vec::with_capacity(data.len() * 8);
        for &byte in data {
            match order {
                BitOrder::MsbFirst => bits.extend((0..8).rev().map(|i| (byte >> i) & 1 == 1)),
                BitOrder::LsbFirst => bits.extend((0..8).map(|i| (byte >> i) & 1 == 1)),
            }
        }
        BitVector { bits, order }
    }

    pub fn from_source(source: BitSource, order: BitOrder) -> Result<Self> {
        let mut vector = match source {
            BitSource::Integer { value, length } => return Self::from_integer(value, length, order),
            BitSource::Bytes(data) => return Ok(Self::from_bytes(&data, order)),
            BitSource::Bools(bits) => Self::from_bools(bits),
            BitSource::Text(text) => text.parse()?,
        };
        vector.order = order;
        Ok(vector)
    }

    pub fn order(&self) -> BitOrder {
        self.order
    }

    pub fn with_order(mut self, order: BitOrder) -> Self {
        self.order = order;
        self
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, bool>> {
        self.bits.iter().copied()
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    pub fn set(&mut self, index: usize, bit: bool) -> Result<()> {
        let len = self.len();
        let slot = self
            .bits
            .get_mut(index)
            .ok_or(KeystreamError::OutOfRange { index, len })?;
        *slot = bit;
        Ok(())
    }

    /// Reads the bits as an integer in the requested order.
    ///
    /// The order is a per-call choice; the vector's own [`BitOrder`] is not
    /// consulted.
    pub fn to_integer(&self, order: BitOrder) -> Result<u128> {
        let len = self.len();
        let mut value = 0u128;
        for (i, &bit) in self.bits.iter().enumerate() {
            if !bit {
                continue;
            }
            let significance = match order {
                BitOrder::MsbFirst => len - 1 - i,
                BitOrder::LsbFirst => i,
            };
            if significance >= u128::BITS as usize {
                return Err(KeystreamError::domain(format!(
                    "bit of significance {} does not fit in 128 bits",
                    significance
                )));
            }
            value |= 1 << significance;
        }
        Ok(value)
    }

    /// Packs the bits eight at a time, most significant bit first within
    /// each byte, whatever the vector's own order.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with(BitOrder::MsbFirst)
    }

    /// Like [`BitVector::to_bytes`] but with an explicit in-byte order, so
    /// that `from_bytes(v.to_bytes_with(o)?, o) == v` for either order.
    pub fn to_bytes_with(&self, order: BitOrder) -> Result<Vec<u8>> {
        if self.len() % 8 != 0 {
            return Err(KeystreamError::Alignment(self.len()));
        }
        let bytes = self
            .bits
            .chunks(8)
            .map(|chunk| match order {
                BitOrder::MsbFirst => chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8),
                BitOrder::LsbFirst => chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &b)| acc | ((b as u8) << i)),
            })
            .collect();
        Ok(bytes)
    }

    pub fn xor(&self, other: &BitVector) -> Result<BitVector> {
        self.zip_with(other, |a, b| a ^ b)
    }

    pub fn and(&self, other: &BitVector) -> Result<BitVector> {
        self.zip_with(other, |a, b| a & b)
    }

    fn zip_with(&self, other: &BitVector, op: impl Fn(bool, bool) -> bool) -> Result<BitVector> {
        KeystreamError::check_len(self.len(), other.len())?;
        let bits = self
            .bits
            .iter()
            .zip(other.bits.iter())
            .map(|(&a, &b)| op(a, b))
            .collect();
        Ok(BitVector {
            bits,
            order: self.order,
        })
    }

    pub fn concat(&self, other: &BitVector) -> BitVector {
        let mut bits = Vec::with_capacity(self.len() + other.len());
        bits.extend_from_slice(&self.bits);
        bits.extend_from_slice(&other.bits);
        BitVector {
            bits,
            order: self.order,
        }
    }

    /// The bits repeated `n` times; `n = 0` gives an empty vector.
    pub fn repeat<T>(&self, n: T) -> Result<BitVector>
    where
        T: TryInto<usize>,
    {
        let n: usize = n
            .try_into()
            .map_err(|_| KeystreamError::domain("repeat count must be non-negative"))?;
        Ok(BitVector {
            bits: self.bits.repeat(n),
            order: self.order,
        })
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Sum of the bits mod 2.
    pub fn parity(&self) -> bool {
        self.count_ones() % 2 == 1
    }

    pub fn append(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Removes and returns the bit at `index`, or the last bit when `index`
    /// is `None`.
    pub fn pop(&mut self, index: Option<usize>) -> Result<bool> {
        if self.bits.is_empty() {
            return Err(KeystreamError::EmptySequence);
        }
        match index {
            None => self.bits.pop().ok_or(KeystreamError::EmptySequence),
            Some(i) if i < self.len() => Ok(self.bits.remove(i)),
            Some(i) => Err(KeystreamError::OutOfRange {
                index: i,
                len: self.len(),
            }),
        }
    }

    /// Rotates the bits `k` places towards the end; the last `k` bits wrap
    /// around to the front.
    pub fn rotate_right(&mut self, k: usize) {
        if !self.bits.is_empty() {
            let k = k % self.bits.len();
            self.bits.rotate_right(k);
        }
    }

    pub fn reversed(&self) -> BitVector {
        BitVector {
            bits: self.bits.iter().rev().copied().collect(),
            order: self.order,
        }
    }
}

impl PartialEq for BitVector {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for BitVector {}

impl Hash for BitVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl PartialOrd for BitVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BitVector {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bits.cmp(&other.bits)
    }
}

impl Index<usize> for BitVector {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        &self.bits[index]
    }
}

impl IndexMut<usize> for BitVector {
    fn index_mut(&mut self, index: usize) -> &mut bool {
        &mut self.bits[index]
    }
}

impl FromStr for BitVector {
    type Err = KeystreamError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(KeystreamError::UnsupportedValue(format!(
                    "{:?} is not a bit",
                    other
                ))),
            })
            .collect()
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() <= 10 {
            write!(f, "BitVector({:?})", self.bits)
        } else {
            write!(f, "BitVector(\"{}\")", self)
        }
    }
}

impl From<Vec<bool>> for BitVector {
    fn from(bits: Vec<bool>) -> Self {
        Self::from_bools(bits)
    }
}

impl From<&[bool]> for BitVector {
    fn from(bits: &[bool]) -> Self {
        Self::from_bools(bits.to_vec())
    }
}

impl FromIterator<bool> for BitVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self::from_bools(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Extend<bool> for BitVector {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        self.bits.extend(iter);
    }
}

impl IntoIterator for BitVector {
    type Item = bool;
    type IntoIter = std::vec::IntoIter<bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.into_iter()
    }
}

impl<'a> IntoIterator for &'a BitVector {
    type Item = bool;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, bool>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
