use crate::bits::BitVector;

/// A source of keystream bits, one per clock.
///
/// Implementors only provide [`KeystreamGenerator::next_bit`]; encryption is
/// XOR with the keystream, so `process` is its own inverse when run on a
/// freshly seeded generator.
pub trait KeystreamGenerator {
    fn next_bit(&mut self) -> bool;

    /// Generate `n` keystream bits.
    fn keystream(&mut self, n: usize) -> BitVector {
        (0..n).map(|_| self.next_bit()).collect()
    }

    fn process(&mut self, data: &BitVector) -> BitVector {
        data.iter()
            .map(|bit| bit ^ self.next_bit())
            .collect::<BitVector>()
            .with_order(data.order())
    }

    /// XOR each byte with the next eight keystream bits, first bit into the
    /// most significant position.
    fn process_bytes(&mut self, data: &[u8]) -> Vec<u8> {
        data.iter()
            .map(|&byte| {
                let key = (0..8).fold(0u8, |acc, _| (acc << 1) | self.next_bit() as u8);
                byte ^ key
            })
            .collect()
    }
}
