pub const BLOCK_BYTES: usize = 16;

/// One 128-bit cipher block (also the key size).
pub type Block = [u8; BLOCK_BYTES];

/// A keyed block cipher whose encryption can stop after any round.
///
/// The measurement harness only ever talks to a cipher through this trait.
pub trait RoundCipher {
    const FULL_ROUNDS: usize;

    fn new(key: &Block) -> Self
    where
        Self: Sized;

    /// Runs the first `rounds` rounds and returns the intermediate state.
    fn partial_encrypt(&self, plaintext: &Block, rounds: usize) -> Block;
}
