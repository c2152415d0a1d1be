use crate::crypto::cipher_types::BLOCK_BYTES;

/// Decodes a full 8-byte chunk as an unsigned little-endian 64-bit word.
pub fn word_from_le(chunk: &[u8]) -> u64 {
    u64::from_le_bytes(chunk.try_into().expect("chunk must be 8 bytes"))
}

/// Encodes a 64-bit word back into its 8 little-endian bytes.
pub fn word_to_le(word: u64) -> [u8; BLOCK_BYTES] {
    word.to_le_bytes()
}
