use crate::crypto::key_schedule::RoundKey;
use crate::crypto::sboxes::{substitute_word, substitute_word_inv};

/// One forward round over the `(lower, upper)` halves of the state word:
/// substitute the upper half, mix it with the low half of `k1` and the
/// rotated lower half, derive the new upper half from the old lower half,
/// the high half of `k1` and the rotated mix, then swap.
pub fn round_encrypt(lower: u32, upper: u32, key: &RoundKey) -> (u32, u32) {
    let substituted = substitute_word(upper);
    let mixed = substituted ^ key.k1 as u32 ^ lower.rotate_right(3);
    let temp = lower ^ (key.k1 >> 32) as u32 ^ mixed.rotate_left(10);
    (mixed, temp)
}

/// Algebraic inverse of [`round_encrypt`]: undo the swap, then the two XOR
/// mixes in reverse order, then the substitution.
pub fn round_decrypt(lower: u32, upper: u32, key: &RoundKey) -> (u32, u32) {
    let mixed = lower;
    let original_lower = upper ^ (key.k1 >> 32) as u32 ^ mixed.rotate_left(10);
    let substituted = mixed ^ key.k1 as u32 ^ original_lower.rotate_right(3);
    (original_lower, substitute_word_inv(substituted))
}
