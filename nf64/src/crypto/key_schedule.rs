use crate::crypto::sboxes::substitute_byte;

/// Number of rounds, and therefore of round keys.
pub const ROUNDS: usize = 25;

/// One round key. Only `k1` is mixed into the round function; `k0` carries
/// schedule state from round to round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundKey {
    pub k0: u64,
    pub k1: u64,
}

/// The full sequence of 25 round keys, derived once from the all-zero seed
/// and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchedule {
    keys: [RoundKey; ROUNDS],
}

impl KeySchedule {
    /// Derives the schedule in strict round order 0..25.
    ///
    /// Each round rotates the 128-bit `(k0, k1)` pair view left by 13 bits,
    /// substitutes the two nibbles of the low byte of `k1`, then overwrites
    /// the top five bits of `k1` with `((k1 >> 59) & 0x1F) ^ round`. Round
    /// `i` stores the pair as it stands after these three steps, so every
    /// key depends on the one before it.
    pub fn generate() -> Self {
        let mut k0 = 0u64;
        let mut k1 = 0u64;
        let mut keys = [RoundKey { k0: 0, k1: 0 }; ROUNDS];

        for (round, slot) in keys.iter_mut().enumerate() {
            let rotated_k1 = (k1 << 13) | (k0 >> 51);
            let rotated_k0 = (k0 << 13) | (k1 >> 51);
            k0 = rotated_k0;
            k1 = rotated_k1;

            let low = substitute_byte(k1 as u8);
            k1 = (k1 & !0xFF) | low as u64;

            let constant = ((k1 >> 59) & 0x1F) ^ round as u64;
            k1 = (k1 & !(0x1F << 59)) | (constant << 59);

            *slot = RoundKey { k0, k1 };
        }

        log::debug!("key schedule generated ({ROUNDS} round keys)");
        KeySchedule { keys }
    }

    pub fn keys(&self) -> &[RoundKey; ROUNDS] {
        &self.keys
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &RoundKey> {
        self.keys.iter()
    }
}
