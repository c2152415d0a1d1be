use cipher_core::crypto::cipher_context::transform_buffer;
use cipher_core::crypto::cipher_traits::{BlockCipher64, CipherAlgorithm};
use cipher_core::crypto::cipher_types::Direction;

use crate::crypto::key_schedule::KeySchedule;
use crate::crypto::round_function::{round_decrypt, round_encrypt};

/// The NF64 engine: 25 keyed Feistel-style rounds over 64-bit words.
///
/// The schedule is taken by value at construction and never mutated, so a
/// cipher instance can be shared freely across threads.
#[derive(Clone)]
pub struct Nf64Cipher {
    schedule: KeySchedule,
}

impl Nf64Cipher {
    pub fn new(schedule: KeySchedule) -> Self {
        Nf64Cipher { schedule }
    }

    /// Encrypt one 64-bit block, round keys in generation order.
    fn encrypt_block_u64(&self, block: u64) -> u64 {
        let mut lower = block as u32;
        let mut upper = (block >> 32) as u32;
        for key in self.schedule.iter() {
            (lower, upper) = round_encrypt(lower, upper, key);
        }
        ((upper as u64) << 32) | lower as u64
    }

    /// Decrypt one 64-bit block, round keys in reverse order.
    fn decrypt_block_u64(&self, block: u64) -> u64 {
        let mut lower = block as u32;
        let mut upper = (block >> 32) as u32;
        for key in self.schedule.iter().rev() {
            (lower, upper) = round_decrypt(lower, upper, key);
        }
        ((upper as u64) << 32) | lower as u64
    }
}

impl BlockCipher64 for Nf64Cipher {
    fn encrypt_block(&self, block: u64) -> u64 {
        self.encrypt_block_u64(block)
    }

    fn decrypt_block(&self, block: u64) -> u64 {
        self.decrypt_block_u64(block)
    }
}

impl CipherAlgorithm for Nf64Cipher {
    fn encrypt(&self, data: &[u8]) -> Vec<u8> {
        transform_buffer(self, data, Direction::Encrypt)
    }

    fn decrypt(&self, data: &[u8]) -> Vec<u8> {
        transform_buffer(self, data, Direction::Decrypt)
    }
}

/// Encrypts `data` chunk by chunk under `schedule`. Output length equals
/// input length; a trailing partial chunk passes through unmodified.
pub fn encrypt_buffer(schedule: &KeySchedule, data: &[u8]) -> Vec<u8> {
    Nf64Cipher::new(schedule.clone()).encrypt(data)
}

/// Inverse of [`encrypt_buffer`] under the same schedule.
pub fn decrypt_buffer(schedule: &KeySchedule, data: &[u8]) -> Vec<u8> {
    Nf64Cipher::new(schedule.clone()).decrypt(data)
}
