use std::io::Write;

use cipher_core::crypto::cipher_context::{CipherContext, transform_buffer};
use cipher_core::crypto::cipher_traits::BlockCipher64;
use cipher_core::crypto::cipher_types::{CipherInput, CipherOutput, Direction};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tempfile::NamedTempFile;

struct IdentityCipher;

impl BlockCipher64 for IdentityCipher {
    fn encrypt_block(&self, block: u64) -> u64 {
        block
    }
    fn decrypt_block(&self, block: u64) -> u64 {
        block
    }
}

struct XorCipher(u64);

impl BlockCipher64 for XorCipher {
    fn encrypt_block(&self, block: u64) -> u64 {
        block ^ self.0
    }
    fn decrypt_block(&self, block: u64) -> u64 {
        block ^ self.0
    }
}

#[test]
fn test_transform_preserves_length() {
    for len in [0usize, 1, 7, 8, 9, 16, 17, 1024, 1025] {
        let data = vec![0x5Au8; len];
        let out = transform_buffer(&XorCipher(0xFFFF_FFFF_FFFF_FFFF), &data, Direction::Encrypt);
        assert_eq!(out.len(), len);
    }
}

#[test]
fn test_transform_tail_passes_through() {
    let data: Vec<u8> = (0..13).collect();
    let out = transform_buffer(&XorCipher(0xFFFF_FFFF_FFFF_FFFF), &data, Direction::Encrypt);
    // full chunk transformed, 5-byte tail untouched
    assert_ne!(&out[..8], &data[..8]);
    assert_eq!(&out[8..], &data[8..]);
}

#[test]
fn test_transform_empty_input() {
    let out = transform_buffer(&IdentityCipher, &[], Direction::Encrypt);
    assert!(out.is_empty());
}

#[test]
fn test_transform_roundtrip() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut data = vec![0u8; 4097];
    rng.fill_bytes(&mut data);

    let cipher = XorCipher(0x0123_4567_89AB_CDEF);
    let encrypted = transform_buffer(&cipher, &data, Direction::Encrypt);
    let decrypted = transform_buffer(&cipher, &encrypted, Direction::Decrypt);
    assert_eq!(decrypted, data);
}

#[test]
fn test_large_buffer_matches_chunked_walk() {
    // past the parallelism threshold the result must be byte-identical to
    // the sequential walk
    let mut rng = StdRng::seed_from_u64(99);
    let mut data = vec![0u8; 5 * 1024 * 1024 + 3];
    rng.fill_bytes(&mut data);

    let cipher = XorCipher(0xA5A5_A5A5_5A5A_5A5A);
    let parallel = transform_buffer(&cipher, &data, Direction::Encrypt);

    let mut expected = Vec::with_capacity(data.len());
    for chunk in data.chunks(8) {
        if chunk.len() < 8 {
            expected.extend_from_slice(chunk);
        } else {
            let word = u64::from_le_bytes(chunk.try_into().unwrap());
            expected.extend_from_slice(&cipher.encrypt_block(word).to_le_bytes());
        }
    }
    assert_eq!(parallel, expected);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bytes_to_buffer_roundtrip() {
    let ctx = CipherContext::new(Box::new(XorCipher(0xDEAD_BEEF_0000_FFFF)));
    let data: Vec<u8> = (0u8..=255).cycle().take(777).collect();

    let mut out_enc = CipherOutput::Buffer(Box::new(Vec::new()));
    ctx.encrypt(CipherInput::Bytes(data.clone()), &mut out_enc)
        .await
        .unwrap();
    let encrypted = out_enc.as_buffer().clone();
    assert_eq!(encrypted.len(), data.len());

    let mut out_dec = CipherOutput::Buffer(Box::new(Vec::new()));
    ctx.decrypt(CipherInput::Bytes(encrypted), &mut out_dec)
        .await
        .unwrap();
    assert_eq!(out_dec.as_buffer(), &data);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_file_to_file_roundtrip() {
    let mut rng = StdRng::seed_from_u64(123);
    let mut data = vec![0u8; 3 * 1024 * 1024 + 5];
    rng.fill_bytes(&mut data);

    let mut input_file = NamedTempFile::new().unwrap();
    input_file.write_all(&data).unwrap();
    let input_path = input_file.path().to_string_lossy().into_owned();

    let enc_file = NamedTempFile::new().unwrap();
    let enc_path = enc_file.path().to_string_lossy().into_owned();
    let dec_file = NamedTempFile::new().unwrap();
    let dec_path = dec_file.path().to_string_lossy().into_owned();

    let ctx = CipherContext::new(Box::new(XorCipher(0x1111_2222_3333_4444)));

    ctx.encrypt(
        CipherInput::File(input_path.clone()),
        &mut CipherOutput::File(enc_path.clone()),
    )
    .await
    .unwrap();

    let encrypted = std::fs::read(&enc_path).unwrap();
    assert_eq!(encrypted.len(), data.len());
    // 5-byte tail past the last full chunk is copied verbatim
    assert_eq!(&encrypted[data.len() - 5..], &data[data.len() - 5..]);

    ctx.decrypt(
        CipherInput::File(enc_path),
        &mut CipherOutput::File(dec_path.clone()),
    )
    .await
    .unwrap();

    assert_eq!(std::fs::read(&dec_path).unwrap(), data);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_file_to_buffer_matches_bytes_path() {
    let data: Vec<u8> = (0u8..=255).cycle().take(4096 + 3).collect();

    let mut input_file = NamedTempFile::new().unwrap();
    input_file.write_all(&data).unwrap();
    let input_path = input_file.path().to_string_lossy().into_owned();

    let ctx = CipherContext::new(Box::new(XorCipher(0x0F0F_0F0F_F0F0_F0F0)));

    let mut from_file = CipherOutput::Buffer(Box::new(Vec::new()));
    ctx.encrypt(CipherInput::File(input_path), &mut from_file)
        .await
        .unwrap();

    let mut from_bytes = CipherOutput::Buffer(Box::new(Vec::new()));
    ctx.encrypt(CipherInput::Bytes(data), &mut from_bytes)
        .await
        .unwrap();

    assert_eq!(from_file.as_buffer(), from_bytes.as_buffer());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_input_file_is_an_error() {
    let ctx = CipherContext::new(Box::new(IdentityCipher));
    let mut out = CipherOutput::Buffer(Box::new(Vec::new()));
    let result = ctx
        .encrypt(
            CipherInput::File("does/not/exist.bin".to_string()),
            &mut out,
        )
        .await;
    assert!(result.is_err());
}
