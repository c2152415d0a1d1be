use std::fs;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use nf64::crypto::key_schedule::KeySchedule;
use nf64::crypto::nf64::{Nf64Cipher, decrypt_buffer, encrypt_buffer};
use nf64::crypto::round_function::round_encrypt;
use nf64::crypto::sboxes::{SBOX, substitute_word};

use cipher_core::crypto::cipher_context::CipherContext;
use cipher_core::crypto::cipher_traits::BlockCipher64;
use cipher_core::crypto::cipher_types::{CipherInput, CipherOutput};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    // --------------------------------------------------------
    // 0) Key schedule & single-block demo
    // --------------------------------------------------------
    println!("=== Key schedule & single-block demo ===");
    let schedule = KeySchedule::generate();
    println!(
        " First round key:  ({:016x}, {:016x})",
        schedule.keys()[0].k0,
        schedule.keys()[0].k1
    );
    println!(
        " Last round key:   ({:016x}, {:016x})",
        schedule.keys()[24].k0,
        schedule.keys()[24].k1
    );

    let cipher = Nf64Cipher::new(schedule.clone());
    let block = 0x0123_4567_89AB_CDEFu64;
    let encrypted = cipher.encrypt_block(block);
    let decrypted = cipher.decrypt_block(encrypted);
    println!(" Plaintext block:  {block:016x}");
    println!(" Encrypted block:  {encrypted:016x}");
    println!(" Decrypted block:  {decrypted:016x}");
    assert_eq!(decrypted, block);

    // --------------------------------------------------------
    // 1) S-box demo
    // --------------------------------------------------------
    println!("\n=== S-box demo ===");
    println!(" SBOX = {SBOX:x?}");
    for &x in &[0x0000_0000u32, 0x0123_4567, 0xFFFF_FFFF] {
        println!("  S(0x{:08x}) = 0x{:08x}", x, substitute_word(x));
    }

    // --------------------------------------------------------
    // 2) Round function demo
    // --------------------------------------------------------
    println!("\n=== Round function demo ===");
    for &(lower, upper) in &[(0u32, 0u32), (0x89AB_CDEF, 0x0123_4567)] {
        let (new_lower, new_upper) = round_encrypt(lower, upper, &schedule.keys()[0]);
        println!("  round((0x{lower:08x}, 0x{upper:08x})) = (0x{new_lower:08x}, 0x{new_upper:08x})");
    }

    // --------------------------------------------------------
    // 3) Buffer round-trip demo (tail passthrough included)
    // --------------------------------------------------------
    println!("\n=== Buffer demo ===");
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let mut data = vec![0u8; 1021]; // 127 full chunks + 5-byte tail
    rng.fill_bytes(&mut data);

    let ciphertext = encrypt_buffer(&schedule, &data);
    assert_eq!(ciphertext.len(), data.len());
    assert_eq!(&ciphertext[1016..], &data[1016..]);
    let plaintext = decrypt_buffer(&schedule, &ciphertext);
    assert_eq!(plaintext, data);
    println!(" {} bytes: first chunk {}", data.len(), hex::encode(&ciphertext[..8]));
    println!(" round-trip OK, 5-byte tail passed through");

    // --------------------------------------------------------
    // 4) File encryption/decryption demo
    // --------------------------------------------------------
    println!("\n=== File demo ===");
    let crate_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let out_dir = crate_dir.join("examples").join("output");
    fs::create_dir_all(&out_dir)?;

    let input_path = out_dir.join("sample.txt");
    fs::write(&input_path, b"NF64 demo payload: not a multiple of eight")?;

    let enc_path = out_dir.join("sample_nf64.bin");
    let dec_path = out_dir.join("sample_nf64_out.txt");

    let ctx = CipherContext::new(Box::new(Nf64Cipher::new(schedule.clone())));

    ctx.encrypt(
        CipherInput::File(input_path.to_string_lossy().into_owned()),
        &mut CipherOutput::File(enc_path.to_string_lossy().into_owned()),
    )
    .await?;

    ctx.decrypt(
        CipherInput::File(enc_path.to_string_lossy().into_owned()),
        &mut CipherOutput::File(dec_path.to_string_lossy().into_owned()),
    )
    .await?;

    let original = fs::read(&input_path)?;
    let decrypted = fs::read(&dec_path)?;
    assert_eq!(decrypted, original);
    println!(" File {} OK", input_path.display());

    Ok(())
}
