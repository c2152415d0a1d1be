use crate::crypto::cipher_io::write_all;
use crate::crypto::cipher_traits::BlockCipher64;
use crate::crypto::cipher_types::{BLOCK_BYTES, CipherInput, CipherOutput, Direction};
use crate::crypto::utils::{word_from_le, word_to_le};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::sync::Arc;

// Constants for optimized processing
const CHUNK_SIZE: usize = 1024 * 1024; // 1MB chunks for file processing
const OPTIMAL_PARALLELISM_THRESHOLD: usize = 4 * 1024 * 1024; // 4MB threshold for parallel processing

struct VecWriter<'a>(&'a mut Vec<u8>);
impl<'a> Write for VecWriter<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Applies the block transform to every full 8-byte chunk of `data`.
///
/// Full chunks are decoded as little-endian 64-bit words, processed in
/// `direction` and re-encoded at the same offset. A trailing chunk shorter
/// than 8 bytes is copied through untouched, so the output always has the
/// same length as the input. Chunks are independent of one another: equal
/// aligned input chunks produce equal output chunks.
pub fn transform_buffer(
    algorithm: &(dyn BlockCipher64 + Send + Sync),
    data: &[u8],
    direction: Direction,
) -> Vec<u8> {
    if data.len() >= OPTIMAL_PARALLELISM_THRESHOLD {
        transform_buffer_parallel(algorithm, data, direction)
    } else {
        transform_chunks(algorithm, data, direction)
    }
}

fn transform_chunks(
    algorithm: &(dyn BlockCipher64 + Send + Sync),
    data: &[u8],
    direction: Direction,
) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());
    for chunk in data.chunks(BLOCK_BYTES) {
        if chunk.len() < BLOCK_BYTES {
            // final partial chunk passes through unmodified
            result.extend_from_slice(chunk);
        } else {
            let word = algorithm.process_block(word_from_le(chunk), direction);
            result.extend_from_slice(&word_to_le(word));
        }
    }
    result
}

fn transform_buffer_parallel(
    algorithm: &(dyn BlockCipher64 + Send + Sync),
    data: &[u8],
    direction: Direction,
) -> Vec<u8> {
    // Use larger chunks for big data to reduce threading overhead; the split
    // must stay a multiple of the block size so only the last mega chunk can
    // carry a partial tail.
    let optimal_chunk_size = (data.len() / rayon::current_num_threads())
        .max(BLOCK_BYTES)
        .min(CHUNK_SIZE)
        / BLOCK_BYTES
        * BLOCK_BYTES;

    data.par_chunks(optimal_chunk_size)
        .flat_map(|mega_chunk| transform_chunks(algorithm, mega_chunk, direction))
        .collect()
}

/// Orchestrates the chunked transform over in-memory buffers and files.
///
/// The algorithm handle is shared and read-only; every encrypt/decrypt call
/// sees the same key material.
#[derive(Clone)]
pub struct CipherContext {
    algorithm: Arc<dyn BlockCipher64 + Send + Sync>,
}

impl CipherContext {
    pub fn new(algorithm: Box<dyn BlockCipher64 + Send + Sync>) -> Self {
        Self {
            algorithm: Arc::from(algorithm),
        }
    }

    pub fn transform(&self, data: &[u8], direction: Direction) -> Vec<u8> {
        transform_buffer(self.algorithm.as_ref(), data, direction)
    }

    // Streaming file processing. CHUNK_SIZE is a multiple of the block size,
    // so a partial block can only appear at end of input, where it passes
    // through unchanged.
    fn process_chunked<R: Read, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
        direction: Direction,
    ) -> std::io::Result<()> {
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = read_full(&mut reader, &mut buf)?;
            if n == 0 {
                break;
            }
            let processed = transform_buffer(self.algorithm.as_ref(), &buf[..n], direction);
            writer.write_all(&processed)?;
            if n < CHUNK_SIZE {
                break;
            }
        }
        writer.flush()
    }

    fn run_file_task<F, T>(task: F) -> std::io::Result<T>
    where
        F: FnOnce() -> std::io::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(tokio::task::spawn_blocking(task))
        })
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?
    }

    async fn process(
        &self,
        input: CipherInput,
        output: &mut CipherOutput,
        direction: Direction,
    ) -> std::io::Result<()> {
        match (input, output) {
            (CipherInput::Bytes(data), out) => {
                let processed = self.transform(&data, direction);
                write_all(out, &processed)
            }
            (CipherInput::File(input_path), CipherOutput::File(output_path)) => {
                log::debug!("processing file {input_path} -> {output_path}");
                let this = self.clone();
                let output_path = output_path.clone();
                Self::run_file_task(move || {
                    let reader = BufReader::new(File::open(input_path)?);
                    let writer = BufWriter::new(File::create(output_path)?);
                    this.process_chunked(reader, writer, direction)
                })
            }
            (CipherInput::File(input_path), CipherOutput::Buffer(buf)) => {
                log::debug!("processing file {input_path} -> buffer");
                let this = self.clone();
                let result = Self::run_file_task(move || {
                    let reader = BufReader::new(File::open(input_path)?);
                    let mut result = Vec::new();
                    {
                        let writer = VecWriter(&mut result);
                        this.process_chunked(reader, writer, direction)?;
                    }
                    Ok(result)
                })?;
                **buf = result;
                Ok(())
            }
        }
    }

    pub async fn encrypt(
        &self,
        input: CipherInput,
        output: &mut CipherOutput,
    ) -> std::io::Result<()> {
        self.process(input, output, Direction::Encrypt).await
    }

    pub async fn decrypt(
        &self,
        input: CipherInput,
        output: &mut CipherOutput,
    ) -> std::io::Result<()> {
        self.process(input, output, Direction::Decrypt).await
    }
}

// Read::read may return short counts mid-stream; keep filling so that only
// the final chunk of the input can be partial.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
