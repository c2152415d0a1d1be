/// Size of one cipher chunk in bytes. Chunk `i` of a buffer always covers
/// bytes `[8i, 8i + 8)`.
pub const BLOCK_BYTES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

pub enum CipherInput {
    Bytes(Vec<u8>),
    File(String),
}

pub enum CipherOutput {
    Buffer(Box<Vec<u8>>),
    File(String),
}

impl CipherOutput {
    pub fn as_buffer(&self) -> &Vec<u8> {
        match self {
            CipherOutput::Buffer(buf) => buf,
            CipherOutput::File(_) => panic!("CipherOutput is a file, not a buffer"),
        }
    }
}
