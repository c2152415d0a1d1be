use crate::crypto::cipher_types::CipherOutput;
use std::fs;
use std::io;

pub(crate) fn write_all(output: &mut CipherOutput, data: &[u8]) -> io::Result<()> {
    match output {
        CipherOutput::Buffer(buf) => {
            buf.clear();
            buf.extend_from_slice(data);
            Ok(())
        }
        CipherOutput::File(path) => fs::write(path, data),
    }
}
