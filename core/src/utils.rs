use std::fmt;
use std::io;
use num_enum::TryFromPrimitive;

/// CRC32 (IEEE) over `data`.
pub fn compute_checksum(data: &[u8]) -> u32 {
    use crc32fast::Hasher;
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

pub fn verify_checksum(expected: u32, actual: u32) -> bool {
    expected == actual
}

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

/// `io::Write` sink that only counts bytes.
///
/// Lets an engine run its encoder once to learn the exact output size
/// without allocating the output.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingSink {
    written: usize,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl io::Write for CountingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written = self
            .written
            .checked_add(buf.len())
            .ok_or_else(|| io::Error::new(io::ErrorKind::OutOfMemory, "output size overflows usize"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
