//! Bounds-checked little-endian reader over the input bytes.

use crate::error::BmpError;

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn set_position(&mut self, pos: usize) -> Result<(), BmpError> {
        if pos > self.data.len() {
            return Err(BmpError::IoFailure {
                offset: pos,
                needed: 0,
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Borrow the next `n` bytes and advance past them.
    pub(crate) fn read_slice(&mut self, n: usize) -> Result<&'a [u8], BmpError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(BmpError::IoFailure {
                offset: self.pos,
                needed: n,
            })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_slice(N)?);
        Ok(buf)
    }

    pub(crate) fn get_u16_le(&mut self) -> Result<u16, BmpError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    pub(crate) fn get_u32_le(&mut self) -> Result<u32, BmpError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    pub(crate) fn get_i32_le(&mut self) -> Result<i32, BmpError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let mut c = Cursor::new(&[0x34, 0x12, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(c.get_u16_le().unwrap(), 0x1234);
        assert_eq!(c.get_u32_le().unwrap(), 0x1234_5678);
    }

    #[test]
    fn short_read_reports_offset() {
        let mut c = Cursor::new(&[1, 2, 3]);
        c.set_position(2).unwrap();
        match c.get_u16_le() {
            Err(BmpError::IoFailure { offset, needed }) => {
                assert_eq!(offset, 2);
                assert_eq!(needed, 2);
            }
            other => panic!("expected IoFailure, got {other:?}"),
        }
    }

    #[test]
    fn seek_past_end_fails() {
        let mut c = Cursor::new(&[0; 4]);
        assert!(c.set_position(4).is_ok());
        assert!(matches!(
            c.set_position(5),
            Err(BmpError::IoFailure { offset: 5, .. })
        ));
    }
}
