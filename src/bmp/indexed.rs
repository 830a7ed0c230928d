//! Palette-indexed pixels (1, 2, 4 and 8 bits per pixel).

use alloc::vec::Vec;

use log::{trace, warn};
use rgb::RGBA8;

use super::cursor::Cursor;
use super::header::{BmpHeader, FILE_HEADER_SIZE};
use super::rows::{RowWalk, row_stride};
use crate::error::BmpError;

const MAX_PALETTE_COLORS: u32 = 256;

/// Color table read from just after the info header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Palette {
    entries: Vec<RGBA8>,
}

impl Palette {
    /// Read `count` entries stored as blue, green, red, alpha.
    fn read(cursor: &mut Cursor<'_>, offset: usize, count: u32) -> Result<Self, BmpError> {
        cursor.set_position(offset)?;
        let entries = (0..count)
            .map(|_| {
                let [b, g, r, a] = cursor.read_fixed_bytes::<4>()?;
                Ok(RGBA8::new(r, g, b, a))
            })
            .collect::<Result<Vec<_>, BmpError>>()?;
        Ok(Self { entries })
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn get(&self, index: u8) -> Result<RGBA8, BmpError> {
        self.entries
            .get(usize::from(index))
            .copied()
            .ok_or(BmpError::PaletteIndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }
}

/// Walks fixed-width indices through a row, most significant group first.
#[derive(Clone, Debug)]
pub(crate) struct BitCursor<'a> {
    bytes: &'a [u8],
    byte: usize,
    /// Bits already consumed from `bytes[byte]`, counted from bit 7.
    bit: u8,
    depth: u8,
    mask: u8,
}

impl<'a> BitCursor<'a> {
    /// `depth` must divide 8.
    pub(crate) fn new(bytes: &'a [u8], depth: u8) -> Self {
        debug_assert!(matches!(depth, 1 | 2 | 4 | 8));
        Self {
            bytes,
            byte: 0,
            bit: 0,
            depth,
            mask: (((1u16 << depth) - 1) & 0xFF) as u8,
        }
    }

    /// Next index, or `None` once the row bytes are exhausted.
    pub(crate) fn next_index(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.byte)?;
        let shift = 8 - self.bit - self.depth;
        let index = (byte >> shift) & self.mask;
        self.bit += self.depth;
        if self.bit == 8 {
            self.bit = 0;
            self.byte += 1;
        }
        Some(index)
    }
}

impl Iterator for BitCursor<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.next_index()
    }
}

/// Decode an indexed image into bottom-row-first RGBA.
pub(crate) fn extract(cursor: &mut Cursor<'_>, header: &BmpHeader) -> Result<Vec<RGBA8>, BmpError> {
    let info = &header.info;
    let bpp = info.bit_depth.bits();

    let count = info.palette_colors;
    if count > MAX_PALETTE_COLORS {
        return Err(BmpError::InvalidHeader(alloc::format!(
            "palette of {count} colors exceeds {MAX_PALETTE_COLORS}"
        )));
    }
    if count == 0 {
        // Empty table: any pixel index is out of range.
        warn!("BMP palette color count is 0");
    }

    let palette_offset = (FILE_HEADER_SIZE as usize)
        .checked_add(info.header_size as usize)
        .ok_or(BmpError::IoFailure {
            offset: usize::MAX,
            needed: 0,
        })?;
    let palette = Palette::read(cursor, palette_offset, count)?;
    trace!("Palette entries: {}", palette.len());

    let width = info.pixel_width();
    let rows = info.row_count();
    let dims_err = BmpError::DimensionsTooLarge {
        width,
        height: rows,
    };
    let stride = row_stride(bpp, width).ok_or(dims_err)?;
    let walk = RowWalk::new(
        header.file.pixel_offset,
        stride,
        rows,
        info.row_order(),
        cursor.len(),
    )?;

    let width = width as usize;
    let mut pixels = Vec::with_capacity(width * rows as usize);
    for offset in walk {
        cursor.set_position(offset)?;
        let row = cursor.read_slice(stride)?;
        for index in BitCursor::new(row, bpp as u8).take(width) {
            pixels.push(palette.get(index)?);
        }
    }
    Ok(pixels)
}
