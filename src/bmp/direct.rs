//! Direct-color pixels (16, 24 and 32 bits per pixel) located by channel masks.

use alloc::vec::Vec;

use rgb::RGBA8;

use super::cursor::Cursor;
use super::header::BmpHeader;
use super::masks::{ChannelMasks, mask_shift};
use super::rows::{RowWalk, row_stride};
use crate::error::BmpError;

/// Masks paired with their shifts, ready to split a packed pixel value.
#[derive(Clone, Copy, Debug)]
struct ChannelUnpacker {
    masks: ChannelMasks,
    shifts: [u32; 4],
}

impl ChannelUnpacker {
    fn new(masks: ChannelMasks) -> Self {
        Self {
            masks,
            shifts: [
                mask_shift(masks.red),
                mask_shift(masks.green),
                mask_shift(masks.blue),
                mask_shift(masks.alpha),
            ],
        }
    }

    /// Channel values are truncated to 8 bits, never rescaled. An absent
    /// alpha channel decodes as 0.
    fn unpack(&self, value: u32) -> RGBA8 {
        let [rs, gs, bs, as_] = self.shifts;
        RGBA8::new(
            ((value & self.masks.red) >> rs) as u8,
            ((value & self.masks.green) >> gs) as u8,
            ((value & self.masks.blue) >> bs) as u8,
            ((value & self.masks.alpha) >> as_) as u8,
        )
    }
}

/// Little-endian reassembly: byte `k` lands at bit `8 * k`.
fn pack_le(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .enumerate()
        .fold(0u32, |acc, (k, &b)| acc | (u32::from(b) << (8 * k)))
}

/// Decode a direct-color image into bottom-row-first RGBA.
pub(crate) fn extract(
    cursor: &mut Cursor<'_>,
    header: &BmpHeader,
    masks: ChannelMasks,
) -> Result<Vec<RGBA8>, BmpError> {
    let info = &header.info;
    let bpp = info.bit_depth.bits();
    let pixel_size = usize::from(bpp / 8);

    let width = info.pixel_width();
    let rows = info.row_count();
    let stride = row_stride(bpp, width).ok_or(BmpError::DimensionsTooLarge {
        width,
        height: rows,
    })?;
    let walk = RowWalk::new(
        header.file.pixel_offset,
        stride,
        rows,
        info.row_order(),
        cursor.len(),
    )?;

    let unpacker = ChannelUnpacker::new(masks);
    let width = width as usize;
    let mut pixels = Vec::with_capacity(width * rows as usize);
    for offset in walk {
        cursor.set_position(offset)?;
        let row = cursor.read_slice(stride)?;
        pixels.extend(
            row.chunks_exact(pixel_size)
                .take(width)
                .map(|px| unpacker.unpack(pack_le(px))),
        );
    }
    Ok(pixels)
}
