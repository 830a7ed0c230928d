//! BMP decoding: header parse, then the indexed or direct extractor chosen by
//! bit depth.
//!
//! Use top-level [`crate::decode_bmp`], [`crate::probe_bmp`], etc.

mod cursor;
mod direct;
mod header;
mod indexed;
mod masks;
mod rows;

pub use header::{
    BitDepth, BmpHeader, ColorSpace, Compression, FileHeader, HeaderExtension, InfoHeader,
    LCS_SRGB, Revision, RgbMasks,
};
pub use masks::{ChannelMasks, ResolvedMasks, mask_shift, resolve_masks};
pub use rows::RowOrder;

use log::debug;

use crate::decode::Bitmap;
use crate::error::BmpError;
use crate::limits::Limits;
use cursor::Cursor;

/// Parse only the headers.
pub(crate) fn probe(data: &[u8]) -> Result<BmpHeader, BmpError> {
    BmpHeader::parse(&mut Cursor::new(data))
}

/// Decode a whole BMP into a bottom-left-origin RGBA8 bitmap.
pub(crate) fn decode(data: &[u8], limits: Option<&Limits>) -> Result<Bitmap, BmpError> {
    let mut cursor = Cursor::new(data);
    let header = BmpHeader::parse(&mut cursor)?;
    let info = &header.info;
    let width = info.pixel_width();
    let height = info.row_count();
    check_limits(limits, width, height)?;

    let pixels = match resolve_masks(info.bit_depth, info.compression, &info.extension) {
        None => indexed::extract(&mut cursor, &header)?,
        Some(resolved) => {
            debug!(
                "BMP channel masks {:?} (defaulted: {})",
                resolved.masks, resolved.defaulted
            );
            direct::extract(&mut cursor, &header, resolved.masks)?
        }
    };

    debug_assert_eq!(pixels.len(), width as usize * height as usize);
    Ok(Bitmap::new(width, height, pixels, info.row_order()))
}

fn check_limits(limits: Option<&Limits>, width: u32, height: u32) -> Result<(), BmpError> {
    if Limits::output_bytes(width, height).is_none() {
        return Err(BmpError::DimensionsTooLarge { width, height });
    }
    limits.map_or(Ok(()), |limits| limits.check(width, height))
}
