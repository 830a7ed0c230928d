//! # zenbmp
//!
//! Strict BMP decoder producing RGBA8 pixel buffers with a bottom-left origin.
//!
//! ## Supported input
//!
//! - Info header revisions 1 through 5 (`BITMAPINFOHEADER` to
//!   `BITMAPV5HEADER`). Revision 4+ headers must declare the sRGB color space.
//! - Palette-indexed images at 1, 2, 4 and 8 bits per pixel.
//! - Direct-color images at 16, 24 and 32 bits per pixel, uncompressed
//!   (`BI_RGB`, fixed default masks) or with explicit `BI_BITFIELDS` masks.
//! - Bottom-up (positive height) and top-down (negative height) row order.
//!
//! ## Output conventions
//!
//! - Row 0 of the output is the bottom row of the image.
//! - Masked channels are not rescaled: a 5-bit channel decodes to 0–31.
//! - Images without an alpha mask, including every 24-bit image, decode with
//!   alpha 0.
//!
//! ## Non-Goals
//!
//! - Encoding
//! - RLE compression, embedded JPEG/PNG
//! - ICC profiles or any color space besides sRGB
//! - OS/2 core headers
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{decode_bmp, probe_bmp};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Probe without decoding
//! let header = probe_bmp(data)?;
//! println!("{}x{} {:?}", header.info.width, header.info.height, header.info.bit_depth);
//!
//! let bitmap = decode_bmp(data)?;
//! assert_eq!(bitmap.pixels().len(), (bitmap.width * bitmap.height) as usize);
//! # Ok::<(), zenbmp::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod decode;
mod error;
mod limits;

// Re-exports
pub use bmp::{
    BitDepth, BmpHeader, ChannelMasks, ColorSpace, Compression, FileHeader, HeaderExtension,
    InfoHeader, LCS_SRGB, ResolvedMasks, Revision, RgbMasks, RowOrder, mask_shift, resolve_masks,
};
pub use decode::{Bitmap, DecodeRequest};
pub use error::BmpError;
pub use limits::Limits;
pub use rgb::RGBA8;

/// Decode BMP bytes with no limits.
pub fn decode_bmp(data: &[u8]) -> Result<Bitmap, BmpError> {
    DecodeRequest::new(data).decode()
}

/// Parse the file and info headers without decoding any pixels.
pub fn probe_bmp(data: &[u8]) -> Result<BmpHeader, BmpError> {
    bmp::probe(data)
}

/// Read and decode a BMP file.
///
/// The file is read into memory in full and released before this returns,
/// on success or failure.
#[cfg(feature = "std")]
pub fn decode_bmp_file<P: AsRef<std::path::Path>>(path: P) -> Result<Bitmap, BmpError> {
    let path = path.as_ref();
    let data = std::fs::read(path).inspect_err(|e| {
        log::error!("failed to open bitmap image file {}: {e}", path.display());
    })?;
    decode_bmp(&data)
}
