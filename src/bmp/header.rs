//! File header and versioned info header parsing.
//!
//! The info header grew through five revisions, each one appending fields to
//! the previous layout. The revision is never stored in the file; it is
//! classified from the declared header size (and, for the 40-byte header, the
//! compression mode) before any extension field is read.

use log::{debug, trace, warn};

use super::cursor::Cursor;
use super::rows::RowOrder;
use crate::error::BmpError;

pub(crate) const FILE_HEADER_SIZE: u32 = 14;

const INFO_HEADER_V1_SIZE: u32 = 40;
const INFO_HEADER_V2_SIZE: u32 = 52;
const INFO_HEADER_V3_SIZE: u32 = 56;
const INFO_HEADER_V4_SIZE: u32 = 108;
const INFO_HEADER_V5_SIZE: u32 = 124;

const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;

/// `LCS_sRGB`: the ASCII tag "sRGB" read as a little-endian u32.
pub const LCS_SRGB: u32 = 0x7352_4742;

/// The 14-byte file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    /// Total file size as declared by the writer. Not trusted.
    pub file_size: u32,
    pub reserved0: u16,
    pub reserved1: u16,
    /// Byte offset from the start of the file to the first pixel row.
    pub pixel_offset: u32,
}

/// Supported compression modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    /// `BI_RGB`: uncompressed, masks defaulted from the bit depth.
    Rgb,
    /// `BI_BITFIELDS`: uncompressed, masks taken from the header.
    Bitfields,
}

impl Compression {
    fn from_u32(raw: u32) -> Result<Self, BmpError> {
        match raw {
            BI_RGB => Ok(Self::Rgb),
            BI_BITFIELDS => Ok(Self::Bitfields),
            other => Err(BmpError::UnsupportedCompression(other)),
        }
    }
}

/// Bits per pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitDepth {
    One,
    Two,
    Four,
    Eight,
    Sixteen,
    TwentyFour,
    ThirtyTwo,
}

impl BitDepth {
    fn from_u16(bpp: u16) -> Result<Self, BmpError> {
        match bpp {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            16 => Ok(Self::Sixteen),
            24 => Ok(Self::TwentyFour),
            32 => Ok(Self::ThirtyTwo),
            other => Err(BmpError::UnsupportedBitDepth(other)),
        }
    }

    pub fn bits(self) -> u16 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
            Self::Sixteen => 16,
            Self::TwentyFour => 24,
            Self::ThirtyTwo => 32,
        }
    }

    /// Whether pixels are palette indices rather than direct color.
    pub fn is_indexed(self) -> bool {
        matches!(self, Self::One | Self::Two | Self::Four | Self::Eight)
    }
}

/// Info header revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Revision {
    /// `BITMAPINFOHEADER`
    V1,
    /// Adds RGB masks.
    V2,
    /// Adds an alpha mask.
    V3,
    /// Adds the color-space tag (`BITMAPV4HEADER`).
    V4,
    /// `BITMAPV5HEADER`. The V5-only fields are not consumed.
    V5,
}

impl Revision {
    /// Classify a header from its declared size and raw compression value.
    ///
    /// A 40-byte header followed by `BI_BITFIELDS` masks counts as revision 2.
    pub fn classify(header_size: u32, compression: u32) -> Self {
        if header_size >= INFO_HEADER_V5_SIZE {
            Self::V5
        } else if header_size >= INFO_HEADER_V4_SIZE {
            Self::V4
        } else if header_size >= INFO_HEADER_V3_SIZE {
            Self::V3
        } else if header_size >= INFO_HEADER_V2_SIZE
            || (header_size == INFO_HEADER_V1_SIZE && compression == BI_BITFIELDS)
        {
            Self::V2
        } else {
            Self::V1
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 => 3,
            Self::V4 => 4,
            Self::V5 => 5,
        }
    }
}

/// Red, green and blue masks as stored in a revision 2+ header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RgbMasks {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

/// The only accepted color space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSpace {
    Srgb,
}

/// Revision-specific tail of the info header. Each variant carries exactly the
/// fields its revision guarantees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderExtension {
    V1,
    V2 {
        rgb: RgbMasks,
    },
    V3 {
        rgb: RgbMasks,
        alpha: u32,
    },
    V4 {
        rgb: RgbMasks,
        alpha: u32,
        color_space: ColorSpace,
    },
    V5 {
        rgb: RgbMasks,
        alpha: u32,
        color_space: ColorSpace,
    },
}

impl HeaderExtension {
    fn read(cursor: &mut Cursor<'_>, revision: Revision) -> Result<Self, BmpError> {
        if revision == Revision::V1 {
            return Ok(Self::V1);
        }
        let rgb = RgbMasks {
            red: cursor.get_u32_le()?,
            green: cursor.get_u32_le()?,
            blue: cursor.get_u32_le()?,
        };
        if revision == Revision::V2 {
            return Ok(Self::V2 { rgb });
        }
        let alpha = cursor.get_u32_le()?;
        if revision == Revision::V3 {
            return Ok(Self::V3 { rgb, alpha });
        }
        let tag = cursor.get_u32_le()?;
        if tag != LCS_SRGB {
            return Err(BmpError::UnsupportedColorSpace(tag));
        }
        let color_space = ColorSpace::Srgb;
        if revision == Revision::V4 {
            Ok(Self::V4 {
                rgb,
                alpha,
                color_space,
            })
        } else {
            Ok(Self::V5 {
                rgb,
                alpha,
                color_space,
            })
        }
    }

    pub fn revision(&self) -> Revision {
        match self {
            Self::V1 => Revision::V1,
            Self::V2 { .. } => Revision::V2,
            Self::V3 { .. } => Revision::V3,
            Self::V4 { .. } => Revision::V4,
            Self::V5 { .. } => Revision::V5,
        }
    }

    /// RGB masks, present from revision 2.
    pub fn rgb_masks(&self) -> Option<RgbMasks> {
        match *self {
            Self::V1 => None,
            Self::V2 { rgb }
            | Self::V3 { rgb, .. }
            | Self::V4 { rgb, .. }
            | Self::V5 { rgb, .. } => Some(rgb),
        }
    }

    /// Alpha mask, present from revision 3.
    pub fn alpha_mask(&self) -> Option<u32> {
        match *self {
            Self::V1 | Self::V2 { .. } => None,
            Self::V3 { alpha, .. } | Self::V4 { alpha, .. } | Self::V5 { alpha, .. } => {
                Some(alpha)
            }
        }
    }
}

/// The info header: eleven base fields plus the revision extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    /// Declared size in bytes; selects the revision.
    pub header_size: u32,
    pub width: i32,
    /// Negative for top-down row storage.
    pub height: i32,
    pub planes: u16,
    pub bit_depth: BitDepth,
    pub compression: Compression,
    pub image_size: u32,
    pub x_resolution: i32,
    pub y_resolution: i32,
    pub palette_colors: u32,
    pub important_colors: u32,
    pub extension: HeaderExtension,
}

impl InfoHeader {
    pub fn revision(&self) -> Revision {
        self.extension.revision()
    }

    /// Image width in pixels. Always non-zero for a parsed header.
    pub fn pixel_width(&self) -> u32 {
        self.width.unsigned_abs()
    }

    /// Number of pixel rows, i.e. `|height|`.
    pub fn row_count(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// Row storage order in the file, from the sign of the height.
    pub fn row_order(&self) -> RowOrder {
        RowOrder::from_height(self.height)
    }
}

/// Both headers of a BMP file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub file: FileHeader,
    pub info: InfoHeader,
}

impl BmpHeader {
    /// Parse both headers from the start of the input.
    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, BmpError> {
        if cursor.read_fixed_bytes::<2>().ok() != Some(*b"BM") {
            return Err(BmpError::CorruptFile);
        }

        let file = FileHeader {
            file_size: cursor.get_u32_le()?,
            reserved0: cursor.get_u16_le()?,
            reserved1: cursor.get_u16_le()?,
            pixel_offset: cursor.get_u32_le()?,
        };
        if file.file_size as usize != cursor.len() {
            warn!(
                "BMP file size field ({}) doesn't match actual size ({})",
                file.file_size,
                cursor.len()
            );
        }

        let header_size = cursor.get_u32_le()?;
        if header_size < INFO_HEADER_V1_SIZE {
            return Err(BmpError::InvalidHeader(alloc::format!(
                "unsupported info header size: {header_size}"
            )));
        }
        let width = cursor.get_i32_le()?;
        let height = cursor.get_i32_le()?;
        let planes = cursor.get_u16_le()?;
        let bpp = cursor.get_u16_le()?;
        let raw_compression = cursor.get_u32_le()?;
        let image_size = cursor.get_u32_le()?;
        let x_resolution = cursor.get_i32_le()?;
        let y_resolution = cursor.get_i32_le()?;
        let palette_colors = cursor.get_u32_le()?;
        let important_colors = cursor.get_u32_le()?;

        trace!("Header size: {header_size}");
        trace!("Width: {width}");
        trace!("Height: {height}");
        trace!("Bit depth: {bpp}");
        trace!("Compression: {raw_compression}");
        trace!("Palette colors: {palette_colors}");

        let revision = Revision::classify(header_size, raw_compression);
        debug!("BMP info header revision {}", revision.number());
        let extension = HeaderExtension::read(cursor, revision)?;

        let compression = Compression::from_u32(raw_compression)?;
        let bit_depth = BitDepth::from_u16(bpp)?;

        if width <= 0 || height == 0 {
            return Err(BmpError::InvalidDimensions { width, height });
        }
        if planes != 1 {
            warn!("BMP planes field is {planes}, expected 1");
        }

        Ok(Self {
            file,
            info: InfoHeader {
                header_size,
                width,
                height,
                planes,
                bit_depth,
                compression,
                image_size,
                x_resolution,
                y_resolution,
                palette_colors,
                important_colors,
                extension,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_size() {
        assert_eq!(Revision::classify(40, BI_RGB), Revision::V1);
        assert_eq!(Revision::classify(52, BI_RGB), Revision::V2);
        assert_eq!(Revision::classify(56, BI_RGB), Revision::V3);
        assert_eq!(Revision::classify(64, BI_RGB), Revision::V3);
        assert_eq!(Revision::classify(108, BI_RGB), Revision::V4);
        assert_eq!(Revision::classify(124, BI_RGB), Revision::V5);
        assert_eq!(Revision::classify(200, BI_BITFIELDS), Revision::V5);
    }

    #[test]
    fn classify_v1_with_bitfields_as_v2() {
        assert_eq!(Revision::classify(40, BI_BITFIELDS), Revision::V2);
        // Other compression values never promote a 40-byte header.
        assert_eq!(Revision::classify(40, 2), Revision::V1);
    }

    #[test]
    fn revision_is_ordered() {
        assert!(Revision::V1 < Revision::V3);
        assert!(Revision::V5 > Revision::V4);
    }

    #[test]
    fn extension_accessors() {
        let rgb = RgbMasks {
            red: 0xF800,
            green: 0x07E0,
            blue: 0x001F,
        };
        assert_eq!(HeaderExtension::V1.rgb_masks(), None);
        assert_eq!(HeaderExtension::V2 { rgb }.rgb_masks(), Some(rgb));
        assert_eq!(HeaderExtension::V2 { rgb }.alpha_mask(), None);
        assert_eq!(HeaderExtension::V3 { rgb, alpha: 1 }.alpha_mask(), Some(1));
    }

    #[test]
    fn bit_depth_families() {
        for bpp in [1, 2, 4, 8] {
            assert!(BitDepth::from_u16(bpp).unwrap().is_indexed());
        }
        for bpp in [16, 24, 32] {
            assert!(!BitDepth::from_u16(bpp).unwrap().is_indexed());
        }
        assert!(matches!(
            BitDepth::from_u16(12),
            Err(BmpError::UnsupportedBitDepth(12))
        ));
    }
}
