//! Channel mask resolution for direct-color images.

use super::header::{BitDepth, Compression, HeaderExtension, Revision};

/// Bit masks selecting each channel of a packed pixel value.
///
/// A zero mask means the channel is absent and always decodes to 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelMasks {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub alpha: u32,
}

/// Masks chosen for an image, and whether they came from the fixed defaults
/// rather than the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedMasks {
    pub masks: ChannelMasks,
    pub defaulted: bool,
}

const RGB555: ChannelMasks = ChannelMasks {
    red: 0x7C00,
    green: 0x03E0,
    blue: 0x001F,
    alpha: 0x8000,
};

const RGB888: ChannelMasks = ChannelMasks {
    red: 0x00FF_0000,
    green: 0x0000_FF00,
    blue: 0x0000_00FF,
    alpha: 0,
};

const XRGB8888_ALPHA: u32 = 0xFF00_0000;

/// Resolve the channel masks for a direct-color image.
///
/// Returns `None` for indexed bit depths, which have no masks.
///
/// - 16-bit `BI_RGB`: 5-5-5 RGB, with a 1-bit alpha at bit 15 unless the
///   header carries an alpha mask (revision 3+).
/// - 24-bit: 8-8-8 RGB in the low three bytes and no alpha, whatever the
///   compression.
/// - 32-bit `BI_RGB`: 8-8-8 RGB with alpha in the top byte unless the header
///   carries an alpha mask.
/// - 16/32-bit `BI_BITFIELDS`: the header masks as read.
pub fn resolve_masks(
    depth: BitDepth,
    compression: Compression,
    extension: &HeaderExtension,
) -> Option<ResolvedMasks> {
    let has_alpha_field = extension.revision() >= Revision::V3;
    let header_alpha = extension.alpha_mask().unwrap_or(0);

    let (masks, defaulted) = match (depth, compression) {
        (BitDepth::TwentyFour, _) => (RGB888, true),
        (BitDepth::Sixteen, Compression::Rgb) => {
            let alpha = if has_alpha_field {
                header_alpha
            } else {
                RGB555.alpha
            };
            (ChannelMasks { alpha, ..RGB555 }, true)
        }
        (BitDepth::ThirtyTwo, Compression::Rgb) => {
            let alpha = if has_alpha_field {
                header_alpha
            } else {
                XRGB8888_ALPHA
            };
            (ChannelMasks { alpha, ..RGB888 }, true)
        }
        (BitDepth::Sixteen | BitDepth::ThirtyTwo, Compression::Bitfields) => {
            let rgb = extension.rgb_masks().unwrap_or_default();
            let masks = ChannelMasks {
                red: rgb.red,
                green: rgb.green,
                blue: rgb.blue,
                alpha: header_alpha,
            };
            (masks, false)
        }
        _ => return None,
    };

    Some(ResolvedMasks { masks, defaulted })
}

/// Position of the lowest set bit of `mask`; 0 for an empty mask.
pub fn mask_shift(mask: u32) -> u32 {
    if mask == 0 { 0 } else { mask.trailing_zeros() }
}
