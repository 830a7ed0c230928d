use alloc::string::String;

/// Errors from BMP decoding.
///
/// Every variant is terminal for the decode call that produced it. The decoder
/// never returns a partially filled buffer alongside an error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    /// The first two bytes are not `BM`.
    #[error("expected a bitmap image file; file corrupted or wrong type")]
    CorruptFile,

    /// Compression other than uncompressed RGB or bit-fields.
    #[error("unsupported BMP compression mode {0}")]
    UnsupportedCompression(u32),

    /// A revision 4+ info header declared a color space other than sRGB.
    #[error("unsupported non-sRGB color space tag {0:#010x}")]
    UnsupportedColorSpace(u32),

    /// A read or seek ran past the end of the input.
    #[error("unexpected end of input: needed {needed} bytes at offset {offset}")]
    IoFailure { offset: usize, needed: usize },

    /// A pixel index has no entry in the palette.
    #[error("palette index {index} out of range (palette has {len} entries)")]
    PaletteIndexOutOfRange { index: u8, len: usize },

    /// Bits per pixel other than 1, 2, 4, 8, 16, 24 or 32.
    #[error("unsupported BMP bit depth {0}")]
    UnsupportedBitDepth(u16),

    /// A header field is malformed, such as an info header under 40 bytes.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Width is not positive or height is zero.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// The RGBA8 output for these dimensions does not fit in memory.
    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// A caller-supplied [`crate::Limits`] cap was exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// The bitmap file could not be opened or read.
    #[cfg(feature = "std")]
    #[error("failed to read bitmap image file: {0}")]
    FileAccess(#[from] std::io::Error),
}
