use alloc::vec::Vec;

use rgb::{ComponentBytes as _, RGBA8};

use crate::bmp::RowOrder;
use crate::error::BmpError;
use crate::limits::Limits;

/// A decoded bitmap.
///
/// Pixels are row-major with the origin at the bottom-left corner: row 0 is
/// the bottom row, whatever order the file stored its rows in.
///
/// Channel values are copied out of their masks without rescaling, so a
/// 5-bit channel yields 0–31. Images without an alpha mask (every 24-bit
/// image) decode with alpha 0 on every pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    /// Row count, i.e. the magnitude of the stored height.
    pub height: u32,
    /// Row order of the source file, for callers that care.
    pub source_order: RowOrder,
    pixels: Vec<RGBA8>,
}

impl Bitmap {
    pub(crate) fn new(width: u32, height: u32, pixels: Vec<RGBA8>, source_order: RowOrder) -> Self {
        Self {
            width,
            height,
            source_order,
            pixels,
        }
    }

    /// All pixels, bottom row first.
    pub fn pixels(&self) -> &[RGBA8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<RGBA8> {
        self.pixels
    }

    /// Pixels as a flat `R, G, B, A` byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_bytes()
    }

    /// Pixel at column `x`, row `y` counted up from the bottom.
    pub fn pixel(&self, x: u32, y: u32) -> Option<RGBA8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels.get(idx).copied()
    }

    /// Rows, bottom row first.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[RGBA8]> + '_ {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// Zero-copy view as an [`imgref::ImgRef`]. Row 0 of the view is the
    /// bottom row.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, RGBA8> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }

    /// Convert into an [`imgref::ImgVec`]. Row 0 is the bottom row.
    #[cfg(feature = "imgref")]
    pub fn into_imgvec(self) -> imgref::ImgVec<RGBA8> {
        imgref::ImgVec::new(self.pixels, self.width as usize, self.height as usize)
    }
}

/// Decode request builder.
///
/// ```no_run
/// use zenbmp::{DecodeRequest, Limits};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits {
///     max_pixels: Some(4096 * 4096),
///     ..Default::default()
/// };
/// let bitmap = DecodeRequest::new(data).with_limits(&limits).decode()?;
/// println!("{}x{}", bitmap.width, bitmap.height);
/// # Ok::<(), zenbmp::BmpError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self) -> Result<Bitmap, BmpError> {
        crate::bmp::decode(self.data, self.limits)
            .inspect_err(|e| log::debug!("BMP decode failed: {e}"))
    }
}
