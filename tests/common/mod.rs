//! Synthetic BMP byte streams for tests.

#![allow(dead_code)]

use zenbmp::LCS_SRGB;

pub const BI_RGB: u32 = 0;
pub const BI_RLE4: u32 = 2;
pub const BI_BITFIELDS: u32 = 3;

/// Builds a BMP file field by field. Rows are given unpadded in stored order
/// and padded to a 4-byte stride on build.
#[derive(Clone, Debug)]
pub struct BmpBuilder {
    pub magic: [u8; 2],
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub bpp: u16,
    pub compression: u32,
    pub masks: [u32; 3],
    pub alpha_mask: u32,
    pub color_space: u32,
    pub palette: Vec<[u8; 4]>,
    pub palette_count: Option<u32>,
    pub rows: Vec<Vec<u8>>,
}

impl BmpBuilder {
    pub fn new(width: i32, height: i32, bpp: u16) -> Self {
        Self {
            magic: *b"BM",
            header_size: 40,
            width,
            height,
            bpp,
            compression: BI_RGB,
            masks: [0; 3],
            alpha_mask: 0,
            color_space: LCS_SRGB,
            palette: Vec::new(),
            palette_count: None,
            rows: Vec::new(),
        }
    }

    pub fn header_size(mut self, size: u32) -> Self {
        self.header_size = size;
        self
    }

    pub fn compression(mut self, compression: u32) -> Self {
        self.compression = compression;
        self
    }

    pub fn masks(mut self, red: u32, green: u32, blue: u32) -> Self {
        self.masks = [red, green, blue];
        self
    }

    pub fn alpha_mask(mut self, alpha: u32) -> Self {
        self.alpha_mask = alpha;
        self
    }

    pub fn color_space(mut self, tag: u32) -> Self {
        self.color_space = tag;
        self
    }

    /// Palette entries given as `[r, g, b, a]`, stored as B, G, R, A.
    pub fn palette(mut self, entries: &[[u8; 4]]) -> Self {
        self.palette = entries.iter().map(|&[r, g, b, a]| [b, g, r, a]).collect();
        self
    }

    /// Override the declared palette color count.
    pub fn palette_count(mut self, count: u32) -> Self {
        self.palette_count = Some(count);
        self
    }

    pub fn row(mut self, bytes: &[u8]) -> Self {
        self.rows.push(bytes.to_vec());
        self
    }

    pub fn stride(&self) -> usize {
        (self.bpp as usize * self.width.unsigned_abs() as usize).div_ceil(32) * 4
    }

    pub fn build(&self) -> Vec<u8> {
        let mut info = Vec::new();
        info.extend_from_slice(&self.header_size.to_le_bytes());
        info.extend_from_slice(&self.width.to_le_bytes());
        info.extend_from_slice(&self.height.to_le_bytes());
        info.extend_from_slice(&1u16.to_le_bytes());
        info.extend_from_slice(&self.bpp.to_le_bytes());
        info.extend_from_slice(&self.compression.to_le_bytes());
        info.extend_from_slice(&0u32.to_le_bytes());
        info.extend_from_slice(&2835i32.to_le_bytes());
        info.extend_from_slice(&2835i32.to_le_bytes());
        let count = self.palette_count.unwrap_or(self.palette.len() as u32);
        info.extend_from_slice(&count.to_le_bytes());
        info.extend_from_slice(&0u32.to_le_bytes());

        if self.header_size >= 52 || (self.header_size == 40 && self.compression == BI_BITFIELDS)
        {
            for mask in self.masks {
                info.extend_from_slice(&mask.to_le_bytes());
            }
        }
        if self.header_size >= 56 {
            info.extend_from_slice(&self.alpha_mask.to_le_bytes());
        }
        if self.header_size >= 108 {
            info.extend_from_slice(&self.color_space.to_le_bytes());
        }
        if info.len() < self.header_size as usize {
            info.resize(self.header_size as usize, 0);
        }

        let palette_bytes: Vec<u8> = self.palette.iter().flatten().copied().collect();
        let pixel_offset = 14 + info.len() + palette_bytes.len();

        let stride = self.stride();
        let mut pixels = Vec::new();
        for row in &self.rows {
            let mut padded = row.clone();
            padded.resize(stride, 0);
            pixels.extend_from_slice(&padded);
        }

        let file_size = pixel_offset + pixels.len();
        let mut out = Vec::with_capacity(file_size);
        out.extend_from_slice(&self.magic);
        out.extend_from_slice(&(file_size as u32).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&(pixel_offset as u32).to_le_bytes());
        out.extend_from_slice(&info);
        out.extend_from_slice(&palette_bytes);
        out.extend_from_slice(&pixels);
        out
    }
}

/// Byte offset of the first pixel row in a built file.
pub fn pixel_offset(file: &[u8]) -> usize {
    u32::from_le_bytes([file[10], file[11], file[12], file[13]]) as usize
}
