//! Row stride and origin normalization shared by both pixel extractors.

use crate::error::BmpError;

/// Vertical storage order of the rows in a BMP file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowOrder {
    /// Positive height: the first stored row is the bottom row.
    BottomUp,
    /// Negative height: the first stored row is the top row.
    TopDown,
}

impl RowOrder {
    pub(crate) fn from_height(height: i32) -> Self {
        if height < 0 {
            Self::TopDown
        } else {
            Self::BottomUp
        }
    }
}

/// Padded byte length of one stored row: `ceil(bpp * width / 32) * 4`.
pub(crate) fn row_stride(bits_per_pixel: u16, width: u32) -> Option<usize> {
    let bits = u64::from(bits_per_pixel).checked_mul(u64::from(width))?;
    usize::try_from(bits.div_ceil(32) * 4).ok()
}

/// Byte offsets of the stored rows, yielded bottom row first.
///
/// For a top-down file this starts at the last stored row and steps backward.
#[derive(Clone, Debug)]
pub(crate) struct RowWalk {
    first: usize,
    stride: usize,
    rows: usize,
    index: usize,
    order: RowOrder,
}

impl RowWalk {
    /// Plan the walk, failing if the rows run past `data_len`.
    pub(crate) fn new(
        pixel_offset: u32,
        stride: usize,
        rows: u32,
        order: RowOrder,
        data_len: usize,
    ) -> Result<Self, BmpError> {
        let first = pixel_offset as usize;
        let rows = rows as usize;
        let needed = stride.checked_mul(rows).ok_or(BmpError::IoFailure {
            offset: first,
            needed: usize::MAX,
        })?;
        let end = first.checked_add(needed);
        if end.is_none_or(|end| end > data_len) {
            return Err(BmpError::IoFailure {
                offset: first,
                needed,
            });
        }
        Ok(Self {
            first,
            stride,
            rows,
            index: 0,
            order,
        })
    }
}

impl Iterator for RowWalk {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.index >= self.rows {
            return None;
        }
        let stored = match self.order {
            RowOrder::BottomUp => self.index,
            RowOrder::TopDown => self.rows - 1 - self.index,
        };
        self.index += 1;
        Some(self.first + stored * self.stride)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.rows - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for RowWalk {}
