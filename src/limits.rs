use crate::error::BmpError;

/// Bytes per decoded pixel.
const RGBA8_BYTES: u64 = 4;

/// Caps on the decoded bitmap, checked once the headers are parsed and before
/// the pixel buffer is allocated.
///
/// `None` leaves a dimension unbounded. Heights are row counts, so top-down
/// files are measured by `|height|`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum `width * rows`.
    pub max_pixels: Option<u64>,
    /// Maximum size of the RGBA8 output buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check a `width` x `rows` bitmap against every cap, in the order width,
    /// height, pixel count, output bytes.
    pub(crate) fn check(&self, width: u32, rows: u32) -> Result<(), BmpError> {
        let pixels = u64::from(width) * u64::from(rows);
        let caps = [
            ("width", u64::from(width), self.max_width),
            ("height", u64::from(rows), self.max_height),
            ("pixel count", pixels, self.max_pixels),
            ("output bytes", pixels.saturating_mul(RGBA8_BYTES), self.max_memory_bytes),
        ];
        for (what, value, cap) in caps {
            if let Some(cap) = cap.filter(|&cap| value > cap) {
                return Err(BmpError::LimitExceeded(alloc::format!(
                    "{what} {value} exceeds limit {cap}"
                )));
            }
        }
        Ok(())
    }

    /// RGBA8 output size of a `width` x `rows` bitmap, if it is addressable.
    pub(crate) fn output_bytes(width: u32, rows: u32) -> Option<usize> {
        let bytes = (u64::from(width) * u64::from(rows)).checked_mul(RGBA8_BYTES)?;
        usize::try_from(bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_accept_everything() {
        assert!(Limits::default().check(u32::MAX, u32::MAX).is_ok());
    }

    #[test]
    fn pixel_limit_uses_product() {
        let limits = Limits {
            max_pixels: Some(12),
            ..Default::default()
        };
        assert!(limits.check(3, 4).is_ok());
        assert!(matches!(
            limits.check(4, 4),
            Err(BmpError::LimitExceeded(_))
        ));
    }

    #[test]
    fn memory_limit_counts_four_bytes_per_pixel() {
        let limits = Limits {
            max_memory_bytes: Some(64),
            ..Default::default()
        };
        assert!(limits.check(4, 4).is_ok());
        match limits.check(4, 5) {
            Err(BmpError::LimitExceeded(msg)) => assert!(msg.contains("output bytes 80")),
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn width_is_checked_before_pixel_count() {
        let limits = Limits {
            max_width: Some(2),
            max_pixels: Some(1),
            ..Default::default()
        };
        match limits.check(3, 1) {
            Err(BmpError::LimitExceeded(msg)) => assert!(msg.starts_with("width 3")),
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn output_bytes_is_rgba8() {
        assert_eq!(Limits::output_bytes(3, 2), Some(24));
        assert_eq!(Limits::output_bytes(u32::MAX, u32::MAX), None);
    }
}
