use crate::conditional_paralell::prelude::*;
use crate::error::DenoiseError;

pub type SubPixel = u8;
pub type Pixel = [SubPixel; CHANNELS_PER_PIXEL];

pub const CHANNELS_PER_PIXEL: usize = 3;
// BT.601
pub const R_LUMA: f64 = 0.299;
pub const G_LUMA: f64 = 0.587;
pub const B_LUMA: f64 = 0.114;

pub trait PixelOps {
    fn luma(self) -> SubPixel;
}

impl PixelOps for Pixel {
    fn luma(self) -> SubPixel {
        let [r, g, b] = self;
        let y = R_LUMA * r as f64 + G_LUMA * g as f64 + B_LUMA * b as f64;
        return y as SubPixel
    }
}

/// Borrowed, validated view over a row-major interleaved RGB buffer.
#[derive(Clone, Copy, Debug)]
pub struct RgbView<'a> {
    pub data: &'a [SubPixel],
    pub width: usize,
    pub height: usize,
}

impl<'a> RgbView<'a> {
    pub fn new(data: &'a [SubPixel], width: usize, height: usize) -> Result<Self, DenoiseError> {
        let expected = buffer_len(width, height)?;
        check_buffer("input", data.len(), expected)?;
        Ok(RgbView { data, width, height })
    }

    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * CHANNELS_PER_PIXEL
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        let i = self.offset(x, y);
        return [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Number of bytes an RGB buffer of the given dimensions holds.
pub fn buffer_len(width: usize, height: usize) -> Result<usize, DenoiseError> {
    if width == 0 || height == 0 {
        return Err(DenoiseError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS_PER_PIXEL))
        .ok_or(DenoiseError::InvalidDimensions { width, height })
}

pub(crate) fn check_buffer(
    which: &'static str,
    actual: usize,
    expected: usize,
) -> Result<(), DenoiseError> {
    if actual == 0 {
        return Err(DenoiseError::NullBuffer(which));
    }
    if actual != expected {
        return Err(DenoiseError::BufferSizeMismatch { expected, actual });
    }
    Ok(())
}

/// Converts an RGB buffer to one luma byte per pixel.
pub fn to_luma(data: &[SubPixel], width: usize, height: usize) -> Result<Vec<SubPixel>, DenoiseError> {
    let image = RgbView::new(data, width, height)?;
    Ok(image
        .data
        .par_chunks(CHANNELS_PER_PIXEL)
        .map(|p| [p[0], p[1], p[2]].luma())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_primaries() {
        assert_eq!([255u8, 0, 0].luma(), 76);
        assert_eq!([0u8, 255, 0].luma(), 149);
        assert_eq!([0u8, 0, 255].luma(), 29);
        assert_eq!([0u8, 0, 0].luma(), 0);
    }

    #[test]
    fn test_to_luma() {
        let data = vec![
            255, 0, 0,   0, 255, 0,
            0, 0, 255,   0, 0, 0,
        ];
        assert_eq!(to_luma(&data, 2, 2).unwrap(), vec![76, 149, 29, 0]);
    }

    #[test]
    fn test_view_validation() {
        let data = vec![0u8; 12];
        assert!(RgbView::new(&data, 2, 2).is_ok());
        assert_eq!(
            RgbView::new(&data, 0, 2).unwrap_err(),
            DenoiseError::InvalidDimensions { width: 0, height: 2 }
        );
        assert_eq!(
            RgbView::new(&data, 3, 2).unwrap_err(),
            DenoiseError::BufferSizeMismatch { expected: 18, actual: 12 }
        );
        assert_eq!(RgbView::new(&[], 1, 1).unwrap_err(), DenoiseError::NullBuffer("input"));
    }

    #[test]
    fn test_pixel_access() {
        let data: Vec<u8> = (0..18).collect();
        let image = RgbView::new(&data, 3, 2).unwrap();
        assert_eq!(image.offset(1, 1), 12);
        assert_eq!(image.pixel(1, 1), [12, 13, 14]);
        assert_eq!(image.pixel(2, 0), [6, 7, 8]);
    }
}
