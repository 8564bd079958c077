use std::time::Instant;

use itertools::iproduct;
use tracing::debug;

use crate::conditional_paralell::prelude::*;
use crate::config::DenoiseConfig;
use crate::error::DenoiseError;
use crate::helpers::PixelTail;
use crate::pixels::{buffer_len, check_buffer, Pixel, RgbView, SubPixel, CHANNELS_PER_PIXEL};
use crate::similarity::GaussianKernel;

/// Running per-channel sums for a single output pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Accumulator {
    pub sum_weight: [f64; CHANNELS_PER_PIXEL],
    pub sum_value: [f64; CHANNELS_PER_PIXEL],
    /// In-bounds candidates visited.
    pub contributions: usize,
}

impl Accumulator {
    #[inline]
    pub fn add(&mut self, weight: f64, pixel: Pixel) {
        for c in 0..CHANNELS_PER_PIXEL {
            self.sum_weight[c] += weight;
            self.sum_value[c] += weight * pixel[c] as f64;
        }
        self.contributions += 1;
    }

    /// Weighted average per channel, truncated to a byte. Channels with no
    /// weight keep the value from `fallback`.
    #[inline]
    pub fn finalize(&self, fallback: Pixel) -> Pixel {
        let mut out = fallback;
        for c in 0..CHANNELS_PER_PIXEL {
            if self.sum_weight[c] > 0.0 {
                out[c] = (self.sum_value[c] / self.sum_weight[c]) as SubPixel;
            }
        }
        return out
    }
}

#[derive(Clone, Copy)]
pub struct Nlmeans<'a> {
    pub config: &'a DenoiseConfig,
    pub kernel: GaussianKernel,
    pub image: RgbView<'a>,
}

impl<'a> Nlmeans<'a> {
    pub fn new(config: &'a DenoiseConfig, image: RgbView<'a>) -> Result<Self, DenoiseError> {
        config.validate()?;
        Ok(Nlmeans {
            config,
            kernel: GaussianKernel::new(config.sigma),
            image,
        })
    }

    /// Fills `output` row by row. `output` must have the input's length.
    pub fn denoise_image(self, output: &mut [SubPixel]) -> Result<(), DenoiseError> {
        check_buffer("output", output.len(), self.image.data.len())?;
        let row_len = self.image.width * CHANNELS_PER_PIXEL;
        output.par_chunks_mut(row_len).enumerate().for_each(|(y, row)| {
            self.denoise_row(y, row)
        });
        Ok(())
    }

    fn denoise_row(&self, y: usize, row: &mut [SubPixel]) {
        // a patch never holds more bytes than the image
        let capacity = self.config.patch_len().min(self.image.data.len());
        let mut center = Vec::with_capacity(capacity);
        let mut candidate = Vec::with_capacity(capacity);
        for (x, out) in row.chunks_exact_mut(CHANNELS_PER_PIXEL).enumerate() {
            let acc = self.accumulate(x, y, &mut center, &mut candidate);
            out.copy_from_slice(&acc.finalize(self.image.pixel(x, y)));
        }
    }

    /// Visits the search window around `(x, y)`; candidates outside the
    /// image are skipped.
    pub fn accumulate(
        &self,
        x: usize,
        y: usize,
        center: &mut Vec<SubPixel>,
        candidate: &mut Vec<SubPixel>,
    ) -> Accumulator {
        let layout = self.config.patch_layout;
        let patch_size = self.config.patch_size;
        // offsets past the image extent never land in bounds
        let extent = self.image.width.max(self.image.height);
        let radius = self.config.radius().min(extent) as isize;

        self.image.get_tail(layout, patch_size, x, y, center);

        let mut acc = Accumulator::default();
        for (dy, dx) in iproduct!(-radius..=radius, -radius..=radius) {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            if nx >= self.image.width || ny >= self.image.height {
                continue;
            }
            self.image.get_tail(layout, patch_size, nx, ny, candidate);
            let weight = self.kernel.weight(candidate, center);
            acc.add(weight, self.image.pixel(nx, ny));
        }
        return acc
    }
}

/// Denoises `input` into a freshly allocated buffer of the same size.
pub fn denoise(
    input: &[SubPixel],
    width: usize,
    height: usize,
    config: &DenoiseConfig,
) -> Result<Vec<SubPixel>, DenoiseError> {
    let len = buffer_len(width, height)?;
    config.validate()?;
    check_buffer("input", input.len(), len)?;
    let mut output = vec![0; len];
    denoise_into(input, &mut output, width, height, config)?;
    Ok(output)
}

/// Denoises `input` into the caller-provided `output`. Nothing is written
/// unless every precondition holds.
pub fn denoise_into(
    input: &[SubPixel],
    output: &mut [SubPixel],
    width: usize,
    height: usize,
    config: &DenoiseConfig,
) -> Result<(), DenoiseError> {
    let len = buffer_len(width, height)?;
    config.validate()?;
    check_buffer("input", input.len(), len)?;
    check_buffer("output", output.len(), len)?;

    let image = RgbView::new(input, width, height)?;
    let now = Instant::now();
    Nlmeans::new(config, image)?.denoise_image(output)?;
    debug!(
        width,
        height,
        patch_size = config.patch_size,
        radius = config.radius(),
        elapsed = ?now.elapsed(),
        "nl-means pass done"
    );
    Ok(())
}
