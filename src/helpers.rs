use crate::config::PatchLayout;
use crate::pixels::{RgbView, SubPixel, CHANNELS_PER_PIXEL};

pub trait PixelTail {
    /// Writes the bytes of the patch around `(x, y)` into `tail`, replacing
    /// its previous contents.
    fn get_tail(&self, layout: PatchLayout, patch_size: usize, x: usize, y: usize, tail: &mut Vec<SubPixel>);
}

impl PixelTail for RgbView<'_> {
    #[inline]
    fn get_tail(&self, layout: PatchLayout, patch_size: usize, x: usize, y: usize, tail: &mut Vec<SubPixel>) {
        tail.clear();
        match layout {
            PatchLayout::Square => {
                let tail_radious = ((patch_size as f64).sqrt().round() as usize / 2) as isize;
                let max_x = (self.width - 1) as isize;
                let max_y = (self.height - 1) as isize;
                for i in -tail_radious..=tail_radious {
                    let row = (y as isize + i).clamp(0, max_y) as usize;
                    for j in -tail_radious..=tail_radious {
                        let col = (x as isize + j).clamp(0, max_x) as usize;
                        let start = self.offset(col, row);
                        tail.extend_from_slice(&self.data[start..start + CHANNELS_PER_PIXEL]);
                    }
                }
            }
            PatchLayout::Contiguous => {
                let start = self.offset(x, y);
                let end = start.saturating_add(patch_size.saturating_mul(CHANNELS_PER_PIXEL)).min(self.data.len());
                tail.extend_from_slice(&self.data[start..end]);
            }
        }
    }
}
