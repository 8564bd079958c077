use crate::pixels::SubPixel;

/// Gaussian affinity between two byte patches.
#[derive(Clone, Copy, Debug)]
pub struct GaussianKernel {
    two_sigma_sq: f64,
}

impl GaussianKernel {
    pub fn new(sigma: f64) -> Self {
        GaussianKernel {
            two_sigma_sq: 2.0 * sigma.powi(2),
        }
    }

    /// `exp(-d / 2σ²)` where `d` is the summed squared byte difference.
    /// Only the common prefix of the two patches is compared.
    #[inline]
    pub fn weight(&self, patch_a: &[SubPixel], patch_b: &[SubPixel]) -> f64 {
        let d = squared_distance(patch_a, patch_b);
        return (-d / self.two_sigma_sq).exp()
    }
}

#[inline]
pub fn squared_distance(patch_a: &[SubPixel], patch_b: &[SubPixel]) -> f64 {
    patch_a
        .iter()
        .zip(patch_b)
        .map(|(&a, &b)| (a as f64 - b as f64).powi(2))
        .sum()
}
