use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DenoiseError, Result};

pub const DEFAULT_PATCH_SIZE: usize = 9;
pub const DEFAULT_SIGMA: f64 = 0.2;
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// How the bytes of a patch are gathered around a pixel.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PatchLayout {
    /// `side x side` pixel block centred on the pixel, edges replicated.
    #[default]
    Square,
    /// Flat run of `patch_size * 3` bytes starting at the pixel, cut at the
    /// end of the buffer. Runs may cross row boundaries.
    Contiguous,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct DenoiseConfig {
    /// Pixels per patch.
    pub patch_size: usize,
    /// Half extent of the search window. `None` means `patch_size / 2`.
    pub search_radius: Option<usize>,
    pub sigma: f64,
    pub patch_layout: PatchLayout,
}

impl Default for DenoiseConfig {
    fn default() -> Self {
        DenoiseConfig {
            patch_size: DEFAULT_PATCH_SIZE,
            search_radius: None,
            sigma: DEFAULT_SIGMA,
            patch_layout: PatchLayout::default(),
        }
    }
}

impl DenoiseConfig {
    pub fn radius(&self) -> usize {
        return self.search_radius.unwrap_or(self.patch_size / 2)
    }

    /// Side of the square patch block, `sqrt(patch_size)`.
    pub fn patch_side(&self) -> usize {
        return (self.patch_size as f64).sqrt().round() as usize
    }

    /// Bytes compared by the similarity kernel per patch.
    pub fn patch_len(&self) -> usize {
        self.patch_size * crate::pixels::CHANNELS_PER_PIXEL
    }

    pub fn validate(&self) -> std::result::Result<(), DenoiseError> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(DenoiseError::InvalidConfig(format!(
                "sigma must be a positive finite number, got {}",
                self.sigma
            )));
        }
        if self.patch_size == 0 {
            return Err(DenoiseError::InvalidConfig(
                "patch_size must be positive".to_string(),
            ));
        }
        if self.patch_size.checked_mul(crate::pixels::CHANNELS_PER_PIXEL).is_none() {
            return Err(DenoiseError::InvalidConfig(format!(
                "patch_size {} overflows the patch byte length",
                self.patch_size
            )));
        }
        if isize::try_from(self.radius()).is_err() {
            return Err(DenoiseError::InvalidConfig(format!(
                "search_radius must not exceed {}, got {}",
                isize::MAX,
                self.radius()
            )));
        }
        if self.patch_layout == PatchLayout::Square {
            let side = self.patch_side();
            if side.checked_mul(side) != Some(self.patch_size) || side % 2 == 0 {
                return Err(DenoiseError::InvalidConfig(format!(
                    "square patches need an odd square patch_size, got {}",
                    self.patch_size
                )));
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub jpeg_quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    pub denoise: DenoiseConfig,
    pub output: OutputConfig,
}

pub fn parse_str(data: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(data)?;
    settings.denoise.validate()?;
    Ok(settings)
}

pub fn parse_config(config_path: impl AsRef<Path>) -> Result<Settings> {
    let data_string = std::fs::read_to_string(config_path)?;
    parse_str(&data_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let config = DenoiseConfig::default();
        assert_eq!(config.radius(), 4);
        assert_eq!(config.patch_side(), 3);
        assert_eq!(config.patch_len(), 27);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let settings = parse_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.output.jpeg_quality, 75);
    }

    #[test]
    fn test_partial_toml() {
        let settings = parse_str(
            r#"
            [denoise]
            patch_size = 25
            sigma = 12.5
            patch_layout = "contiguous"

            [output]
            jpeg_quality = 90
            "#,
        )
        .unwrap();

        assert_eq!(settings.denoise.patch_size, 25);
        assert_eq!(settings.denoise.radius(), 12);
        assert_eq!(settings.denoise.sigma, 12.5);
        assert_eq!(settings.denoise.patch_layout, PatchLayout::Contiguous);
        assert_eq!(settings.output.jpeg_quality, 90);
    }

    #[test]
    fn test_explicit_radius() {
        let settings = parse_str("[denoise]\nsearch_radius = 2\n").unwrap();
        assert_eq!(settings.denoise.radius(), 2);
        assert_eq!(settings.denoise.patch_size, 9);
    }

    #[test]
    fn test_rejects_bad_sigma() {
        let config = DenoiseConfig { sigma: 0.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(DenoiseError::InvalidConfig(_))));

        let config = DenoiseConfig { sigma: f64::NAN, ..Default::default() };
        assert!(matches!(config.validate(), Err(DenoiseError::InvalidConfig(_))));
    }

    #[test]
    fn test_square_layout_needs_odd_square() {
        for patch_size in [0, 4, 8, 16] {
            let config = DenoiseConfig { patch_size, ..Default::default() };
            assert!(config.validate().is_err(), "patch_size {patch_size}");
        }

        let config = DenoiseConfig {
            patch_size: 8,
            patch_layout: PatchLayout::Contiguous,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_radius_beyond_isize() {
        let config = DenoiseConfig { search_radius: Some(usize::MAX), ..Default::default() };
        assert!(matches!(config.validate(), Err(DenoiseError::InvalidConfig(_))));

        let config = DenoiseConfig { search_radius: Some(isize::MAX as usize), ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_overflowing_patch_size() {
        let config = DenoiseConfig {
            patch_size: usize::MAX / 2,
            search_radius: Some(4),
            patch_layout: PatchLayout::Contiguous,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DenoiseError::InvalidConfig(_))));

        let config = DenoiseConfig {
            patch_size: usize::MAX / 3,
            search_radius: Some(4),
            patch_layout: PatchLayout::Contiguous,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(parse_str("[denoise]\nsigma = \"high\"\n"), Err(Error::Config(_))));
        assert!(matches!(
            parse_str("[denoise]\nsigma = -1.0\n"),
            Err(Error::Denoise(DenoiseError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(parse_config("does/not/exist.toml"), Err(Error::Io(_))));
    }
}
