use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use tracing::info;

use crate::error::Result;
use crate::pixels::SubPixel;

/// Decodes an image file into an interleaved RGB buffer.
pub fn read_rgb(path: impl AsRef<Path>) -> Result<(Vec<SubPixel>, usize, usize)> {
    let img = image::open(path.as_ref())?.to_rgb8();
    let (width, height) = img.dimensions();
    info!(path = %path.as_ref().display(), width, height, "decoded image");
    Ok((img.into_raw(), width as usize, height as usize))
}

pub fn save_jpeg(path: impl AsRef<Path>, pixels: &[SubPixel], width: usize, height: usize, quality: u8) -> Result<()> {
    write_jpeg(path.as_ref(), pixels, width, height, quality, ExtendedColorType::Rgb8)
}

pub fn save_gray_jpeg(path: impl AsRef<Path>, pixels: &[SubPixel], width: usize, height: usize, quality: u8) -> Result<()> {
    write_jpeg(path.as_ref(), pixels, width, height, quality, ExtendedColorType::L8)
}

fn write_jpeg(
    path: &Path,
    pixels: &[SubPixel],
    width: usize,
    height: usize,
    quality: u8,
    color: ExtendedColorType,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    encoder.encode(pixels, width as u32, height as u32, color)?;
    writer.flush()?;
    info!(path = %path.display(), width, height, quality, "wrote jpeg");
    Ok(())
}

/// Creates `folder` if needed and returns `folder/file_name`.
pub fn output_path(folder: impl AsRef<Path>, file_name: impl AsRef<Path>) -> Result<PathBuf> {
    let folder = folder.as_ref();
    fs::create_dir_all(folder)?;
    Ok(folder.join(file_name))
}
