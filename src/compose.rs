//! Card compositing.
//!
//! A card is the background template with the company logo overlaid
//! east-anchored: flush against the right edge, vertically centered.
//! Output is always JPEG, so the composited canvas is flattened to RGB
//! before writing.

use std::path::{Path, PathBuf};

use image::{imageops, DynamicImage, GenericImageView};
use thiserror::Error;

/// Errors producing a card image.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Failed to load background template {path}: {source}")]
    Background {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to decode logo image: {0}")]
    Logo(image::ImageError),
    #[error("Logo ({logo_width}x{logo_height}) does not fit background ({background_width}x{background_height})")]
    LogoTooLarge {
        logo_width: u32,
        logo_height: u32,
        background_width: u32,
        background_height: u32,
    },
    #[error("Failed to write card image: {0}")]
    Write(image::ImageError),
}

/// Composite `logo_bytes` onto the background template and write the
/// result to `out_path` as JPEG.
pub fn compose_card(
    background_path: &Path,
    logo_bytes: &[u8],
    out_path: &Path,
) -> Result<(), ComposeError> {
    let background = image::open(background_path).map_err(|e| ComposeError::Background {
        path: background_path.to_path_buf(),
        source: e,
    })?;
    let logo = image::load_from_memory(logo_bytes).map_err(ComposeError::Logo)?;

    let (background_width, background_height) = background.dimensions();
    let (logo_width, logo_height) = logo.dimensions();
    if logo_width > background_width || logo_height > background_height {
        return Err(ComposeError::LogoTooLarge {
            logo_width,
            logo_height,
            background_width,
            background_height,
        });
    }

    // East anchor: flush right, centered vertically.
    let x = i64::from(background_width - logo_width);
    let y = i64::from((background_height - logo_height) / 2);

    let mut canvas = background.to_rgba8();
    imageops::overlay(&mut canvas, &logo.to_rgba8(), x, y);

    // JPEG has no alpha channel.
    DynamicImage::ImageRgba8(canvas)
        .to_rgb8()
        .save(out_path)
        .map_err(ComposeError::Write)
}
