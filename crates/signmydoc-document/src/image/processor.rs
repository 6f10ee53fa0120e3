// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — load signature assets, resize them, and paste them onto
// rasterised pages through their own alpha channel. Operates on in-memory
// images using the `image` crate.

use std::path::Path;

use image::{DynamicImage, RgbaImage, imageops};
use signmydoc_core::error::{Result, SignError};
use tracing::{debug, info, instrument};

/// A single in-memory image.
///
/// Transformations consume `self` and return a new `ImageProcessor`, enabling
/// method chaining.
///
/// ```ignore
/// let stamp = ImageProcessor::open("signatures/placeholder_signature_1.png")?
///     .resize_exact(600, 600);
/// stamp.paste_onto(&mut page, 350, 1320);
/// ```
#[derive(Clone)]
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path. A missing file is reported as
    /// [`SignError::AssetNotFound`].
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SignError::AssetNotFound {
                path: path.to_path_buf(),
            });
        }
        let img = image::open(path).map_err(|err| {
            SignError::ImageError(format!("failed to open {}: {}", path.display(), err))
        })?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    // -- Transformations ------------------------------------------------------

    /// Resize the image to exactly `width` x `height`, ignoring aspect ratio.
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        debug!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            width,
            height,
            "Resizing image"
        );
        let resized = self
            .image
            .resize_exact(width, height, imageops::FilterType::CatmullRom);
        Self { image: resized }
    }

    /// Alpha-composite this image onto `canvas` with its top-left corner at
    /// (`x`, `y`). Negative or out-of-bounds offsets clip.
    pub fn paste_onto(&self, canvas: &mut RgbaImage, x: i64, y: i64) {
        let overlay = self.image.to_rgba8();
        imageops::overlay(canvas, &overlay, x, y);
    }
}
