// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signature stamper — rasterises a merged declaration, pastes the signature
// images onto page 1, and re-encodes every page into a new PDF.

use std::path::Path;

use image::RgbaImage;
use signmydoc_core::DeclarationCategory;
use signmydoc_core::error::{Result, SignError};
use tracing::{debug, info, instrument};

use super::placement::{PlacementTable, SignatureAsset};
use super::rasterize::Rasterizer;
use crate::image::ImageProcessor;
use crate::pdf::PdfWriter;

/// The two signature images, decoded once per run.
#[derive(Clone)]
pub struct SignatureAssets {
    primary: ImageProcessor,
    secondary: ImageProcessor,
}

impl SignatureAssets {
    /// Load both signatures. A missing file fails with
    /// [`SignError::AssetNotFound`] before anything is rendered.
    pub fn load(primary: impl AsRef<Path>, secondary: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            primary: ImageProcessor::open(primary)?,
            secondary: ImageProcessor::open(secondary)?,
        })
    }

    pub fn from_images(primary: ImageProcessor, secondary: ImageProcessor) -> Self {
        Self { primary, secondary }
    }

    fn get(&self, asset: SignatureAsset) -> &ImageProcessor {
        match asset {
            SignatureAsset::Primary => &self.primary,
            SignatureAsset::Secondary => &self.secondary,
        }
    }
}

pub struct SignatureStamper {
    rasterizer: Box<dyn Rasterizer>,
    assets: SignatureAssets,
    table: PlacementTable,
    dpi: u32,
}

impl SignatureStamper {
    pub fn new(rasterizer: Box<dyn Rasterizer>, assets: SignatureAssets, dpi: u32) -> Self {
        Self {
            rasterizer,
            assets,
            table: PlacementTable::default(),
            dpi,
        }
    }

    /// Stamp the signatures for `category` onto page 1 of `merged` and return
    /// the re-encoded document. All pages are kept, in order.
    #[instrument(skip_all, fields(merged_len = merged.len(), %category))]
    pub fn stamp(&self, merged: &[u8], category: DeclarationCategory) -> Result<Vec<u8>> {
        let mut pages = self.rasterizer.rasterize(merged, self.dpi)?;
        let first = pages.first_mut().ok_or(SignError::EmptyDocument)?;
        self.stamp_page(first, category);

        info!(pages = pages.len(), "Re-encoding stamped pages");
        PdfWriter::new(self.dpi).create_from_pages(pages)
    }

    /// Paste the signatures for `category` onto one rasterised page.
    pub fn stamp_page(&self, page: &mut RgbaImage, category: DeclarationCategory) {
        for placement in self.table.placements(category) {
            let image = self
                .assets
                .get(placement.asset)
                .clone()
                .resize_exact(placement.size_px, placement.size_px);
            image.paste_onto(page, placement.x, placement.y);
            debug!(?placement, "Signature pasted");
        }
    }
}
