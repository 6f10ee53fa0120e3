// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signing pipeline — compose, render, merge, stamp, normalise, write.
//
// Stages hand each other PDF bytes in memory; only the source document and the
// final output touch the filesystem (plus the rasteriser's scratch directory).

use std::path::{Path, PathBuf};

use signmydoc_core::error::Result;
use signmydoc_core::{DeclarationRequest, PageSize, SignerConfig};
use tracing::{info, instrument};

use crate::pdf::{OverlayRenderer, merge_overlay, normalize_first_page};
use crate::stamp::{PdftoppmRasterizer, Rasterizer, SignatureAssets, SignatureStamper};
use crate::text::{compose_declaration, reverse_identifier};

/// Page size every signed declaration ends up with.
pub const TARGET_PAGE_SIZE: PageSize = PageSize::A4;

/// Loaded resources for signing declarations.
pub struct SigningPipeline {
    config: SignerConfig,
    renderer: OverlayRenderer,
    stamper: SignatureStamper,
}

impl SigningPipeline {
    /// Load the font and signature assets named by `config` and rasterise with
    /// `pdftoppm`.
    pub fn from_config(config: SignerConfig) -> Result<Self> {
        let rasterizer = PdftoppmRasterizer::new(&config.rasterizer_binary);
        Self::with_rasterizer(config, Box::new(rasterizer))
    }

    /// Like [`SigningPipeline::from_config`] with a caller-supplied rasteriser.
    pub fn with_rasterizer(config: SignerConfig, rasterizer: Box<dyn Rasterizer>) -> Result<Self> {
        let assets = SignatureAssets::load(&config.primary_signature, &config.secondary_signature)?;
        let renderer = OverlayRenderer::load(&config.font_path)?;
        let stamper = SignatureStamper::new(rasterizer, assets, config.raster_dpi);
        Ok(Self {
            config,
            renderer,
            stamper,
        })
    }

    /// Produce the signed declaration for `request` and return its path.
    pub fn run(&self, request: &DeclarationRequest) -> Result<PathBuf> {
        request.validate()?;
        self.sign(request)
    }

    /// Every stage after validation.
    #[instrument(skip_all, fields(
        source = %request.source_document_path.display(),
        category = %request.category,
        gender = %request.gender,
    ))]
    fn sign(&self, request: &DeclarationRequest) -> Result<PathBuf> {
        let date = request.date_string();
        let lines = compose_declaration(
            &date,
            &request.name,
            &reverse_identifier(&request.identifier),
            request.gender,
            &self.config.notary,
        );
        let overlay = self.renderer.render(&lines, &date)?;

        let source = std::fs::read(&request.source_document_path)?;
        let merged = merge_overlay(&source, &overlay)?;

        let output_path = SignerConfig::output_path(&request.output_directory);
        remove_stale_output(&output_path)?;

        let stamped = self.stamper.stamp(&merged, request.category)?;
        let normalized = normalize_first_page(&stamped, TARGET_PAGE_SIZE)?;

        std::fs::create_dir_all(&request.output_directory)?;
        std::fs::write(&output_path, &normalized)?;

        info!(output = %output_path.display(), bytes = normalized.len(), "Signed declaration written");
        Ok(output_path)
    }
}

/// One-shot entry point: load resources from `config` and sign `request`.
/// The request is validated before any asset is loaded.
pub fn produce_signed_document(
    request: &DeclarationRequest,
    config: SignerConfig,
) -> Result<PathBuf> {
    request.validate()?;
    SigningPipeline::from_config(config)?.sign(request)
}

fn remove_stale_output(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "Removed previous output");
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
