// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// signmydoc-document — Document processing for SignMyDoc.
//
// Composes the Hebrew declaration text, renders it to an overlay PDF, merges it
// onto the source declaration, stamps the signature images, and normalises the
// first page to A4.

pub mod detect;
pub mod image;
pub mod pdf;
pub mod pipeline;
pub mod stamp;
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the primary entry points so callers can use `signmydoc_document::SigningPipeline` etc.
pub use detect::{classify_text, detect_category};
pub use image::ImageProcessor;
pub use pdf::{OverlayRenderer, PdfReader, PdfWriter};
pub use pipeline::{SigningPipeline, produce_signed_document};
pub use stamp::{PdftoppmRasterizer, Rasterizer, SignatureAssets, SignatureStamper};
