// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for SignMyDoc.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for every stage of the signing pipeline.
#[derive(Debug, Error)]
pub enum SignError {
    // -- Input errors --
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // -- Resource errors --
    #[error("signature asset not found: {}", path.display())]
    AssetNotFound { path: PathBuf },

    #[error("font registration failed: {0}")]
    FontRegistration(String),

    // -- Document errors --
    #[error("document has no pages")]
    EmptyDocument,

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("rasterisation failed: {0}")]
    Rasterization(String),

    // -- Filesystem / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The four failure classes a caller has to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A request field is missing or malformed.
    InputValidation,
    /// A font, signature asset, or external tool is missing.
    ResourceNotFound,
    /// A PDF or image could not be read, transformed, or rasterised.
    DocumentProcessing,
    /// Reading or writing a file failed.
    Filesystem,
}

impl SignError {
    /// Classify this error for presentation.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InputValidation,
            Self::AssetNotFound { .. } | Self::FontRegistration(_) => ErrorKind::ResourceNotFound,
            Self::EmptyDocument
            | Self::PdfError(_)
            | Self::ImageError(_)
            | Self::Rasterization(_) => ErrorKind::DocumentProcessing,
            Self::Io(err) if err.kind() == std::io::ErrorKind::NotFound => {
                ErrorKind::ResourceNotFound
            }
            Self::Io(_) | Self::Serialization(_) => ErrorKind::Filesystem,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SignError>;
