// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signer configuration: asset paths, rasteriser binary, font, and the notary
// details embedded in the declaration. Environment variables override the
// filesystem-relative defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Directory holding the two signature images.
pub const ENV_SIGNATURES_DIR: &str = "SIGNATURES_DIR";
/// Directory holding the poppler binaries (`pdftoppm`).
pub const ENV_POPPLER_PATH: &str = "POPPLER_PATH";
/// TrueType font used for the declaration text.
pub const ENV_FONT: &str = "SIGNMYDOC_FONT";

const DEFAULT_POPPLER_PATH: &str = "poppler-23.05.0/Library/bin";
const DEFAULT_FONT: &str = "Arial.ttf";
const PRIMARY_SIGNATURE_FILE: &str = "placeholder_signature_1.png";
const SECONDARY_SIGNATURE_FILE: &str = "placeholder_signature_2.png";

/// Name of the signed output file written into the output directory.
pub const OUTPUT_FILE_NAME: &str = "final_output_with_signature.pdf";

/// The attorney certifying the declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotaryDetails {
    /// Line naming the attorney and the office address.
    pub office_line: String,
    /// Closing line with the attorney's name and licence number.
    pub licence_line: String,
}

impl Default for NotaryDetails {
    fn default() -> Self {
        Self {
            office_line: "עו\"ד מירי רז במשרדי שברחוב השרון 1 קריית שדה התעופה".into(),
            licence_line: "מירי רז יוקל מ.ר 23145".into(),
        }
    }
}

/// Resolved configuration for one signing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerConfig {
    /// Signature pasted at a fixed position on every declaration.
    pub primary_signature: PathBuf,
    /// Signature whose position depends on the declaration category.
    pub secondary_signature: PathBuf,
    /// `pdftoppm` executable (or bare name, resolved through `PATH`).
    pub rasterizer_binary: PathBuf,
    /// TrueType font with Hebrew glyphs.
    pub font_path: PathBuf,
    /// Rasterisation density. Signature coordinates are in pixels at this DPI.
    pub raster_dpi: u32,
    pub notary: NotaryDetails,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl SignerConfig {
    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let signatures_dir = lookup(ENV_SIGNATURES_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| local_dir().join("signatures"));
        let poppler_dir = lookup(ENV_POPPLER_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_POPPLER_PATH));
        let font_path = lookup(ENV_FONT)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FONT));

        let config = Self {
            primary_signature: signatures_dir.join(PRIMARY_SIGNATURE_FILE),
            secondary_signature: signatures_dir.join(SECONDARY_SIGNATURE_FILE),
            rasterizer_binary: resolve_pdftoppm(&poppler_dir),
            font_path,
            raster_dpi: 200,
            notary: NotaryDetails::default(),
        };
        debug!(?config, "signer configuration resolved");
        config
    }

    /// Where the signed document for `output_directory` is written.
    pub fn output_path(output_directory: &Path) -> PathBuf {
        output_directory.join(OUTPUT_FILE_NAME)
    }
}

/// Directory of the running executable, or the working directory.
fn local_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Prefer `pdftoppm` inside the poppler directory; fall back to `PATH`.
fn resolve_pdftoppm(poppler_dir: &Path) -> PathBuf {
    let name = if cfg!(windows) { "pdftoppm.exe" } else { "pdftoppm" };
    let candidate = poppler_dir.join(name);
    if candidate.is_file() {
        candidate
    } else {
        PathBuf::from(name)
    }
}
