// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Category detection — guesses the declaration category from the text of the
// source document.

use std::path::Path;

use signmydoc_core::DeclarationCategory;
use signmydoc_core::error::Result;
use tracing::{debug, info, instrument};

use crate::pdf::PdfReader;

/// Heading that only appears on company declarations.
pub const COMPANY_MARKER: &str = "פרטי החברה השוכרת";
/// Word that marks a foreign-resident declaration.
pub const FOREIGNER_MARKER: &str = "זר";

/// Category implied by one page of text, if any. The company marker wins
/// over the foreigner marker.
pub fn classify_text(text: &str) -> Option<DeclarationCategory> {
    if text.contains(COMPANY_MARKER) {
        Some(DeclarationCategory::Company)
    } else if text.contains(FOREIGNER_MARKER) {
        Some(DeclarationCategory::Foreigner)
    } else {
        None
    }
}

/// Detect the category of the PDF at `path`.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn detect_category(path: impl AsRef<Path>) -> Result<DeclarationCategory> {
    let reader = PdfReader::open(path)?;
    Ok(detect_category_in(&reader))
}

/// Scan pages in order; the first page carrying a marker decides. Without any
/// marker the document is treated as an Israeli declaration.
pub fn detect_category_in(reader: &PdfReader) -> DeclarationCategory {
    let category = reader
        .pages_text()
        .iter()
        .enumerate()
        .find_map(|(index, text)| {
            let found = classify_text(text);
            if let Some(category) = found {
                debug!(page = index + 1, %category, "Marker found");
            }
            found
        })
        .unwrap_or(DeclarationCategory::Israeli);
    info!(%category, "Declaration category detected");
    category
}
