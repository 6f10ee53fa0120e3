// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — reading, overlay rendering, merging, size normalisation, and
// writing rasterised pages back to PDF.

pub mod merge;
pub mod normalize;
pub mod overlay;
pub mod reader;
pub mod writer;

pub use merge::merge_overlay;
pub use normalize::normalize_first_page;
pub use overlay::{OverlayRenderer, PlacedLine};
pub use reader::PdfReader;
pub use writer::PdfWriter;
