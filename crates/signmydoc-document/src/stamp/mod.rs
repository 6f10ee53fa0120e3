// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stamp module — rasterise, paste signatures, re-encode.

pub mod placement;
pub mod rasterize;
pub mod stamper;

pub use placement::{PlacementTable, SignatureAsset, SignaturePlacement};
pub use rasterize::{PdftoppmRasterizer, Rasterizer};
pub use stamper::{SignatureAssets, SignatureStamper};
