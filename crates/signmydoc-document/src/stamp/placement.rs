// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Where the signatures go. Offsets are pixel positions of the signature's
// top-left corner on the first page rendered at 200 DPI.

use signmydoc_core::DeclarationCategory;

/// Which of the two signature images a placement refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAsset {
    Primary,
    Secondary,
}

/// One signature pasted at one position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignaturePlacement {
    pub asset: SignatureAsset,
    /// Edge length of the square the image is resized to.
    pub size_px: u32,
    pub x: i64,
    pub y: i64,
}

/// Sizes and offsets for both signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementTable {
    pub primary_size_px: u32,
    pub primary_offset: (i64, i64),
    pub secondary_size_px: u32,
}

impl Default for PlacementTable {
    fn default() -> Self {
        Self {
            primary_size_px: 600,
            primary_offset: (350, 1320),
            secondary_size_px: 650,
        }
    }
}

impl PlacementTable {
    /// Position of the secondary signature for `category`. Unrecognised
    /// declarations get none.
    pub fn secondary_offset(&self, category: DeclarationCategory) -> Option<(i64, i64)> {
        match category {
            DeclarationCategory::Foreigner => Some((-30, 1820)),
            DeclarationCategory::Company => Some((-30, 900)),
            DeclarationCategory::Israeli => Some((-30, 1650)),
            DeclarationCategory::Unrecognized => None,
        }
    }

    /// Placements for `category`, primary first.
    pub fn placements(&self, category: DeclarationCategory) -> Vec<SignaturePlacement> {
        let (x, y) = self.primary_offset;
        let mut placements = vec![SignaturePlacement {
            asset: SignatureAsset::Primary,
            size_px: self.primary_size_px,
            x,
            y,
        }];
        if let Some((x, y)) = self.secondary_offset(category) {
            placements.push(SignaturePlacement {
                asset: SignatureAsset::Secondary,
                size_px: self.secondary_size_px,
                x,
                y,
            });
        }
        placements
    }
}
