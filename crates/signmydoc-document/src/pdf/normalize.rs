// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Size normaliser — rescales the first page of a document to a fixed target
// size. Later pages are kept as they are.

use lopdf::Object;
use signmydoc_core::PageSize;
use signmydoc_core::error::{Result, SignError};
use tracing::{debug, info, instrument};

use super::reader::{first_page_id, load_document, media_box, save_document, wrap_page_contents};

/// Page boxes that would still describe the old geometry after scaling.
const SECONDARY_BOXES: [&[u8]; 4] = [b"CropBox", b"BleedBox", b"TrimBox", b"ArtBox"];

/// Horizontal and vertical factors that map `current` onto `target`.
pub fn scale_factors(current: (f32, f32), target: (f32, f32)) -> (f32, f32) {
    (target.0 / current.0, target.1 / current.1)
}

/// Rescale page 1 of `pdf` to `target`, scaling both axes independently.
#[instrument(skip(pdf), fields(pdf_len = pdf.len()))]
pub fn normalize_first_page(pdf: &[u8], target: PageSize) -> Result<Vec<u8>> {
    let mut doc = load_document(pdf)?;
    let page_id = first_page_id(&doc)?;

    let [x0, y0, x1, y1] = media_box(&doc, page_id)?;
    let current = (x1 - x0, y1 - y0);
    if current.0 <= 0.0 || current.1 <= 0.0 {
        return Err(SignError::PdfError(format!(
            "first page has degenerate size {} x {}",
            current.0, current.1
        )));
    }

    let (target_w, target_h) = target.dimensions_pt();
    let (scale_x, scale_y) = scale_factors(current, (target_w, target_h));
    info!(
        from_w = current.0,
        from_h = current.1,
        target_w,
        target_h,
        scale_x,
        scale_y,
        "Normalising first page"
    );

    // Move the old origin to (0, 0) while scaling.
    let prefix = format!(
        "q\n{} 0 0 {} {} {} cm\n",
        scale_x,
        scale_y,
        (0.0 - x0) * scale_x,
        (0.0 - y0) * scale_y
    )
    .into_bytes();
    wrap_page_contents(&mut doc, page_id, prefix, b"\nQ\n".to_vec())?;

    if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(target_w),
                Object::Real(target_h),
            ]),
        );
        for key in SECONDARY_BOXES {
            page.remove(key);
        }
    }

    let output = save_document(&mut doc)?;
    debug!(output_bytes = output.len(), "Normalisation complete");
    Ok(output)
}
