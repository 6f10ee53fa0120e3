// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page merger — stamps the first page of an overlay PDF on top of the first
// page of a source PDF. The overlay page becomes a Form XObject drawn after the
// source page's own content; every other page is left as it was.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use signmydoc_core::error::{Result, SignError};
use tracing::{debug, info, instrument};

use super::reader::{
    ObjectImporter, first_page_id, inherited_attribute, load_document, media_box, page_content,
    resolve, save_document, wrap_page_contents,
};

const OVERLAY_NAME_PREFIX: &str = "SmdOverlay";

/// Composite page 1 of `overlay` onto page 1 of `source`, returning the merged
/// document.
#[instrument(skip_all, fields(source_len = source.len(), overlay_len = overlay.len()))]
pub fn merge_overlay(source: &[u8], overlay: &[u8]) -> Result<Vec<u8>> {
    let mut base = load_document(source)?;
    let overlay_doc = load_document(overlay)?;

    let target_page = first_page_id(&base)?;
    let overlay_page = first_page_id(&overlay_doc)
        .map_err(|_| SignError::PdfError("overlay document has no pages".into()))?;

    info!(
        source_pages = base.get_pages().len(),
        "Merging overlay onto first page"
    );

    let form_id = import_page_as_form(&overlay_doc, overlay_page, &mut base)?;
    let name = attach_xobject(&mut base, target_page, form_id)?;

    let prefix = b"q\n".to_vec();
    let suffix = format!("\nQ\nq\n/{} Do\nQ\n", name).into_bytes();
    wrap_page_contents(&mut base, target_page, prefix, suffix)?;

    let output = save_document(&mut base)?;
    debug!(output_bytes = output.len(), xobject = %name, "Merge complete");
    Ok(output)
}

/// Copy a page of `source` into `target` as a Form XObject and return its ID.
fn import_page_as_form(
    source: &Document,
    page_id: ObjectId,
    target: &mut Document,
) -> Result<ObjectId> {
    let [x0, y0, x1, y1] = media_box(source, page_id)?;
    let content = page_content(source, page_id)?;

    let mut importer = ObjectImporter::new(source);
    let resources = match inherited_attribute(source, page_id, b"Resources") {
        Some(resources) => importer.import(target, resources),
        None => Object::Dictionary(Dictionary::new()),
    };

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Form".to_vec()));
    dict.set(
        "BBox",
        Object::Array(vec![
            Object::Real(x0),
            Object::Real(y0),
            Object::Real(x1),
            Object::Real(y1),
        ]),
    );
    dict.set("Resources", resources);

    debug!(content_len = content.len(), "Overlay page converted to form");
    Ok(target.add_object(Stream::new(dict, content)))
}

/// Register `form_id` in the page's /XObject resources under a name not yet
/// used there. Inherited resources are copied onto the page first.
fn attach_xobject(document: &mut Document, page_id: ObjectId, form_id: ObjectId) -> Result<String> {
    let mut resources = match inherited_attribute(document, page_id, b"Resources") {
        Some(Object::Dictionary(dict)) => dict.clone(),
        _ => Dictionary::new(),
    };
    let mut xobjects = match resources.get(b"XObject").map(|obj| resolve(document, obj)) {
        Ok(Ok(Object::Dictionary(dict))) => dict.clone(),
        _ => Dictionary::new(),
    };

    let name = (0u32..)
        .map(|index| format!("{}{}", OVERLAY_NAME_PREFIX, index))
        .find(|candidate| !xobjects.has(candidate.as_bytes()))
        .unwrap_or_else(|| OVERLAY_NAME_PREFIX.to_string());

    xobjects.set(name.clone(), Object::Reference(form_id));
    resources.set("XObject", Object::Dictionary(xobjects));

    match document.get_object_mut(page_id) {
        Ok(Object::Dictionary(page)) => {
            page.set("Resources", Object::Dictionary(resources));
            Ok(name)
        }
        _ => Err(SignError::PdfError(format!(
            "page {:?} is not a dictionary",
            page_id
        ))),
    }
}
