// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open and inspect existing PDF documents with `lopdf`, plus the
// low-level object helpers shared by the merge and normalise stages.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use signmydoc_core::error::{Result, SignError};
use tracing::{debug, info, instrument, warn};

/// Page-tree depth limit when walking /Parent links for inherited attributes.
const MAX_INHERIT_DEPTH: usize = 32;

/// Reads existing PDF files.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let data = std::fs::read(path_ref)?;
        let document = Document::load_mem(&data).map_err(|err| {
            SignError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = load_document(data)?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Width and height of the first page in points, from its (possibly
    /// inherited) /MediaBox.
    pub fn first_page_size(&self) -> Result<(f32, f32)> {
        let page_id = first_page_id(&self.document)?;
        let [x0, y0, x1, y1] = media_box(&self.document, page_id)?;
        Ok(((x1 - x0).abs(), (y1 - y0).abs()))
    }

    /// Extract the text of a single page (1-indexed).
    pub fn page_text(&self, page_number: u32) -> Result<String> {
        self.document.extract_text(&[page_number]).map_err(|err| {
            SignError::PdfError(format!("cannot extract text of page {}: {}", page_number, err))
        })
    }

    /// Text of every page in order. Pages whose text cannot be decoded are
    /// logged and yield an empty string.
    pub fn pages_text(&self) -> Vec<String> {
        self.document
            .get_pages()
            .keys()
            .map(|&page_number| {
                self.page_text(page_number).unwrap_or_else(|err| {
                    warn!(page_number, %err, "Skipping page without extractable text");
                    String::new()
                })
            })
            .collect()
    }
}

// -- Shared lopdf helpers -----------------------------------------------------

/// Parse PDF bytes, mapping parser failures into [`SignError::PdfError`].
pub(crate) fn load_document(data: &[u8]) -> Result<Document> {
    Document::load_mem(data)
        .map_err(|err| SignError::PdfError(format!("failed to load PDF: {}", err)))
}

/// Serialise a document to bytes.
pub(crate) fn save_document(document: &mut Document) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    document
        .save_to(&mut output)
        .map_err(|err| SignError::PdfError(format!("failed to serialise PDF: {}", err)))?;
    Ok(output)
}

/// Object ID of the first page, or [`SignError::EmptyDocument`].
pub(crate) fn first_page_id(document: &Document) -> Result<ObjectId> {
    document
        .get_pages()
        .values()
        .next()
        .copied()
        .ok_or(SignError::EmptyDocument)
}

/// Follow a single indirect reference.
pub(crate) fn resolve<'a>(document: &'a Document, object: &'a Object) -> Result<&'a Object> {
    match object {
        Object::Reference(id) => document.get_object(*id).map_err(|err| {
            SignError::PdfError(format!("cannot resolve object {:?}: {}", id, err))
        }),
        other => Ok(other),
    }
}

/// Look up a page attribute, walking up the page tree for inheritable keys
/// such as /Resources and /MediaBox.
pub(crate) fn inherited_attribute<'a>(
    document: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node = document.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_INHERIT_DEPTH {
        if let Ok(value) = node.get(key) {
            return resolve(document, value).ok();
        }
        let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
        node = document.get_dictionary(parent).ok()?;
    }
    None
}

/// The page's /MediaBox as `[x0, y0, x1, y1]`.
pub(crate) fn media_box(document: &Document, page_id: ObjectId) -> Result<[f32; 4]> {
    let array = inherited_attribute(document, page_id, b"MediaBox")
        .and_then(|obj| obj.as_array().ok())
        .ok_or_else(|| SignError::PdfError(format!("page {:?} has no /MediaBox", page_id)))?;

    if array.len() != 4 {
        return Err(SignError::PdfError(format!(
            "malformed /MediaBox with {} entries",
            array.len()
        )));
    }

    let mut rect = [0.0f32; 4];
    for (slot, value) in rect.iter_mut().zip(array) {
        *slot = resolve(document, value)?
            .as_float()
            .map_err(|err| SignError::PdfError(format!("non-numeric /MediaBox entry: {}", err)))?;
    }
    Ok(rect)
}

/// Surround a page's existing content with extra content streams: `prefix`
/// runs before the original operators, `suffix` after them.
pub(crate) fn wrap_page_contents(
    document: &mut Document,
    page_id: ObjectId,
    prefix: Vec<u8>,
    suffix: Vec<u8>,
) -> Result<()> {
    let existing: Vec<Object> = {
        let page = document.get_dictionary(page_id).map_err(|err| {
            SignError::PdfError(format!("cannot read page {:?}: {}", page_id, err))
        })?;
        match page.get(b"Contents") {
            Ok(Object::Array(items)) => items.clone(),
            Ok(Object::Reference(id)) => match document.get_object(*id) {
                Ok(Object::Array(items)) => items.clone(),
                _ => vec![Object::Reference(*id)],
            },
            _ => Vec::new(),
        }
    };

    let prefix_id = document.add_object(Stream::new(Dictionary::new(), prefix));
    let suffix_id = document.add_object(Stream::new(Dictionary::new(), suffix));

    let mut contents = Vec::with_capacity(existing.len() + 2);
    contents.push(Object::Reference(prefix_id));
    contents.extend(existing);
    contents.push(Object::Reference(suffix_id));

    if let Ok(Object::Dictionary(page)) = document.get_object_mut(page_id) {
        page.set("Contents", Object::Array(contents));
        Ok(())
    } else {
        Err(SignError::PdfError(format!("page {:?} is not a dictionary", page_id)))
    }
}

/// Concatenated, decoded content of every content stream on a page. A stream
/// whose /Filter cannot be undone is a [`SignError::PdfError`].
pub(crate) fn page_content(document: &Document, page_id: ObjectId) -> Result<Vec<u8>> {
    let mut content = Vec::new();
    for stream_id in document.get_page_contents(page_id) {
        if let Ok(Object::Stream(stream)) = document.get_object(stream_id) {
            if stream.dict.has(b"Filter") {
                let data = stream.decompressed_content().map_err(|err| {
                    SignError::PdfError(format!(
                        "cannot decode content stream {:?}: {}",
                        stream_id, err
                    ))
                })?;
                content.extend_from_slice(&data);
            } else {
                content.extend_from_slice(&stream.content);
            }
            content.push(b'\n');
        }
    }
    Ok(content)
}

/// Copies objects from one document into another, renumbering references.
///
/// Each source object is copied at most once, so shared resources (a font
/// used by several dictionaries) stay shared in the target.
pub(crate) struct ObjectImporter<'a> {
    source: &'a Document,
    imported: BTreeMap<ObjectId, ObjectId>,
}

impl<'a> ObjectImporter<'a> {
    pub(crate) fn new(source: &'a Document) -> Self {
        Self {
            source,
            imported: BTreeMap::new(),
        }
    }

    /// Deep-copy `object` into `target`. /Parent links are dropped; callers
    /// re-attach imported pages themselves.
    pub(crate) fn import(&mut self, target: &mut Document, object: &Object) -> Object {
        match object {
            Object::Dictionary(dict) => Object::Dictionary(self.import_dictionary(target, dict)),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.import(target, item))
                    .collect(),
            ),
            Object::Reference(id) => match self.import_reference(target, *id) {
                Some(new_id) => Object::Reference(new_id),
                None => Object::Null,
            },
            Object::Stream(stream) => Object::Stream(Stream::new(
                self.import_dictionary(target, &stream.dict),
                stream.content.clone(),
            )),
            other => other.clone(),
        }
    }

    fn import_dictionary(&mut self, target: &mut Document, dict: &Dictionary) -> Dictionary {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            if key == b"Parent" {
                continue;
            }
            copy.set(key.clone(), self.import(target, value));
        }
        copy
    }

    fn import_reference(&mut self, target: &mut Document, id: ObjectId) -> Option<ObjectId> {
        if let Some(existing) = self.imported.get(&id) {
            return Some(*existing);
        }
        let Ok(object) = self.source.get_object(id) else {
            warn!(?id, "Cannot resolve reference, using Null");
            return None;
        };
        // Reserve the ID first so reference cycles terminate.
        let new_id = target.add_object(Object::Null);
        self.imported.insert(id, new_id);
        let copy = self.import(target, object);
        if let Ok(slot) = target.get_object_mut(new_id) {
            *slot = copy;
        }
        Some(new_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_pdf;

    #[test]
    fn page_count_and_size() {
        let reader = PdfReader::from_bytes(&sample_pdf(3, 612.0, 792.0)).unwrap();
        assert_eq!(reader.page_count(), 3);
        assert_eq!(reader.first_page_size().unwrap(), (612.0, 792.0));
    }

    #[test]
    fn garbage_is_a_pdf_error() {
        let err = PdfReader::from_bytes(b"definitely not a pdf").err().unwrap();
        assert!(matches!(err, SignError::PdfError(_)));
    }

    #[test]
    fn open_missing_file_is_io_not_found() {
        let err = PdfReader::open("/no/such/declaration.pdf").err().unwrap();
        assert_eq!(err.kind(), signmydoc_core::ErrorKind::ResourceNotFound);
    }

    #[test]
    fn media_box_is_inherited_from_page_tree() {
        let mut doc = lopdf::Document::load_mem(&sample_pdf(1, 100.0, 200.0)).unwrap();
        let page_id = first_page_id(&doc).unwrap();
        let parent = doc
            .get_dictionary(page_id)
            .unwrap()
            .get(b"Parent")
            .unwrap()
            .as_reference()
            .unwrap();

        if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
            page.remove(b"MediaBox");
        }
        if let Ok(Object::Dictionary(pages)) = doc.get_object_mut(parent) {
            pages.set(
                "MediaBox",
                vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(300),
                    Object::Integer(400),
                ],
            );
        }

        assert_eq!(media_box(&doc, page_id).unwrap(), [0.0, 0.0, 300.0, 400.0]);
    }

    #[test]
    fn wrap_keeps_original_stream_between_new_ones() {
        let mut doc = lopdf::Document::load_mem(&sample_pdf(1, 612.0, 792.0)).unwrap();
        let page_id = first_page_id(&doc).unwrap();

        wrap_page_contents(&mut doc, page_id, b"q".to_vec(), b"Q".to_vec()).unwrap();

        let content = String::from_utf8_lossy(&page_content(&doc, page_id).unwrap()).into_owned();
        let original = content.find("Tj").unwrap();
        assert!(content.trim_start().starts_with('q'));
        assert!(content.trim_end().ends_with('Q'));
        assert!(content.find('q').unwrap() < original);
    }

    #[test]
    fn importer_shares_repeated_references() {
        let source = lopdf::Document::load_mem(&sample_pdf(2, 612.0, 792.0)).unwrap();
        let pages = source.get_pages();
        let mut target = lopdf::Document::with_version("1.5");
        let mut importer = ObjectImporter::new(&source);

        let first = importer.import(&mut target, source.get_object(pages[&1]).unwrap());
        let second = importer.import(&mut target, source.get_object(pages[&2]).unwrap());

        // Both sample pages reference the same font object.
        let font_of = |page: &Object| {
            page.as_dict()
                .unwrap()
                .get(b"Resources")
                .unwrap()
                .as_dict()
                .unwrap()
                .get(b"Font")
                .unwrap()
                .as_dict()
                .unwrap()
                .get(b"F1")
                .unwrap()
                .as_reference()
                .unwrap()
        };
        assert_eq!(font_of(&first), font_of(&second));
        assert!(first.as_dict().unwrap().get(b"Parent").is_err());
    }

    #[test]
    fn undecodable_content_stream_is_a_pdf_error() {
        let mut doc = lopdf::Document::load_mem(&sample_pdf(1, 612.0, 792.0)).unwrap();
        let page_id = first_page_id(&doc).unwrap();
        let stream_id = doc.get_page_contents(page_id)[0];
        if let Ok(Object::Stream(stream)) = doc.get_object_mut(stream_id) {
            stream.dict.set("Filter", Object::Name(b"NoSuchDecode".to_vec()));
        }

        let err = page_content(&doc, page_id).err().unwrap();
        assert!(matches!(err, SignError::PdfError(_)));
    }
}
