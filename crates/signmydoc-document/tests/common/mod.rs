// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};

use signmydoc_core::SignerConfig;
use signmydoc_core::error::Result;
use signmydoc_document::{PdfReader, Rasterizer};

/// Renders a white 200 DPI letter page for every page of the input.
pub struct WhitePages;

impl Rasterizer for WhitePages {
    fn rasterize(&self, pdf: &[u8], dpi: u32) -> Result<Vec<RgbaImage>> {
        let pages = PdfReader::from_bytes(pdf)?.page_count();
        let (w, h) = (dpi * 17 / 2, dpi * 11);
        Ok(vec![
            RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]));
            pages
        ])
    }
}

/// The Hebrew-capable font shipped under `tests/fixtures`.
pub fn font_path() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSans.ttf"))
}

/// Write two synthetic signature images into `dir` and return their paths.
pub fn write_signatures(dir: &Path) -> (PathBuf, PathBuf) {
    let primary = dir.join("placeholder_signature_1.png");
    let secondary = dir.join("placeholder_signature_2.png");

    let mut ink = RgbaImage::from_pixel(120, 60, Rgba([0, 0, 0, 0]));
    draw_filled_rect_mut(&mut ink, Rect::at(10, 20).of_size(100, 8), Rgba([20, 20, 140, 255]));
    ink.save(&primary).unwrap();

    let mut stamp = RgbaImage::from_pixel(80, 80, Rgba([0, 0, 0, 0]));
    draw_filled_rect_mut(&mut stamp, Rect::at(5, 5).of_size(70, 70), Rgba([160, 0, 0, 200]));
    stamp.save(&secondary).unwrap();

    (primary, secondary)
}

/// Configuration pointing at fixtures under `dir`.
pub fn config_in(dir: &Path, font: PathBuf) -> SignerConfig {
    let (primary_signature, secondary_signature) = write_signatures(dir);
    SignerConfig {
        primary_signature,
        secondary_signature,
        font_path: font,
        ..SignerConfig::default()
    }
}

/// A `pages`-page PDF of the given size where every page shows `text` in
/// Helvetica.
pub fn source_pdf(pages: u32, width: f32, height: f32, text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for _ in 0..pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(18)]),
                Operation::new("Td", vec![Object::Integer(72), Object::Integer(700)]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width),
                Object::Real(height),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(i64::from(pages)),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
