// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixtures shared by the unit tests of this crate.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};

/// Hebrew-capable TrueType font bundled for layout tests.
pub(crate) const TEST_FONT: &[u8] = include_bytes!("../tests/fixtures/DejaVuSans.ttf");

/// A `pages`-page document where page N shows the text `Page N`.
pub(crate) fn sample_pdf(pages: u32, width: f32, height: f32) -> Vec<u8> {
    build_pdf(pages, width, height, |number| format!("Page {}", number))
}

/// A `pages`-page document where every page shows `text`.
pub(crate) fn sample_pdf_with_text(pages: u32, width: f32, height: f32, text: &str) -> Vec<u8> {
    build_pdf(pages, width, height, |_| text.to_string())
}

fn build_pdf(pages: u32, width: f32, height: f32, text_for: impl Fn(u32) -> String) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for number in 1..=pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(24)]),
                Operation::new("Td", vec![Object::Integer(100), Object::Integer(600)]),
                Operation::new("Tj", vec![Object::string_literal(text_for(number))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            content.encode().expect("fixture content encodes"),
        ));

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
    doc.save_to(&mut bytes).expect("fixture document saves");
    bytes
}

/// Owned copy of [`TEST_FONT`].
pub(crate) fn test_font() -> Vec<u8> {
    TEST_FONT.to_vec()
}
