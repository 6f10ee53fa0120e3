// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — re-encode rasterised page images into a multi-page PDF using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use image::RgbaImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use signmydoc_core::error::{Result, SignError};
use tracing::{debug, info, instrument};

/// Title recorded in the /Info dictionary of signed declarations.
const DOCUMENT_TITLE: &str = "Signed Declaration";

/// Builds PDFs whose pages are full-bleed raster images.
pub struct PdfWriter {
    /// Pixel density of the incoming page images.
    dpi: f32,
}

impl PdfWriter {
    /// Create a writer for images rendered at `dpi`.
    pub fn new(dpi: u32) -> Self {
        Self { dpi: dpi as f32 }
    }

    /// Physical size of a `width` x `height` pixel image, in points.
    pub fn page_size_pt(&self, width: u32, height: u32) -> (f32, f32) {
        (
            width as f32 / self.dpi * 72.0,
            height as f32 / self.dpi * 72.0,
        )
    }

    /// Create one PDF page per image, in order. Each page is exactly the size
    /// of its image at the writer's DPI.
    #[instrument(skip_all, fields(pages = pages.len(), dpi = self.dpi))]
    pub fn create_from_pages(&self, pages: Vec<RgbaImage>) -> Result<Vec<u8>> {
        if pages.is_empty() {
            return Err(SignError::ImageError("no page images to encode".into()));
        }

        info!("Encoding page images as PDF");

        let mut doc = PdfDocument::new(DOCUMENT_TITLE);
        let mut pdf_pages: Vec<PdfPage> = Vec::with_capacity(pages.len());

        for page in pages {
            let (width, height) = page.dimensions();
            let (w_pt, h_pt) = self.page_size_pt(width, height);

            let rgb_image = image::DynamicImage::ImageRgba8(page).to_rgb8();
            let raw = RawImage {
                pixels: RawImageData::U8(rgb_image.into_raw()),
                width: width as usize,
                height: height as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(0.0)),
                    translate_y: Some(Pt(0.0)),
                    scale_x: None,
                    scale_y: None,
                    dpi: Some(self.dpi),
                    rotate: None,
                },
            }];

            debug!(width, height, w_pt, h_pt, "Page image placed");
            pdf_pages.push(PdfPage::new(pt_to_mm(w_pt), pt_to_mm(h_pt), ops));
        }

        doc.with_pages(pdf_pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        debug!(output_bytes = output.len(), "Page images encoded");
        Ok(output)
    }
}

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::PdfReader;

    #[test]
    fn page_size_follows_dpi() {
        let writer = PdfWriter::new(200);
        assert_eq!(writer.page_size_pt(1700, 2200), (612.0, 792.0));
    }

    #[test]
    fn pages_keep_order_and_count() {
        let writer = PdfWriter::new(100);
        let pages = vec![
            RgbaImage::from_pixel(100, 200, image::Rgba([255, 255, 255, 255])),
            RgbaImage::from_pixel(200, 100, image::Rgba([0, 0, 0, 255])),
        ];
        let bytes = writer.create_from_pages(pages).unwrap();

        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.page_count(), 2);
        let (w, h) = reader.first_page_size().unwrap();
        assert!((w - 72.0).abs() < 0.1);
        assert!((h - 144.0).abs() < 0.1);
    }

    #[test]
    fn no_pages_is_an_error() {
        assert!(PdfWriter::new(200).create_from_pages(Vec::new()).is_err());
    }
}
