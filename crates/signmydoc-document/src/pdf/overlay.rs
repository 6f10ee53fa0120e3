// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Overlay renderer — draws the declaration lines onto a blank letter page using
// `printpdf` 0.8. Glyph advances are measured with `rusttype` so each line can
// be positioned before it is written.

use std::path::Path;

use printpdf::{
    FontId, Mm, Op, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt,
    TextItem,
};
use rusttype::{Font, Scale};
use signmydoc_core::PageSize;
use signmydoc_core::error::{Result, SignError};
use tracing::{debug, info, instrument};

use crate::text::visual_order;

/// Font size of the declaration text.
pub const FONT_SIZE_PT: f32 = 12.0;
/// Distance between consecutive baselines.
pub const LINE_HEIGHT_PT: f32 = 14.0;
/// Baseline of the first line, measured from the page bottom.
pub const FIRST_BASELINE_PT: f32 = 300.0;
/// Lines are centred, then moved this far to the left.
pub const LEFT_SHIFT_PT: f32 = 100.0;

const MM_PER_PT: f32 = 25.4 / 72.0;

/// One declaration line in visual order at its page position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x_pt: f32,
    pub y_pt: f32,
}

/// Renders declaration lines into a single-page overlay PDF.
pub struct OverlayRenderer {
    /// Font as embedded into the PDF.
    pdf_font: ParsedFont,
    /// Same font, used for advance-width measurement.
    metrics: Font<'static>,
    page_size: PageSize,
}

impl OverlayRenderer {
    /// Load and register a TrueType font from disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|err| {
            SignError::FontRegistration(format!("cannot read {}: {}", path.display(), err))
        })?;
        Self::from_bytes(bytes)
    }

    /// Register a TrueType font held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let pdf_font = ParsedFont::from_bytes(&bytes, 0, &mut warnings).ok_or_else(|| {
            SignError::FontRegistration("font data could not be parsed for embedding".into())
        })?;
        let metrics = Font::try_from_vec(bytes).ok_or_else(|| {
            SignError::FontRegistration("font data has no usable glyph metrics".into())
        })?;

        debug!(warnings = warnings.len(), "Font registered");
        Ok(Self {
            pdf_font,
            metrics,
            page_size: PageSize::Letter,
        })
    }

    /// Advance width of `text` in points at `size_pt`.
    pub fn text_width(&self, text: &str, size_pt: f32) -> f32 {
        let units_per_em = f32::from(self.metrics.units_per_em());
        if units_per_em == 0.0 {
            return 0.0;
        }
        // rusttype scales by ascent-to-descent height; convert to an em scale.
        let v = self.metrics.v_metrics_unscaled();
        let scale = Scale::uniform(size_pt * (v.ascent - v.descent) / units_per_em);

        text.chars()
            .map(|c| self.metrics.glyph(c).scaled(scale).h_metrics().advance_width)
            .sum()
    }

    /// Left edge of a visual-order line: centred on the page, shifted left.
    pub fn line_x(&self, visual_line: &str) -> f32 {
        let (page_w, _) = self.page_size.dimensions_pt();
        (page_w - self.text_width(visual_line, FONT_SIZE_PT)) / 2.0 - LEFT_SHIFT_PT
    }

    /// Position every line: visual order with `date` kept readable, centred
    /// minus the left shift, baselines descending from the first one.
    pub fn layout(&self, lines: &[String], date: &str) -> Vec<PlacedLine> {
        lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                let text = visual_order(line, date);
                PlacedLine {
                    x_pt: self.line_x(&text),
                    y_pt: FIRST_BASELINE_PT - index as f32 * LINE_HEIGHT_PT,
                    text,
                }
            })
            .collect()
    }

    /// Render `lines` (logical order) onto one letter page.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub fn render(&self, lines: &[String], date: &str) -> Result<Vec<u8>> {
        let (page_w, page_h) = self.page_size.dimensions_pt();
        info!(page_w, page_h, "Rendering declaration overlay");

        let mut doc = PdfDocument::new("Declaration");
        let font_id = doc.add_font(&self.pdf_font);

        let mut ops: Vec<Op> = Vec::new();
        for placed in self.layout(lines, date) {
            debug!(x_pt = placed.x_pt, y_pt = placed.y_pt, "Placing line");
            push_line(&mut ops, &font_id, placed);
        }

        let page = PdfPage::new(Mm(page_w * MM_PER_PT), Mm(page_h * MM_PER_PT), ops);
        doc.with_pages(vec![page]);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        debug!(
            output_bytes = output.len(),
            warnings = warnings.len(),
            "Overlay rendered"
        );
        Ok(output)
    }
}

fn push_line(ops: &mut Vec<Op>, font: &FontId, placed: PlacedLine) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Pt(placed.x_pt),
            y: Pt(placed.y_pt),
        },
    });
    ops.push(Op::SetFontSize {
        size: Pt(FONT_SIZE_PT),
        font: font.clone(),
    });
    ops.push(Op::WriteText {
        items: vec![TextItem::Text(placed.text)],
        font: font.clone(),
    });
    ops.push(Op::EndTextSection);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::{PdfReader, first_page_id, page_content};
    use crate::test_support::test_font;
    use lopdf::content::Content;

    const DATE: &str = "01-02-2024";

    fn renderer() -> OverlayRenderer {
        OverlayRenderer::from_bytes(test_font()).unwrap()
    }

    fn sample_lines() -> Vec<String> {
        vec![
            format!(" הריני מאשרת כי ביום {DATE} הופיע בפני "),
            "מר אבי ת.ז 987654321 המוכר לי אישית,".to_string(),
            "*".repeat(38),
        ]
    }

    #[test]
    fn garbage_font_is_a_registration_error() {
        let err = OverlayRenderer::from_bytes(b"not a font".to_vec()).err().unwrap();
        assert!(matches!(err, SignError::FontRegistration(_)));
    }

    #[test]
    fn missing_font_file_is_a_registration_error() {
        let err = OverlayRenderer::load("/no/such/dir/Arial.ttf").err().unwrap();
        assert!(matches!(err, SignError::FontRegistration(_)));
    }

    #[test]
    fn width_grows_with_text() {
        let renderer = renderer();

        let short = renderer.text_width("אבי", FONT_SIZE_PT);
        let long = renderer.text_width("אבי אבי", FONT_SIZE_PT);
        assert!(short > 0.0);
        assert!(long > short * 2.0);
        assert_eq!(renderer.text_width("", FONT_SIZE_PT), 0.0);
    }

    #[test]
    fn width_scales_linearly_with_size() {
        let renderer = renderer();

        let at_12 = renderer.text_width("ת.ז 123", 12.0);
        let at_24 = renderer.text_width("ת.ז 123", 24.0);
        assert!((at_24 - 2.0 * at_12).abs() < 0.01);
    }

    #[test]
    fn empty_line_sits_centre_minus_shift() {
        assert_eq!(renderer().line_x(""), 612.0 / 2.0 - LEFT_SHIFT_PT);
    }

    #[test]
    fn layout_reverses_lines_and_keeps_date() {
        let renderer = renderer();
        let lines = sample_lines();
        let placed = renderer.layout(&lines, DATE);

        assert_eq!(placed.len(), lines.len());
        for (line, placed) in lines.iter().zip(&placed) {
            assert_eq!(placed.text, visual_order(line, DATE));
        }
        assert!(placed[0].text.contains(DATE));
        assert!(placed[0].text.ends_with(&" הריני".chars().rev().collect::<String>()));
        assert!(placed[1].text.starts_with(&",תישיא"));
    }

    #[test]
    fn layout_steps_down_fourteen_points_from_300() {
        let renderer = renderer();
        let lines = sample_lines();
        let placed = renderer.layout(&lines, DATE);

        let ys: Vec<f32> = placed.iter().map(|p| p.y_pt).collect();
        assert_eq!(ys, vec![300.0, 286.0, 272.0]);
        for placed in &placed {
            assert_eq!(placed.x_pt, renderer.line_x(&placed.text));
        }
    }

    #[test]
    fn render_moves_cursor_once_per_line() {
        let renderer = renderer();
        let lines = sample_lines();
        let expected = renderer.layout(&lines, DATE);
        let bytes = renderer.render(&lines, DATE).unwrap();

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let content = page_content(&doc, first_page_id(&doc).unwrap()).unwrap();
        let operations = Content::decode(&content).unwrap().operations;

        let moves: Vec<(f32, f32)> = operations
            .iter()
            .filter(|op| op.operator == "Td")
            .map(|op| {
                (
                    op.operands[0].as_float().unwrap(),
                    op.operands[1].as_float().unwrap(),
                )
            })
            .collect();
        assert_eq!(moves.len(), expected.len());
        for ((x, y), placed) in moves.iter().zip(&expected) {
            assert!((x - placed.x_pt).abs() < 0.01, "x {} != {}", x, placed.x_pt);
            assert!((y - placed.y_pt).abs() < 0.01, "y {} != {}", y, placed.y_pt);
        }
        let text_sections = operations.iter().filter(|op| op.operator == "BT").count();
        assert_eq!(text_sections, lines.len());
    }

    #[test]
    fn render_produces_single_letter_page() {
        let bytes = renderer().render(&sample_lines(), DATE).unwrap();

        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.page_count(), 1);
        let (w, h) = reader.first_page_size().unwrap();
        assert!((w - 612.0).abs() < 0.5);
        assert!((h - 792.0).abs() < 0.5);
    }
}
