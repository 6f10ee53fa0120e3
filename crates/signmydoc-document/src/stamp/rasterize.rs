// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rasteriser — turns PDF bytes into one RGBA image per page. The production
// implementation shells out to poppler's `pdftoppm`.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::RgbaImage;
use signmydoc_core::error::{Result, SignError};
use tracing::{debug, info, instrument};

/// File-name prefix handed to `pdftoppm`; pages come back as `page-N.png`.
const PAGE_PREFIX: &str = "page";

/// Renders every page of a PDF to a bitmap at a fixed density.
pub trait Rasterizer {
    /// Render `pdf` at `dpi`, returning the pages in document order.
    fn rasterize(&self, pdf: &[u8], dpi: u32) -> Result<Vec<RgbaImage>>;
}

/// [`Rasterizer`] backed by the poppler `pdftoppm` executable.
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    binary: PathBuf,
}

impl PdftoppmRasterizer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Rasterizer for PdftoppmRasterizer {
    #[instrument(skip(self, pdf), fields(binary = %self.binary.display(), pdf_len = pdf.len()))]
    fn rasterize(&self, pdf: &[u8], dpi: u32) -> Result<Vec<RgbaImage>> {
        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("merged.pdf");
        std::fs::write(&input, pdf)?;
        let prefix = workdir.path().join(PAGE_PREFIX);

        info!(dpi, "Rasterising document");
        let output = Command::new(&self.binary)
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-png")
            .arg(&input)
            .arg(&prefix)
            .output()
            .map_err(|err| {
                SignError::Rasterization(format!(
                    "cannot run {}: {}",
                    self.binary.display(),
                    err
                ))
            })?;

        if !output.status.success() {
            return Err(SignError::Rasterization(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let pages = collect_pages(workdir.path())?;
        debug!(pages = pages.len(), "Rasterisation complete");
        Ok(pages)
    }
}

/// Page number encoded in a `pdftoppm` output name such as `page-07.png`.
fn page_number(path: &Path) -> Option<u32> {
    if path.extension()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix(PAGE_PREFIX)?
        .strip_prefix('-')?
        .parse()
        .ok()
}

/// Decode the rendered pages in `dir`, ordered by page number.
fn collect_pages(dir: &Path) -> Result<Vec<RgbaImage>> {
    let mut numbered: Vec<(u32, PathBuf)> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter_map(|path| page_number(&path).map(|number| (number, path)))
        .collect();
    numbered.sort_by_key(|(number, _)| *number);

    if numbered.is_empty() {
        return Err(SignError::Rasterization(
            "rasteriser produced no pages".into(),
        ));
    }

    numbered
        .into_iter()
        .map(|(number, path)| {
            image::open(&path).map(|page| page.to_rgba8()).map_err(|err| {
                SignError::Rasterization(format!("cannot decode page {}: {}", number, err))
            })
        })
        .collect()
}
