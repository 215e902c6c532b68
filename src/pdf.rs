//! PDF access through PDFium.
//!
//! The PDFium shared library is looked up next to the executable, in the
//! working directory and under `./pdfium`, then in the system library path.
//! It is bound once per process.

use crate::cache::page_image_path;
use anyhow::{Context, Result, anyhow};
use image::RgbaImage;
use once_cell::sync::OnceCell;
use pdfium_render::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

static PDFIUM: OnceCell<Pdfium> = OnceCell::new();

const POINTS_PER_INCH: f32 = 72.0;
/// Upper bound for either side of a rendered page, in pixels.
const MAX_RENDER_SIDE: u32 = 8000;

fn pdfium() -> Result<&'static Pdfium> {
    PDFIUM.get_or_try_init(|| {
        let mut candidates = Vec::new();
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(dir);
        }
        candidates.push(PathBuf::from("./"));
        candidates.push(PathBuf::from("./pdfium"));

        for dir in &candidates {
            if let Ok(bindings) =
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            {
                info!(dir = %dir.display(), "Bound PDFium library");
                return Ok(Pdfium::new(bindings));
            }
        }
        let bindings = Pdfium::bind_to_system_library()
            .map_err(|err| anyhow!("PDFium library not found: {err}"))?;
        info!("Bound system PDFium library");
        Ok(Pdfium::new(bindings))
    })
}

fn open(pdf: &Path) -> Result<PdfDocument<'static>> {
    if !pdf.is_file() {
        anyhow::bail!("PDF not found: {}", pdf.display());
    }
    pdfium()?
        .load_pdf_from_file(pdf, None)
        .map_err(|err| anyhow!("Failed to open {}: {err}", pdf.display()))
}

fn page_at<'a>(document: &'a PdfDocument<'static>, page: usize) -> Result<PdfPage<'a>> {
    let index = PdfPageIndex::try_from(page).map_err(|_| anyhow!("page {page} out of range"))?;
    document
        .pages()
        .get(index)
        .map_err(|err| anyhow!("Failed to load page {}: {err}", page + 1))
}

/// Number of pages in the document.
pub fn page_count(pdf: &Path) -> Result<usize> {
    let document = open(pdf)?;
    let count = document.pages().len() as usize;
    debug!(pdf = %pdf.display(), count, "Counted pages");
    Ok(count)
}

/// Rasterize zero-based `page` to PNG, reusing a cached render when present.
pub fn render_page(pdf: &Path, page: usize, dpi: u32, cache_dir: &Path) -> Result<PathBuf> {
    let target = page_image_path(cache_dir, pdf, page, dpi);
    if target.exists() {
        debug!(path = %target.display(), "Using cached page render");
        return Ok(target);
    }
    let parent = target
        .parent()
        .ok_or_else(|| anyhow!("render path has no parent: {}", target.display()))?;
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create render dir {}", parent.display()))?;

    let document = open(pdf)?;
    let pdf_page = page_at(&document, page)?;
    let (width, height) = pixel_size(pdf_page.width().value, pdf_page.height().value, dpi);
    let config = PdfRenderConfig::new()
        .set_target_width(width as i32)
        .set_target_height(height as i32);
    let image = rasterize(&pdf_page, &config, page)?;
    image
        .save(&target)
        .with_context(|| format!("Failed to write page image {}", target.display()))?;
    info!(page = page + 1, dpi, path = %target.display(), "Rendered page");
    Ok(target)
}

/// Plain text of zero-based `page`.
pub fn page_text(pdf: &Path, page: usize) -> Result<String> {
    let document = open(pdf)?;
    let text = page_at(&document, page)?
        .text()
        .map_err(|err| anyhow!("Failed to read text of page {}: {err}", page + 1))?
        .all();
    debug!(page = page + 1, chars = text.len(), "Extracted page text");
    Ok(text)
}

/// Render the first page to fit a `size`×`size` box and write it to `dest`.
pub fn render_thumbnail(pdf: &Path, dest: &Path, size: u32) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create thumbnail dir {}", parent.display()))?;
    }
    let document = open(pdf)?;
    let first = page_at(&document, 0)?;
    let side = size.max(1) as i32;
    let config = PdfRenderConfig::new()
        .set_target_width(side)
        .set_maximum_height(side);
    let image = rasterize(&first, &config, 0)?;
    image
        .save(dest)
        .with_context(|| format!("Failed to write thumbnail {}", dest.display()))?;
    info!(pdf = %pdf.display(), thumbnail = %dest.display(), "Created thumbnail");
    Ok(())
}

fn rasterize(page: &PdfPage<'_>, config: &PdfRenderConfig, index: usize) -> Result<RgbaImage> {
    let bitmap = page
        .render_with_config(config)
        .map_err(|err| anyhow!("Failed to render page {}: {err}", index + 1))?;
    let width = bitmap.width() as u32;
    let height = bitmap.height() as u32;
    RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes())
        .ok_or_else(|| anyhow!("Rendered bitmap for page {} has a bad size", index + 1))
}

/// Pixel size of a page measured in points, rendered at `dpi`.
fn pixel_size(width_pts: f32, height_pts: f32, dpi: u32) -> (u32, u32) {
    let scale = dpi as f32 / POINTS_PER_INCH;
    let side = |pts: f32| {
        let px = (pts.max(0.0) * scale).round();
        if px.is_finite() {
            (px as u32).clamp(1, MAX_RENDER_SIDE)
        } else {
            1
        }
    };
    (side(width_pts), side(height_pts))
}
