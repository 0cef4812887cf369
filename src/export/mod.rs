//! Text-to-PDF export.
//!
//! [`layout`] computes where every line goes; this module feeds the result
//! to printpdf. Devanagari output needs an embedded TTF (Noto Sans
//! Devanagari works well) supplied through [`FontSource::File`]; the builtin
//! Helvetica fallback covers Latin-only text. When an external font is used,
//! the same face serves both the regular and the bold role — exactly one
//! font travels with the document.
//!
//! Export never touches the session's extraction result: a failed export is
//! independently retryable.

pub mod layout;

use crate::error::ExportError;
use layout::{ApproxMeasure, FaceMeasure, LaidOutPage, PageMetrics, TextMeasure};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the export font comes from.
#[derive(Debug, Clone, Default)]
pub enum FontSource {
    /// Builtin Helvetica. No Devanagari coverage.
    #[default]
    Builtin,
    /// A TTF file embedded into the document.
    File(PathBuf),
}

/// Export parameters.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub font: FontSource,
    pub metrics: PageMetrics,
}

/// Derive the export file name: the input name with a case-insensitive
/// `.pdf` suffix stripped and `-extracted.pdf` appended.
pub fn export_file_name(input_name: &str) -> String {
    let stem = input_name
        .len()
        .checked_sub(4)
        .filter(|&i| input_name.is_char_boundary(i))
        .map(|i| input_name.split_at(i))
        .filter(|(_, ext)| ext.eq_ignore_ascii_case(".pdf"))
        .map(|(stem, _)| stem)
        .unwrap_or(input_name);
    format!("{stem}-extracted.pdf")
}

/// Write the extracted text to `out_path` as a paginated A4 document.
pub fn export_to_pdf(
    text: &str,
    out_path: &Path,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let metrics = &options.metrics;

    // Load and validate the external font before creating any output.
    let font_bytes: Option<Vec<u8>> = match &options.font {
        FontSource::Builtin => None,
        FontSource::File(path) => {
            let bytes = std::fs::read(path).map_err(|e| ExportError::FontLoadFailed {
                path: path.clone(),
                detail: e.to_string(),
            })?;
            Some(bytes)
        }
    };

    let face_measure = font_bytes
        .as_deref()
        .map(|bytes| {
            FaceMeasure::new(bytes).map_err(|e| ExportError::FontLoadFailed {
                path: match &options.font {
                    FontSource::File(p) => p.clone(),
                    FontSource::Builtin => PathBuf::new(),
                },
                detail: e.to_string(),
            })
        })
        .transpose()?;

    let measure: &dyn TextMeasure = match &face_measure {
        Some(m) => m,
        None => &ApproxMeasure,
    };

    let pages = layout::layout(text, metrics, measure);
    write_document(&pages, font_bytes.as_deref(), metrics, out_path)?;

    info!(
        "Exported {} page(s) to {}",
        pages.len(),
        out_path.display()
    );
    Ok(())
}

fn write_document(
    pages: &[LaidOutPage],
    font_bytes: Option<&[u8]>,
    metrics: &PageMetrics,
    out_path: &Path,
) -> Result<(), ExportError> {
    let gen_err = |e: printpdf::Error| ExportError::Generation {
        detail: e.to_string(),
    };

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Extracted Text",
        Mm(metrics.width_mm.into()),
        Mm(metrics.height_mm.into()),
        "Layer 1",
    );

    // External fonts serve both roles; the builtin pair mirrors the
    // regular/bold split.
    let (regular, bold): (IndirectFontRef, IndirectFontRef) = match font_bytes {
        Some(bytes) => {
            let font = doc.add_external_font(Cursor::new(bytes)).map_err(gen_err)?;
            (font.clone(), font)
        }
        None => (
            doc.add_builtin_font(BuiltinFont::Helvetica).map_err(gen_err)?,
            doc.add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(gen_err)?,
        ),
    };

    for (i, page) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (p, l) = doc.add_page(
                Mm(metrics.width_mm.into()),
                Mm(metrics.height_mm.into()),
                "Layer 1",
            );
            doc.get_page(p).get_layer(l)
        };

        for line in &page.lines {
            let font = if line.bold { &bold } else { &regular };
            // printpdf's origin is the bottom-left corner; layout measures
            // from the top.
            layer.use_text(
                line.text.clone(),
                metrics.font_size_pt.into(),
                Mm(metrics.margin_mm.into()),
                Mm((metrics.height_mm - line.y_mm).into()),
                font,
            );
        }
    }

    let file = File::create(out_path).map_err(|e| ExportError::WriteFailed {
        path: out_path.to_path_buf(),
        source: e,
    })?;
    doc.save(&mut BufWriter::new(file)).map_err(gen_err)?;
    Ok(())
}
