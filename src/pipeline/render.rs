//! PDF rasterisation: render every page, in order, to a JPEG image part.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async contexts.
//! `tokio::task::spawn_blocking` moves the work onto the blocking thread
//! pool so the Tokio workers never stall during rendering.
//!
//! ## Why sequential?
//!
//! Pages are rendered one at a time, in page order. That bounds memory to a
//! single bitmap and produces the strictly increasing, user-visible progress
//! sequence the UI contract requires. The progress callback is `Send + Sync`,
//! so it is invoked directly from the blocking thread between pages.

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::pipeline::encode;
use crate::wire::ImagePart;
use pdfium_render::prelude::*;
use tracing::{debug, info};

/// Progress percentage for a finished page, interpolated linearly over
/// (10, 80] as a function of page index / page count.
pub fn page_progress(page: usize, total: usize) -> f32 {
    10.0 + 70.0 * page as f32 / total as f32
}

/// Progress message naming the current and total page.
pub fn page_message(page: usize, total: usize) -> String {
    format!("Converting page {page} of {total} to image...")
}

/// Rasterise all pages of a PDF into transport-ready image parts.
///
/// Emits one progress event per page through the configured callback.
/// Any failure — unreadable document, page render error, encode error —
/// aborts the whole job; no partial results are kept.
pub async fn rasterize(
    bytes: Vec<u8>,
    config: &ExtractionConfig,
) -> Result<Vec<ImagePart>, ExtractError> {
    let config = config.clone();

    tokio::task::spawn_blocking(move || rasterize_blocking(&bytes, &config))
        .await
        .map_err(|e| ExtractError::Internal(format!("Render task panicked: {e}")))?
}

/// Blocking implementation of page rendering.
fn rasterize_blocking(
    bytes: &[u8],
    config: &ExtractionConfig,
) -> Result<Vec<ImagePart>, ExtractError> {
    let pdfium = bind_pdfium()?;

    let document = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| ExtractError::UnreadablePdf {
            detail: format!("{e:?}"),
        })?;

    let pages = document.pages();
    let total = pages.len() as usize;
    info!("PDF loaded: {} pages", total);

    let render_config = PdfRenderConfig::new().scale_page_by_factor(config.zoom);

    let mut parts = Vec::with_capacity(total);

    for (idx, page) in pages.iter().enumerate() {
        let page_num = idx + 1;

        let bitmap =
            page.render_with_config(&render_config)
                .map_err(|e| ExtractError::RenderFailed {
                    page: page_num,
                    detail: format!("{e:?}"),
                })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} -> {}x{} px",
            page_num,
            image.width(),
            image.height()
        );

        let part = encode::encode_page(&image, config.jpeg_quality).map_err(|e| {
            ExtractError::EncodeFailed {
                page: page_num,
                detail: format!("{e}"),
            }
        })?;
        parts.push(part);

        config.report(&page_message(page_num, total), page_progress(page_num, total));
    }

    Ok(parts)
}

/// Bind to a pdfium library: an explicit `PDFIUM_LIB_PATH`, then a copy next
/// to the executable, then the system-wide install.
fn bind_pdfium() -> Result<Pdfium, ExtractError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(ref path) if !path.is_empty() => Pdfium::bind_to_library(path),
        _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| ExtractError::PdfiumBindingFailed(format!("{e:?}")))?;

    Ok(Pdfium::new(bindings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_progress_is_strictly_increasing_within_bounds() {
        for total in [1usize, 2, 3, 10, 57] {
            let mut prev = 10.0f32;
            for page in 1..=total {
                let p = page_progress(page, total);
                assert!(p > prev, "page {page}/{total}: {p} <= {prev}");
                assert!(p > 10.0 && p <= 80.0, "page {page}/{total}: {p}");
                prev = p;
            }
            assert_eq!(page_progress(total, total), 80.0);
        }
    }

    #[test]
    fn page_message_names_current_and_total() {
        assert_eq!(page_message(3, 7), "Converting page 3 of 7 to image...");
    }
}
