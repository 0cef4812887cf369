//! Image encoding: rendered page → base64 JPEG wrapped in an [`ImagePart`].
//!
//! JPEG keeps the request body small: a scanned question paper compresses an
//! order of magnitude better than PNG, and the vision model reads 1.5×-zoom
//! print reliably at quality 92. The payload is bare base64 — the endpoint
//! contract carries the MIME type in its own field, not as a data-URI prefix.

use crate::wire::ImagePart;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// MIME type tagged on every encoded page.
pub const PAGE_IMAGE_MIME: &str = "image/jpeg";

/// Encode a rasterised page as a base64 JPEG ready for the request body.
pub fn encode_page(img: &DynamicImage, quality: u8) -> Result<ImagePart, image::ImageError> {
    // Pdfium hands back RGBA; JPEG has no alpha channel.
    let rgb = img.to_rgb8();

    let mut buf = Vec::new();
    let mut cursor = Cursor::new(&mut buf);
    let encoder = JpegEncoder::new_with_quality(&mut cursor, quality);
    rgb.write_with_encoder(encoder)?;

    let b64 = STANDARD.encode(&buf);
    debug!("Encoded page -> {} bytes base64", b64.len());

    Ok(ImagePart::new(b64, PAGE_IMAGE_MIME))
}
