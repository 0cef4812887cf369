//! Pipeline stages for one extraction job.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets us swap an
//! implementation (e.g. the rendering backend) without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! bytes ──▶ render ──▶ encode ──▶ relay
//! (PDF)     (pdfium)   (base64)   (one POST to the proxy)
//! ```
//!
//! 1. [`render`] — rasterise every page in order at a fixed zoom; runs in
//!    `spawn_blocking` because pdfium is not async-safe
//! 2. [`encode`] — JPEG-encode and base64-wrap each page for the request body
//! 3. [`relay`]  — the single network call; the only stage with I/O beyond
//!    the rasteriser

pub mod encode;
pub mod relay;
pub mod render;
