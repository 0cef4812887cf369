//! # paperlens
//!
//! Extract clean, structured text from scanned PDFs of bilingual
//! Hindi/English question papers using a hosted vision LLM.
//!
//! ## Why this crate?
//!
//! Conventional OCR stumbles on mixed-script scans: Devanagari and Latin
//! text interleave on the same page, question stems must stay associated
//! with their options, and crooked scans add noise. Instead of running OCR
//! locally, paperlens rasterises each page into a JPEG and lets a vision
//! model read it, returning text that preserves both scripts, bolds only
//! the question stems, and flags illegible spans.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF upload
//!  │
//!  ├─ 1. Intake   reject anything that is not application/pdf
//!  ├─ 2. Render   rasterise pages in order at 1.5× via pdfium (spawn_blocking)
//!  ├─ 3. Encode   JPEG → base64 image parts
//!  ├─ 4. Relay    one POST to the extraction proxy
//!  │                └─ proxy holds the credential and forwards to the model
//!  └─ 5. Present  hold the text; copy, or export to a paginated PDF
//! ```
//!
//! The proxy (`paperlens serve`) is the only component that sees the API
//! key; the client side never talks to the model directly.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paperlens::{ExtractionConfig, RelayClient, Session, UploadFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let file = UploadFile::from_path("question-paper.pdf").await?;
//!     let config = ExtractionConfig::default();
//!     let relay = RelayClient::new(&config.endpoint);
//!
//!     let mut session = Session::new();
//!     session.process(file, &config, &relay).await;
//!
//!     if let Some(text) = session.text() {
//!         println!("{text}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `paperlens` binary (clap + anyhow + indicatif + arboard) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! paperlens = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod intake;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod server;
pub mod session;
pub mod wire;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder};
pub use error::{ExportError, ExtractError};
pub use export::{export_file_name, export_to_pdf, ExportOptions, FontSource};
pub use extract::extract;
pub use intake::{UploadFile, PDF_MIME};
pub use pipeline::relay::RelayClient;
pub use progress::{ExtractionProgress, NoopProgress, Progress, ProgressCallback};
pub use prompts::EXTRACTION_PROMPT;
pub use server::{router, serve, ServerConfig};
pub use session::{Phase, Session, COPY_ACK_TTL};
pub use wire::{ExtractRequest, ExtractResponse, ImagePart, InlineData};
