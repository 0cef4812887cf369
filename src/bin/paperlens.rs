//! CLI binary for paperlens.
//!
//! A thin shim over the library crate: `extract` drives a full upload
//! lifecycle against a running relay, `serve` runs the relay itself, and
//! `export` re-runs the text-to-PDF step on its own (export failures never
//! invalidate extracted text, so retrying it independently is cheap).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use paperlens::{
    export_file_name, export_to_pdf, ExportOptions, ExtractionConfig, ExtractionProgress,
    FontSource, Phase, ProgressCallback, RelayClient, ServerConfig, Session, UploadFile,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress: a single 0–100 bar fed directly by the pipeline's
/// percentage milestones.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} [{bar:42.green/238}] {pos:>3}%  {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ExtractionProgress for CliProgress {
    fn on_progress(&self, message: &str, percentage: f32) {
        self.bar.set_position(percentage.round() as u64);
        self.bar.set_message(message.to_string());
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Run the relay (holds the API key; the extract command talks to it)
  GEMINI_API_KEY=... paperlens serve

  # Extract a scanned question paper (relay on the default port)
  paperlens extract paper.pdf

  # Write the text to a file and also export a PDF with a Devanagari font
  paperlens extract paper.pdf -o paper.txt --export-pdf --font NotoSansDevanagari-Regular.ttf

  # Copy the extracted text to the clipboard
  paperlens extract paper.pdf --copy

  # Re-run the PDF export on previously extracted text
  paperlens export paper.txt --font NotoSansDevanagari-Regular.ttf

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY        Credential for the upstream model (serve only)
  PAPERLENS_ENDPOINT    Relay endpoint URL for the extract command
  PDFIUM_LIB_PATH       Path to an existing libpdfium
"#;

/// Extract bilingual Hindi/English question text from scanned PDFs.
#[derive(Parser, Debug)]
#[command(
    name = "paperlens",
    version,
    about = "Extract bilingual question text from scanned PDFs with a vision LLM",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract text from a scanned PDF via the relay.
    Extract {
        /// Path to the PDF file.
        input: PathBuf,

        /// Write the extracted text to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Relay endpoint URL.
        #[arg(
            long,
            env = "PAPERLENS_ENDPOINT",
            default_value = paperlens::config::DEFAULT_ENDPOINT
        )]
        endpoint: String,

        /// Page zoom factor for rasterisation (0.5–4.0).
        #[arg(long, default_value_t = paperlens::config::DEFAULT_ZOOM)]
        zoom: f32,

        /// JPEG encode quality (1–100).
        #[arg(long, default_value_t = paperlens::config::DEFAULT_JPEG_QUALITY)]
        jpeg_quality: u8,

        /// Also export the result as <input-stem>-extracted.pdf.
        #[arg(long)]
        export_pdf: bool,

        /// TTF font to embed in the exported PDF (needed for Devanagari).
        #[arg(long)]
        font: Option<PathBuf>,

        /// Copy the extracted text to the system clipboard.
        #[arg(long)]
        copy: bool,

        /// Disable the progress bar.
        #[arg(long)]
        no_progress: bool,
    },

    /// Run the extraction relay server.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:8787")]
        listen: String,

        /// Upstream model API key.
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Upstream model identifier.
        #[arg(long, default_value = paperlens::server::DEFAULT_MODEL)]
        model: String,

        /// Upstream API base URL.
        #[arg(long, default_value = paperlens::server::DEFAULT_UPSTREAM)]
        upstream: String,
    },

    /// Export previously extracted text to a paginated PDF.
    Export {
        /// Path to a text file holding the extracted text.
        input: PathBuf,

        /// Output PDF path. Default: <input-stem>-extracted.pdf next to the
        /// input.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TTF font to embed (needed for Devanagari).
        #[arg(long)]
        font: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Extract {
            input,
            output,
            endpoint,
            zoom,
            jpeg_quality,
            export_pdf,
            font,
            copy,
            no_progress,
        } => {
            run_extract(
                &cli_flags(cli.quiet, no_progress),
                input,
                output,
                endpoint,
                zoom,
                jpeg_quality,
                export_pdf,
                font,
                copy,
            )
            .await
        }
        Command::Serve {
            listen,
            api_key,
            model,
            upstream,
        } => {
            let config = ServerConfig {
                api_key,
                model,
                upstream_base: upstream,
            };
            if config.api_key.is_none() {
                eprintln!(
                    "{} no API key configured; extraction requests will fail with 500",
                    red("warning:")
                );
            }
            let listener = tokio::net::TcpListener::bind(&listen)
                .await
                .with_context(|| format!("Failed to bind {listen}"))?;
            if !cli.quiet {
                eprintln!("{} relay listening on http://{listen}/api/extract", green("✔"));
            }
            paperlens::serve(listener, config).await.context("Server failed")
        }
        Command::Export { input, output, font } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;

            let out = output.unwrap_or_else(|| {
                let name = input
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                input.with_file_name(export_file_name(&name))
            });

            let options = ExportOptions {
                font: font.map(FontSource::File).unwrap_or_default(),
                ..ExportOptions::default()
            };
            export_to_pdf(&text, &out, &options).context("Export failed")?;
            if !cli.quiet {
                eprintln!("{} exported {}", green("✔"), bold(&out.display().to_string()));
            }
            Ok(())
        }
    }
}

struct Flags {
    quiet: bool,
    no_progress: bool,
}

fn cli_flags(quiet: bool, no_progress: bool) -> Flags {
    Flags { quiet, no_progress }
}

#[allow(clippy::too_many_arguments)]
async fn run_extract(
    flags: &Flags,
    input: PathBuf,
    output: Option<PathBuf>,
    endpoint: String,
    zoom: f32,
    jpeg_quality: u8,
    export_pdf: bool,
    font: Option<PathBuf>,
    copy: bool,
) -> Result<()> {
    let show_progress = !flags.quiet && !flags.no_progress;
    let progress = show_progress.then(CliProgress::new);

    let mut builder = ExtractionConfig::builder()
        .zoom(zoom)
        .jpeg_quality(jpeg_quality)
        .endpoint(endpoint);
    if let Some(ref p) = progress {
        let cloned: Arc<CliProgress> = Arc::clone(p);
        let callback: ProgressCallback = cloned;
        builder = builder.progress_callback(callback);
    }
    let config = builder.build().context("Invalid configuration")?;
    let relay = RelayClient::new(&config.endpoint);

    let file = UploadFile::from_path(&input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let mut session = Session::new();
    session.process(file, &config, &relay).await;

    if let Some(ref p) = progress {
        p.finish();
    }

    let text = match session.phase() {
        Phase::Success { text } => text.clone(),
        Phase::Error { message } => {
            eprintln!("{} {message}", red("✘"));
            std::process::exit(1);
        }
        // process() always lands in success or error.
        other => anyhow::bail!("unexpected session phase: {other:?}"),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !flags.quiet {
                eprintln!("{} wrote {}", green("✔"), bold(&path.display().to_string()));
            }
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes()).context("Failed to write to stdout")?;
            if !text.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
        }
    }

    if copy {
        let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
        clipboard
            .set_text(text.clone())
            .context("Failed to copy to clipboard")?;
        session.mark_copied();
        if !flags.quiet {
            eprintln!("{} copied to clipboard", green("✔"));
        }
    }

    if export_pdf {
        let out = input.with_file_name(session.export_file_name());
        let options = ExportOptions {
            font: font.map(FontSource::File).unwrap_or_default(),
            ..ExportOptions::default()
        };
        // A failed export leaves the extracted text untouched; report and
        // let the user retry with `paperlens export`.
        match export_to_pdf(&text, &out, &options) {
            Ok(()) => {
                if !flags.quiet {
                    eprintln!("{} exported {}", green("✔"), bold(&out.display().to_string()));
                }
            }
            Err(e) => eprintln!("{} export failed: {e}", red("✘")),
        }
    }

    Ok(())
}
