use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdftotxt_core::{ProgressEvent, RunSummary, config_file, convert_directory};
use pdftotxt_mupdf::MupdfBackend;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

mod output;
mod settings;

use output::{ColorMode, Reporter};
use settings::Settings;

/// Convert every PDF in a directory to a sibling UTF-8 .txt file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory containing the PDF files (falls back to PDFTOTXT_DIR)
    directory: Option<PathBuf>,

    /// Leave PDFs alone whose .txt output already exists
    #[arg(long)]
    skip_existing: bool,

    /// Replace typographic ligatures (ﬁ, ﬂ, ...) with plain letters
    #[arg(long)]
    expand_ligatures: bool,

    /// Fraction of page height at the top to drop as header (0 disables)
    #[arg(long)]
    header_exclusion: Option<f32>,

    /// Fraction of page height at the bottom to drop as footer (0 disables)
    #[arg(long)]
    footer_exclusion: Option<f32>,

    /// Path to a TOML config file (default: .pdftotxt.toml over the platform config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Show a progress bar on stderr
    #[arg(long)]
    progress: bool,

    /// Log debug diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(&cli);
    if let Err(ref e) = result {
        eprintln!("error: {:#}", e);
    }
    ExitCode::from(exit_status(&result))
}

/// 0 when every PDF converted or was skipped, 1 when any PDF failed,
/// 2 when the run could not start or its output could not be written.
fn exit_status(result: &anyhow::Result<RunSummary>) -> u8 {
    match result {
        Ok(summary) if summary.has_failures() => 1,
        Ok(_) => 0,
        Err(_) => 2,
    }
}

/// Level used when `RUST_LOG` is unset. Per-file failures are logged at
/// debug so the default console shows only the ❌ line for them.
fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

fn log_subscriber<W>(filter: EnvFilter, writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .finish()
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    let _ = tracing::subscriber::set_global_default(log_subscriber(filter, std::io::stderr));
}

fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let config = match cli.config {
        Some(ref path) => config_file::read_config(path)?,
        None => config_file::load_config(),
    };
    let settings = Settings::resolve(cli, &config, std::env::var("PDFTOTXT_DIR").ok())?;

    let out_color = ColorMode(settings.color && std::io::stdout().is_terminal());
    let err_color = ColorMode(settings.color && std::io::stderr().is_terminal());

    let backend = MupdfBackend::new()
        .with_header_exclusion(settings.header_exclusion)
        .with_footer_exclusion(settings.footer_exclusion);

    let bar = if cli.progress {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:40.green/dim}] {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut reporter = Reporter::new(
        std::io::stdout().lock(),
        std::io::stderr(),
        out_color,
        err_color,
    );

    let summary = convert_directory(&settings.directory, &backend, &settings.options, |event| {
        if let ProgressEvent::Started { total, ref source, .. } = event {
            bar.set_length(total as u64);
            bar.set_message(
                source
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );
            return;
        }
        bar.suspend(|| reporter.report(&event));
        bar.inc(1);
    })?;

    bar.finish_and_clear();
    reporter.finish(&summary)?;

    Ok(summary)
}
