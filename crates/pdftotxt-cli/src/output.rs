use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use pdftotxt_core::{ProgressEvent, RunSummary};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Routes progress events to stdout/stderr, each with its own color mode,
/// and keeps the first write error so the run can fail on it.
pub struct Reporter<O, E> {
    out: O,
    err: E,
    out_color: ColorMode,
    err_color: ColorMode,
    write_error: Option<std::io::Error>,
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(out: O, err: E, out_color: ColorMode, err_color: ColorMode) -> Self {
        Self {
            out,
            err,
            out_color,
            err_color,
            write_error: None,
        }
    }

    pub fn report(&mut self, event: &ProgressEvent) {
        if let Err(e) = print_progress(
            &mut self.out,
            &mut self.err,
            event,
            self.out_color,
            self.err_color,
        ) {
            tracing::debug!(error = %e, "failed to write progress line");
            self.write_error.get_or_insert(e);
        }
    }

    /// Print the summary, surfacing the first earlier write error if any.
    pub fn finish(mut self, summary: &RunSummary) -> std::io::Result<()> {
        if let Some(e) = self.write_error.take() {
            return Err(e);
        }
        print_summary(&mut self.out, summary, self.out_color)?;
        self.out.flush()
    }
}

/// Print one per-file line for a progress event.
///
/// Conversions and skips go to `out`, failures to `err`. `Started` prints
/// nothing.
pub fn print_progress(
    out: &mut dyn Write,
    err: &mut dyn Write,
    event: &ProgressEvent,
    color: ColorMode,
    err_color: ColorMode,
) -> std::io::Result<()> {
    match event {
        ProgressEvent::Started { .. } => {}
        ProgressEvent::Converted { source, output, .. } => {
            let label = "✅ 변환 완료:";
            if color.enabled() {
                writeln!(
                    out,
                    "{} {} → {}",
                    label.green(),
                    display_name(source),
                    display_name(output)
                )?;
            } else {
                writeln!(
                    out,
                    "{} {} → {}",
                    label,
                    display_name(source),
                    display_name(output)
                )?;
            }
        }
        ProgressEvent::Skipped { source, output, .. } => {
            let line = format!(
                "⏭ 건너뜀: {} ({} exists)",
                display_name(source),
                display_name(output)
            );
            if color.enabled() {
                writeln!(out, "{}", line.dimmed())?;
            } else {
                writeln!(out, "{}", line)?;
            }
        }
        ProgressEvent::Failed { source, error, .. } => {
            let label = "❌ 변환 실패:";
            if err_color.enabled() {
                writeln!(err, "{} {}: {}", label.red(), display_name(source), error)?;
            } else {
                writeln!(err, "{} {}: {}", label, display_name(source), error)?;
            }
        }
    }
    Ok(())
}

/// Print the closing count line.
pub fn print_summary(
    w: &mut dyn Write,
    summary: &RunSummary,
    color: ColorMode,
) -> std::io::Result<()> {
    let line = format!(
        "총 {}개 PDF: {}개 변환, {}개 건너뜀, {}개 실패",
        summary.total(),
        summary.converted(),
        summary.skipped(),
        summary.failed()
    );
    if color.enabled() {
        if summary.has_failures() {
            writeln!(w, "{}", line.bold().red())?;
        } else {
            writeln!(w, "{}", line.bold())?;
        }
    } else {
        writeln!(w, "{}", line)?;
    }
    Ok(())
}
