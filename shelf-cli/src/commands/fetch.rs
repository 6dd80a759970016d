use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_import::{
    CsvFileSource, ImportProgress, IngestSource, LogProgress, MergeStats, SheetSource, ingest,
};

use crate::error::CliError;
use crate::session::Session;

/// Spinner-backed progress for `fetch-updates` on an interactive terminal.
struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("/-\\|"));
        }
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }
}

impl ImportProgress for SpinnerProgress {
    fn on_candidate(&self, current: usize, total: usize, title: &str) {
        self.pb
            .set_message(format!("[{}/{}] {}", current, total, title));
    }

    fn on_phase(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn on_complete(&self, message: &str) {
        self.pb.finish_and_clear();
        log::info!("{}", message);
    }
}

impl Drop for SpinnerProgress {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}

/// The spinner only suits a live terminal; quiet, logged or piped runs get
/// plain log lines so progress also lands in `--logfile`.
fn progress_reporter(session: &Session) -> Box<dyn ImportProgress> {
    if uses_spinner(session) {
        Box::new(SpinnerProgress::new())
    } else {
        Box::new(LogProgress)
    }
}

fn uses_spinner(session: &Session) -> bool {
    !session.quiet && !session.plain_progress
}

/// One-line result of a merge that changed something.
fn summary_line(stats: &MergeStats) -> String {
    format!(
        "{} new, {} updated ({} candidates fetched)",
        stats.added.if_supports_color(Stdout, |t| t.green()),
        stats.updated.if_supports_color(Stdout, |t| t.yellow()),
        stats.total,
    )
}

/// Pull new resources from the spreadsheet (or a local CSV export) into the catalog.
pub(crate) fn run_fetch_updates(
    session: &Session,
    sheet: Option<String>,
    file: Option<PathBuf>,
) -> Result<(), CliError> {
    let source: Box<dyn IngestSource> = match file {
        Some(path) => Box::new(CsvFileSource::new(path)),
        None => {
            let sheet_id = sheet.unwrap_or_else(|| session.settings.sheet_id().to_string());
            Box::new(SheetSource::new(sheet_id).with_timeout(session.settings.fetch_timeout()))
        }
    };

    let progress = progress_reporter(session);
    let result = ingest(&session.store, source.as_ref(), progress.as_ref());
    match result {
        Ok(stats) => {
            if stats.added == 0 && stats.updated == 0 {
                log::info!(
                    "{}",
                    "Catalog is already up to date.".if_supports_color(Stdout, |t| t.dimmed())
                );
            } else {
                log::info!("{}", summary_line(&stats));
            }
            Ok(())
        }
        Err(e) => {
            drop(progress);
            if e.is_retryable() {
                log::warn!(
                    "{}",
                    "The fetch failed for a reason that may be temporary; try again later."
                        .if_supports_color(Stdout, |t| t.yellow())
                );
            }
            Err(e.into())
        }
    }
}
