use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;
use crate::session::Session;
use crate::settings::{self, DATA_DIR_ENV, DEFAULT_SHEET_ID};

fn print_entry(name: &str, value: &str, source: &str) {
    log::info!(
        "  {} {} {}",
        format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
        value,
        format!("({})", source).if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Show resolved settings and where each value came from.
pub(crate) fn run_config_show(session: &Session) -> Result<(), CliError> {
    log::info!(
        "{}",
        "Shelf Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    match settings::settings_path() {
        Some(p) if p.exists() => {
            log::info!(
                "  Settings file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Settings file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Settings file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    log::info!("");

    let s = &session.settings;
    print_entry(
        "data_dir",
        &session.data_dir.display().to_string(),
        &session.data_dir_source.to_string(),
    );
    print_entry(
        "resources",
        &session.store.resources_path().display().to_string(),
        "data_dir",
    );
    print_entry(
        "playlists",
        &session.store.playlists_path().display().to_string(),
        "data_dir",
    );
    print_entry(
        "page_size",
        &session.page_size.to_string(),
        if s.view.page_size.is_some_and(|n| n > 0) {
            "settings file"
        } else {
            "default"
        },
    );
    print_entry(
        "sheet_id",
        s.sheet_id(),
        if s.sheet_id() == DEFAULT_SHEET_ID {
            "default"
        } else {
            "settings file"
        },
    );
    print_entry(
        "timeout",
        &format!("{}s", s.fetch_timeout().as_secs()),
        if s.import.timeout_secs.is_some() {
            "settings file"
        } else {
            "default"
        },
    );

    let overrides = s.colors.genre.len() + s.colors.status.len() + s.colors.tag.len();
    if overrides > 0 {
        log::info!("");
        log::info!("  {} color override(s) from settings file", overrides);
    }

    log::info!("");
    log::info!(
        "  {}",
        format!("Set ${} or pass --data-dir to use another catalog.", DATA_DIR_ENV)
            .if_supports_color(Stdout, |t| t.dimmed())
    );
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = settings::settings_path()
        .ok_or_else(|| CliError::config("could not determine the config directory"))?;
    log::info!("{}", path.display());
    Ok(())
}
