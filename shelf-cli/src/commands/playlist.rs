use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_catalog::Resource;

use crate::error::CliError;
use crate::render;
use crate::session::Session;

pub(crate) fn run_create_playlist(
    session: &Session,
    name: &str,
    seed_ids: &[String],
) -> Result<(), CliError> {
    let playlist = shelf_store::create_playlist(&session.store, name, seed_ids)?;
    log::info!(
        "Created playlist {} with ID {}",
        playlist.name.if_supports_color(Stdout, |t| t.bold()),
        playlist.id.if_supports_color(Stdout, |t| t.cyan()),
    );

    let skipped = seed_ids.len() - playlist.resources.len();
    if skipped > 0 {
        log::debug!(
            "{} of {} seed id(s) not in the catalog",
            skipped,
            seed_ids.len()
        );
    }
    if !playlist.resources.is_empty() {
        log::info!("  {} resource(s) added", playlist.resources.len());
    }
    Ok(())
}

pub(crate) fn run_list_playlists(session: &Session) -> Result<(), CliError> {
    let playlists = shelf_store::list_playlists(&session.store)?;
    if playlists.is_empty() {
        log::warn!("No playlists found.");
        return Ok(());
    }
    render::print_playlist_table(&playlists, &session.playlist_fields);
    Ok(())
}

pub(crate) fn run_view_playlist(session: &Session, id_or_name: &str) -> Result<(), CliError> {
    let playlist = shelf_store::view_playlist(&session.store, id_or_name)?;
    log::info!(
        "Playlist: {} {}",
        playlist.name.if_supports_color(Stdout, |t| t.bold()),
        format!("({})", playlist.id).if_supports_color(Stdout, |t| t.dimmed()),
    );

    if playlist.resources.is_empty() {
        log::info!("  (empty)");
        return Ok(());
    }

    let rows: Vec<&Resource> = playlist.resources.iter().collect();
    render::print_resource_table(&rows, &session.resource_fields, &session.palette);
    Ok(())
}

pub(crate) fn run_add_to_playlist(
    session: &Session,
    playlist_name: &str,
    resource_id: &str,
) -> Result<(), CliError> {
    let added = shelf_store::add_to_playlist(&session.store, playlist_name, resource_id)?;
    log::info!(
        "Added {} to {}",
        added.title.if_supports_color(Stdout, |t| t.bold()),
        playlist_name.trim().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

pub(crate) fn run_remove_from_playlist(
    session: &Session,
    playlist_name: &str,
    resource_id: &str,
) -> Result<(), CliError> {
    let removed = shelf_store::remove_from_playlist(&session.store, playlist_name, resource_id)?;
    log::info!(
        "Removed {} from {}",
        removed.title.if_supports_color(Stdout, |t| t.bold()),
        playlist_name.trim().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
