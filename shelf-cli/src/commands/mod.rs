pub(crate) mod config;
pub(crate) mod fetch;
pub(crate) mod playlist;
pub(crate) mod resource;

use shelf_catalog::FieldVisibility;

use crate::cli_types::{Commands, ConfigAction};
use crate::error::CliError;
use crate::session::Session;

/// Run a one-shot subcommand. `Shell` is handled by the caller.
pub(crate) fn dispatch(session: &mut Session, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Add(args) => resource::run_add(session, args.into()),
        Commands::List {
            page,
            fields,
            group,
        } => {
            if let Some(list) = fields {
                session.resource_fields = FieldVisibility::parse_list(&list)?;
            }
            if group {
                resource::run_list_grouped(session)
            } else {
                resource::run_list(session, page)
            }
        }
        Commands::Delete { id } => resource::run_delete(session, &id),
        Commands::FetchUpdates { sheet, file } => fetch::run_fetch_updates(session, sheet, file),
        Commands::Filter {
            criterion,
            value,
            fields,
        } => {
            if let Some(list) = fields {
                session.resource_fields = FieldVisibility::parse_list(&list)?;
            }
            resource::run_filter(session, criterion, &value)
        }
        Commands::Mark { id, status } => resource::run_mark(session, &id, &status),
        Commands::CreatePlaylist { name, resources } => {
            playlist::run_create_playlist(session, &name, &resources)
        }
        Commands::ListPlaylists { fields } => {
            if let Some(list) = fields {
                session.playlist_fields = FieldVisibility::parse_list(&list)?;
            }
            playlist::run_list_playlists(session)
        }
        Commands::ViewPlaylist { playlist } => playlist::run_view_playlist(session, &playlist),
        Commands::AddToPlaylist { playlist, id } => {
            playlist::run_add_to_playlist(session, &playlist, &id)
        }
        Commands::RemoveFromPlaylist { playlist, id } => {
            playlist::run_remove_from_playlist(session, &playlist, &id)
        }
        Commands::RandomResource => resource::run_random(session),
        Commands::Renumber { dry_run, output } => {
            resource::run_renumber(session, dry_run, output.as_deref()).map(|_| ())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => config::run_config_show(session),
            ConfigAction::Path => config::run_config_path(),
        },
        Commands::Shell => Err(CliError::other("the shell cannot be dispatched as a command")),
    }
}
