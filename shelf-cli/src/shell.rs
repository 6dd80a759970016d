//! Interactive shell: a read-eval loop over the same commands as the CLI.
//!
//! Errors from a command are reported and the loop continues; only `exit`,
//! `quit` or end of input leave the shell.

use std::io::BufRead;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_catalog::{
    DEFAULT_STATUS, FieldSet, FieldVisibility, FilterCriterion, KNOWN_STATUSES, KNOWN_TYPES,
    NewResource, Page, PagerAction, Pager, paginate, split_tags,
};

use crate::commands::{fetch, playlist, resource};
use crate::error::CliError;
use crate::prompt::Prompter;
use crate::render;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Add,
    List,
    Delete,
    FetchUpdates,
    Filter,
    Mark,
    CreatePlaylist,
    ListPlaylists,
    ViewPlaylist,
    AddToPlaylist,
    RemoveFromPlaylist,
    FilterFields,
    FilterPlaylistFields,
    RandomResource,
    Renumber,
    Help,
    Exit,
}

impl ShellCommand {
    /// Every command with its help line, in help order.
    const HELP: &'static [(ShellCommand, &'static str, &'static str)] = &[
        (Self::Add, "add", "Add a new resource"),
        (Self::List, "list", "List all resources"),
        (Self::Delete, "delete", "Delete a resource"),
        (Self::FetchUpdates, "fetch-updates", "Fetch the newest resources from the reading list"),
        (Self::Filter, "filter", "Filter resources by genre, tag or status"),
        (Self::Mark, "mark", "Mark a resource as viewed/in-progress/etc."),
        (Self::CreatePlaylist, "create-playlist", "Create a new playlist"),
        (Self::ListPlaylists, "list-playlists", "List all playlists"),
        (Self::ViewPlaylist, "view-playlist", "Inspect a playlist by id or name"),
        (Self::AddToPlaylist, "add-to-playlist", "Add a resource to a playlist"),
        (Self::RemoveFromPlaylist, "remove-from-playlist", "Remove a resource from a playlist"),
        (Self::FilterFields, "filter-fields", "Toggle fields for listing resources"),
        (Self::FilterPlaylistFields, "filter-playlist-fields", "Toggle fields for listing playlists"),
        (Self::RandomResource, "random-resource", "Get a single random resource"),
        (Self::Renumber, "renumber", "Rebuild resource ids in list order"),
        (Self::Help, "help", "Show this help message"),
        (Self::Exit, "exit", "Exit the shell"),
    ];

    pub(crate) fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "?" => Some(Self::Help),
            "quit" => Some(Self::Exit),
            name => Self::HELP
                .iter()
                .find(|(_, n, _)| *n == name)
                .map(|(cmd, _, _)| *cmd),
        }
    }
}

pub(crate) fn print_help() {
    log::info!("");
    log::info!("{}", "Available Commands:".if_supports_color(Stdout, |t| t.bold()));
    for (_, name, about) in ShellCommand::HELP {
        log::info!(
            "  {:<24} {}",
            name.if_supports_color(Stdout, |t| t.cyan()),
            about
        );
    }
}

/// Run the shell until `exit` or end of input.
pub(crate) fn run<R: BufRead>(
    session: &mut Session,
    prompter: &mut Prompter<R>,
) -> Result<(), CliError> {
    print_help();
    loop {
        let Some(line) = prompter.ask("\nEnter command: ")? else {
            log::info!("Goodbye!");
            return Ok(());
        };
        if line.is_empty() {
            continue;
        }

        let Some(command) = ShellCommand::parse(&line) else {
            log::warn!("Unknown command: '{}'", line);
            print_help();
            continue;
        };
        if command == ShellCommand::Exit {
            log::info!("Exiting. Goodbye!");
            return Ok(());
        }

        if let Err(e) = execute(session, prompter, command) {
            e.report();
        }
    }
}

/// Prompt for a value that must not be blank. `None` on end of input or a blank answer.
fn ask_required<R: BufRead>(
    prompter: &mut Prompter<R>,
    label: &str,
) -> Result<Option<String>, CliError> {
    match prompter.ask(label)? {
        Some(answer) if !answer.is_empty() => Ok(Some(answer)),
        Some(_) => {
            log::warn!("A value is required; command cancelled.");
            Ok(None)
        }
        None => Ok(None),
    }
}

fn execute<R: BufRead>(
    session: &mut Session,
    prompter: &mut Prompter<R>,
    command: ShellCommand,
) -> Result<(), CliError> {
    match command {
        ShellCommand::Add => {
            if let Some(new) = prompt_new_resource(prompter)? {
                resource::run_add(session, new)?;
            }
        }
        ShellCommand::List => {
            let catalog = session.store.load_resources()?;
            if catalog.is_empty() {
                log::warn!("No resources found.");
            } else {
                page_through(prompter, &catalog.resources, session.page_size, |page| {
                    render::print_resource_page(page, &session.resource_fields, &session.palette)
                })?;
            }
        }
        ShellCommand::Delete => {
            if let Some(id) = ask_required(prompter, "Enter ID of resource to delete: ")? {
                resource::run_delete(session, &id)?;
            }
        }
        ShellCommand::FetchUpdates => fetch::run_fetch_updates(session, None, None)?,
        ShellCommand::Filter => {
            let Some(raw) = ask_required(prompter, "Enter filter criteria (genre/tag/status): ")?
            else {
                return Ok(());
            };
            let criterion: FilterCriterion = raw.parse()?;
            if let Some(value) = ask_required(prompter, &format!("Enter {} to filter by: ", criterion))? {
                resource::run_filter(session, criterion, &value)?;
            }
        }
        ShellCommand::Mark => {
            let Some(id) = ask_required(prompter, "Enter ID of resource to mark: ")? else {
                return Ok(());
            };
            let label = format!("Enter new status ({})", KNOWN_STATUSES.join("/"));
            if let Some(status) = prompter.ask_or(&label, "viewed")? {
                resource::run_mark(session, &id, &status)?;
            }
        }
        ShellCommand::CreatePlaylist => {
            let Some(name) = ask_required(prompter, "Enter playlist name: ")? else {
                return Ok(());
            };
            let mut ids = Vec::new();
            while let Some(id) =
                prompter.ask("Enter resource ID to add to playlist (or 'done' to finish): ")?
            {
                if id.is_empty() || id.eq_ignore_ascii_case("done") {
                    break;
                }
                ids.push(id);
            }
            playlist::run_create_playlist(session, &name, &ids)?;
        }
        ShellCommand::ListPlaylists => {
            let playlists = shelf_store::list_playlists(&session.store)?;
            if playlists.is_empty() {
                log::warn!("No playlists found.");
            } else {
                page_through(prompter, &playlists, session.page_size, |page| {
                    render::print_playlist_table(page.items, &session.playlist_fields);
                    render::print_page_footer(page.number(), page.total_pages);
                })?;
            }
        }
        ShellCommand::ViewPlaylist => {
            if let Some(key) = ask_required(prompter, "Enter playlist ID or name: ")? {
                playlist::run_view_playlist(session, &key)?;
            }
        }
        ShellCommand::AddToPlaylist => {
            let Some(name) = ask_required(prompter, "Enter playlist name: ")? else {
                return Ok(());
            };
            if let Some(id) = ask_required(prompter, "Enter resource ID to add to playlist: ")? {
                playlist::run_add_to_playlist(session, &name, &id)?;
            }
        }
        ShellCommand::RemoveFromPlaylist => {
            let Some(name) = ask_required(prompter, "Enter playlist name: ")? else {
                return Ok(());
            };
            if let Some(id) =
                ask_required(prompter, "Enter resource ID to remove from playlist: ")?
            {
                playlist::run_remove_from_playlist(session, &name, &id)?;
            }
        }
        ShellCommand::FilterFields => toggle_fields(prompter, &mut session.resource_fields)?,
        ShellCommand::FilterPlaylistFields => {
            toggle_fields(prompter, &mut session.playlist_fields)?
        }
        ShellCommand::RandomResource => resource::run_random(session)?,
        ShellCommand::Renumber => {
            if resource::run_renumber(session, true, None)? > 0
                && prompter.confirm("Apply these changes?")?
            {
                resource::run_renumber(session, false, None)?;
            }
        }
        ShellCommand::Help => print_help(),
        ShellCommand::Exit => {}
    }
    Ok(())
}

fn prompt_new_resource<R: BufRead>(
    prompter: &mut Prompter<R>,
) -> Result<Option<NewResource>, CliError> {
    let Some(title) = ask_required(prompter, "Enter title: ")? else {
        return Ok(None);
    };
    let type_label = format!("Enter type ({}): ", KNOWN_TYPES.join("/"));
    let Some(kind) = ask_required(prompter, &type_label)? else {
        return Ok(None);
    };
    let Some(genre) = ask_required(prompter, "Enter genre: ")? else {
        return Ok(None);
    };
    let status_label = format!("Enter status ({})", KNOWN_STATUSES.join("/"));
    let Some(status) = prompter.ask_or(&status_label, DEFAULT_STATUS)? else {
        return Ok(None);
    };
    let Some(link) = ask_required(prompter, "Enter link: ")? else {
        return Ok(None);
    };
    let Some(tags) = prompter.ask("Enter tags (comma-separated): ")? else {
        return Ok(None);
    };

    let mut new = NewResource {
        title,
        kind,
        genre,
        status,
        link,
        tags: split_tags(&tags),
        author: None,
    };
    if new.is_book() {
        new.author = prompter.ask("Enter author: ")?.filter(|a| !a.is_empty());
    }
    Ok(Some(new))
}

/// Show `items` a page at a time until the user goes back.
fn page_through<T, R: BufRead>(
    prompter: &mut Prompter<R>,
    items: &[T],
    page_size: usize,
    mut show: impl FnMut(&Page<'_, T>),
) -> Result<(), CliError> {
    let mut pager = Pager::new(items.len(), page_size);
    loop {
        show(&paginate(items, page_size, pager.page()));
        log::info!("Options: [1] Go Left, [2] Go Right, [3] Return to Previous Screen");

        let Some(input) = prompter.ask("Enter your choice: ")? else {
            return Ok(());
        };
        match PagerAction::parse(&input) {
            Some(action) => {
                if !pager.apply(action) {
                    return Ok(());
                }
            }
            None => log::warn!("Invalid choice '{}'", input),
        }
    }
}

/// Toggle loop over the fields of `F`; `b` goes back.
fn toggle_fields<F: FieldSet, R: BufRead>(
    prompter: &mut Prompter<R>,
    fields: &mut FieldVisibility<F>,
) -> Result<(), CliError> {
    loop {
        render::print_field_states(fields);
        log::info!("Press 'b' to go back.");

        let Some(choice) = prompter.ask("\nEnter your choice: ")? else {
            return Ok(());
        };
        if choice.eq_ignore_ascii_case("b") {
            return Ok(());
        }
        match F::parse(&choice) {
            Ok(field) => {
                fields.toggle(field);
            }
            Err(e) => log::warn!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{DataDirSource, Settings};
    use shelf_catalog::{PlaylistField, ResourceField};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn session(tmp: &TempDir) -> Session {
        Session::new(
            tmp.path().to_path_buf(),
            DataDirSource::Flag,
            Settings::default(),
            true,
        )
    }

    fn run_script(session: &mut Session, script: &str) {
        let mut prompter = Prompter::new(Cursor::new(script.to_string()));
        run(session, &mut prompter).unwrap();
    }

    #[test]
    fn parses_every_listed_command_and_aliases() {
        for (cmd, name, _) in ShellCommand::HELP {
            assert_eq!(ShellCommand::parse(name), Some(*cmd));
        }
        assert_eq!(ShellCommand::parse(" ? "), Some(ShellCommand::Help));
        assert_eq!(ShellCommand::parse("QUIT"), Some(ShellCommand::Exit));
        assert_eq!(ShellCommand::parse("update"), None);
    }

    #[test]
    fn add_flow_assigns_ids_and_keeps_author_for_books() {
        let tmp = TempDir::new().unwrap();
        let mut s = session(&tmp);
        run_script(
            &mut s,
            "add\nDeep Work\nbook\nself-improvement\n\nhttps://example.com/dw\nfocus, work\nCal Newport\n\
             add\nAtomic Habits Talk\nvideo\nself-improvement\nviewed\nhttps://example.com/ah\n\n\
             exit\n",
        );

        let catalog = s.store.load_resources().unwrap();
        assert_eq!(catalog.len(), 2);
        let first = &catalog.resources[0];
        assert_eq!(first.id, "self-improvement001");
        assert_eq!(first.status, "unread");
        assert_eq!(first.tags, vec!["focus", "work"]);
        assert_eq!(first.author, "Cal Newport");
        let second = &catalog.resources[1];
        assert_eq!(second.id, "self-improvement002");
        assert!(second.author.is_empty());
        assert!(second.tags.is_empty());
    }

    #[test]
    fn errors_do_not_end_the_loop() {
        let tmp = TempDir::new().unwrap();
        let mut s = session(&tmp);
        run_script(
            &mut s,
            "bogus\ndelete\nnope001\nfilter\nauthor\nview-playlist\nmissing\ncreate-playlist\nReads\ndone\nexit\n",
        );

        let playlists = shelf_store::list_playlists(&s.store).unwrap();
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].name, "Reads");
    }

    #[test]
    fn end_of_input_leaves_cleanly_mid_command() {
        let tmp = TempDir::new().unwrap();
        let mut s = session(&tmp);
        run_script(&mut s, "add\nHalf Entered\n");
        assert!(!s.store.resources_path().exists());
    }

    #[test]
    fn field_toggles_persist_for_the_session() {
        let tmp = TempDir::new().unwrap();
        let mut s = session(&tmp);
        run_script(
            &mut s,
            "filter-fields\ntags\ngenre\nnonsense\nb\nfilter-playlist-fields\nid\nb\nquit\n",
        );

        assert_eq!(
            s.resource_fields.fields(),
            vec![ResourceField::Id, ResourceField::Title, ResourceField::Tags]
        );
        assert_eq!(
            s.playlist_fields.fields(),
            vec![PlaylistField::Name, PlaylistField::Resources]
        );
    }

    #[test]
    fn pager_walks_and_returns() {
        let items: Vec<u32> = (0..45).collect();
        let mut seen = Vec::new();
        let mut prompter = Prompter::new(Cursor::new("2\n2\n2\nx\n1\n3\n"));
        page_through(&mut prompter, &items, 20, |page| seen.push(page.index)).unwrap();
        assert_eq!(seen, vec![0, 1, 2, 2, 2, 1]);
    }

    #[test]
    fn renumber_applies_only_after_confirmation() {
        let tmp = TempDir::new().unwrap();
        let mut s = session(&tmp);
        run_script(
            &mut s,
            "add\nA\nvideo\ntech\n\nhttps://a\n\n\
             add\nB\nvideo\ntech\n\nhttps://b\n\n\
             delete\ntech001\n\
             renumber\nn\n",
        );
        assert!(s.store.load_resources().unwrap().find("tech002").is_some());

        run_script(&mut s, "renumber\ny\nexit\n");
        assert!(s.store.load_resources().unwrap().find("tech001").is_some());
    }
}
