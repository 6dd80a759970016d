//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use shelf_catalog::{DEFAULT_STATUS, FilterCriterion, NewResource};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Track learning resources and reading playlists", long_about = None)]
pub(crate) struct Cli {
    /// Directory holding resources.json and playlists.json
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Command to run. Starts the interactive shell when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Fields of a resource entered on the command line.
#[derive(Args, Clone)]
pub(crate) struct AddArgs {
    /// Resource title
    #[arg(long)]
    pub title: String,

    /// Resource type (book, video, podcast, website, course)
    #[arg(short = 't', long = "type")]
    pub kind: String,

    /// Genre; also determines the id prefix
    #[arg(short, long)]
    pub genre: String,

    /// Reading status
    #[arg(short, long, default_value = DEFAULT_STATUS)]
    pub status: String,

    /// Where to find the resource
    #[arg(short, long)]
    pub link: String,

    /// Comma-separated tags
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Author (kept for books only)
    #[arg(short, long)]
    pub author: Option<String>,
}

impl From<AddArgs> for NewResource {
    fn from(args: AddArgs) -> Self {
        NewResource {
            title: args.title,
            kind: args.kind,
            genre: args.genre,
            status: args.status,
            link: args.link,
            tags: args
                .tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            author: args.author,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Add a new resource
    Add(AddArgs),

    /// List resources, one page at a time
    List {
        /// Page number to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Fields to show (e.g., id,title,genre,type,status,tags)
        #[arg(short, long)]
        fields: Option<String>,

        /// Group resources by genre instead of paging
        #[arg(short = 'G', long)]
        group: bool,
    },

    /// Delete a resource by id
    Delete {
        /// Resource id (e.g., history003)
        id: String,
    },

    /// Fetch new resources from the reading-list spreadsheet or a CSV file
    FetchUpdates {
        /// Spreadsheet id to fetch instead of the configured one
        #[arg(long, conflicts_with = "file")]
        sheet: Option<String>,

        /// Import from a local CSV export instead of the network
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Show resources whose genre, tag or status matches a value
    Filter {
        /// What to compare: genre, tag or status
        criterion: FilterCriterion,

        /// Value to match (case-insensitive)
        value: String,

        /// Fields to show (e.g., id,title,tags)
        #[arg(short, long)]
        fields: Option<String>,
    },

    /// Set a resource's status
    Mark {
        /// Resource id
        id: String,

        /// New status (e.g., viewed, in-progress)
        status: String,
    },

    /// Create a playlist, optionally seeded with resources
    CreatePlaylist {
        /// Playlist name
        name: String,

        /// Resource ids to add (repeatable)
        #[arg(short, long = "resource")]
        resources: Vec<String>,
    },

    /// List all playlists
    ListPlaylists {
        /// Fields to show (id, name, resources)
        #[arg(short, long)]
        fields: Option<String>,
    },

    /// Show the resources in a playlist
    ViewPlaylist {
        /// Playlist id or name
        playlist: String,
    },

    /// Append a copy of a resource to a playlist
    AddToPlaylist {
        /// Playlist name
        playlist: String,

        /// Resource id
        id: String,
    },

    /// Remove a resource from a playlist
    RemoveFromPlaylist {
        /// Playlist name
        playlist: String,

        /// Resource id
        id: String,
    },

    /// Pick a random resource
    RandomResource,

    /// Rebuild every resource id as <genre>001, <genre>002, ... in list order
    Renumber {
        /// Show planned id changes without writing
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Write the renumbered catalog here instead of over resources.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show settings and where they come from
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Start the interactive shell
    Shell,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and their sources
    Show,
    /// Print the settings file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["shelf", "--quiet"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.quiet);
    }

    #[test]
    fn add_args_become_new_resource() {
        let cli = Cli::try_parse_from([
            "shelf",
            "add",
            "--title",
            "Deep Work",
            "--type",
            "book",
            "--genre",
            "self-improvement",
            "--link",
            "https://example.com/dw",
            "--tags",
            "focus, productivity,,",
        ])
        .unwrap();
        let Some(Commands::Add(args)) = cli.command else {
            panic!("expected add");
        };
        let new = NewResource::from(args);
        assert_eq!(new.status, "unread");
        assert_eq!(new.tags, vec!["focus", "productivity"]);
        assert!(new.author.is_none());
    }

    #[test]
    fn filter_criterion_is_parsed_by_clap() {
        let cli = Cli::try_parse_from(["shelf", "filter", "TAG", "ai"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Filter {
                criterion: FilterCriterion::Tag,
                ..
            })
        ));
        assert!(Cli::try_parse_from(["shelf", "filter", "author", "x"]).is_err());
    }

    #[test]
    fn fetch_sources_are_exclusive() {
        assert!(
            Cli::try_parse_from(["shelf", "fetch-updates", "--sheet", "abc", "--file", "a.csv"])
                .is_err()
        );
    }
}
