//! Command-line definitions

use clap::{Args, Parser, Subcommand};
use library_client::{DeleteMode, NsfwMode, SortKey, SortOrder};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gen-library")]
#[command(version, about = "Browse and manage a Gen Library image backend")]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "GEN_LIBRARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend origin, overriding configuration and environment
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query and edit images
    #[command(subcommand)]
    Images(ImagesCommand),
    /// Read or write backend settings
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Scan the library root (or ROOT) for new images
    Scan {
        root: Option<String>,
    },
    /// Import a library from PATH
    Import {
        path: String,
        /// Sub-folder to import into
        #[arg(long)]
        folder: Option<String>,
    },
    /// Control the backend's filesystem watcher
    #[command(subcommand)]
    Watcher(WatcherCommand),
    /// Show or change the stored NSFW visibility mode
    Nsfw {
        mode: Option<NsfwMode>,
    },
    /// Show which client view a location resolves to
    Route {
        location: String,
    },
    /// Run the development server
    Serve(ServeArgs),
}

#[derive(Subcommand, Debug)]
pub enum ImagesCommand {
    /// List one page of images
    List(ListArgs),
    /// Show a single image
    Get { id: u64 },
    /// Delete an image
    Delete {
        id: u64,
        /// trash (default) or hard
        #[arg(long, default_value_t = DeleteMode::Trash)]
        mode: DeleteMode,
    },
    /// Replace image metadata with a JSON document
    Metadata {
        id: u64,
        /// JSON object, e.g. '{"rating": 4}'
        json: String,
    },
    /// Add tags to an image
    Tag {
        id: u64,
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Remove tags from an image
    Untag {
        id: u64,
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Print the URL of the original file
    FileUrl { id: u64 },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
    /// Free-text search
    #[arg(short, long)]
    pub query: Option<String>,
    /// Tag filter; repeat or comma separate
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
    /// Defaults to the stored preference
    #[arg(long)]
    pub nsfw: Option<NsfwMode>,
    #[arg(long)]
    pub sort: Option<SortKey>,
    #[arg(long)]
    pub order: Option<SortOrder>,
    #[arg(long)]
    pub rating: Option<i32>,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print a setting value
    Get { key: String },
    /// Store a setting value
    Set { key: String, value: String },
}

#[derive(Subcommand, Debug)]
pub enum WatcherCommand {
    Status,
    Start,
    Stop,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long)]
    pub host: Option<String>,
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Backend origin to proxy to
    #[arg(long)]
    pub backend: Option<String>,
    /// Built frontend assets
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_list_filters() {
        let cli = Cli::try_parse_from([
            "gen-library",
            "images",
            "list",
            "--page",
            "2",
            "--tags",
            "a,b",
            "--nsfw",
            "only",
            "--sort",
            "file_name",
        ])
        .unwrap();

        let Command::Images(ImagesCommand::List(args)) = cli.command else {
            panic!("expected images list");
        };
        assert_eq!(args.page, Some(2));
        assert_eq!(args.tags, vec!["a", "b"]);
        assert_eq!(args.nsfw, Some(NsfwMode::Only));
        assert_eq!(args.sort, Some(SortKey::FileName));
        assert_eq!(args.order, None);
    }

    #[test]
    fn test_delete_defaults_to_trash() {
        let cli = Cli::try_parse_from(["gen-library", "images", "delete", "9"]).unwrap();
        let Command::Images(ImagesCommand::Delete { id, mode }) = cli.command else {
            panic!("expected images delete");
        };
        assert_eq!(id, 9);
        assert_eq!(mode, DeleteMode::Trash);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "gen-library",
            "watcher",
            "status",
            "--api-base",
            "http://nas:8081",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.api_base.as_deref(), Some("http://nas:8081"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_rejects_unknown_nsfw_mode() {
        assert!(Cli::try_parse_from(["gen-library", "nsfw", "maybe"]).is_err());
    }
}
