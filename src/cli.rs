use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::display::Locale;
use crate::model::BackupKey;

/// Restore Browser - browse and download files from remote backup snapshots
#[derive(Parser, Debug)]
#[command(name = "restore-browser")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Server base URL (overrides the config file)
    #[arg(short, long, global = true, env = "RESTORE_SERVER", value_name = "URL")]
    pub server: Option<String>,

    /// Language for messages and dates
    #[arg(long, global = true, env = "RESTORE_LANG", value_enum, value_name = "LANG")]
    pub lang: Option<Locale>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List backups available for restore
    Backups(BackupsArgs),

    /// List a directory inside a backup
    Ls(LsArgs),

    /// Print the file tree of a backup
    Tree(TreeArgs),

    /// Download a single file from a backup
    Download(DownloadArgs),

    /// Download several files or directories as one ZIP archive
    DownloadMany(DownloadManyArgs),

    /// Browse backups interactively
    Tui(TuiArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Print the man page
    Man,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct BackupsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct LsArgs {
    /// Backup as peer_id:source_server:share_name
    #[arg(value_name = "BACKUP")]
    pub backup: BackupKey,

    /// Directory inside the backup
    #[arg(default_value = "/")]
    pub path: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Backup as peer_id:source_server:share_name
    #[arg(value_name = "BACKUP")]
    pub backup: BackupKey,

    /// Directory to start from
    #[arg(default_value = "/")]
    pub path: String,

    /// Maximum depth to display
    #[arg(short = 'd', long, default_value = "3", value_name = "N")]
    pub max_depth: usize,

    /// Show at most N entries per directory
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,

    /// Hide file and directory sizes
    #[arg(long)]
    pub no_sizes: bool,

    /// Output the subtree as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Backup as peer_id:source_server:share_name
    #[arg(value_name = "BACKUP")]
    pub backup: BackupKey,

    /// File path inside the backup
    pub file: String,

    /// Where to write the file (defaults to the download directory)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DownloadManyArgs {
    /// Backup as peer_id:source_server:share_name
    #[arg(value_name = "BACKUP")]
    pub backup: BackupKey,

    /// Paths inside the backup (directories are included recursively)
    #[arg(required = true, num_args = 1..)]
    pub paths: Vec<String>,

    /// Where to write the archive (defaults to the download directory)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TuiArgs {
    /// Open this backup directly (peer_id:source_server:share_name)
    #[arg(value_name = "BACKUP")]
    pub backup: Option<BackupKey>,
}
