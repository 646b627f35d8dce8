use std::path::PathBuf;

use cardsync_core::{CardVariant, ResolutionStrategy};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "cardsync")]
#[command(about = "Reconcile trading card collections across devices")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name for device and strategy defaults
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Diff a server snapshot against a client snapshot
    Compare {
        #[command(flatten)]
        snapshots: SnapshotArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve every difference and write the merged collection
    Resolve {
        #[command(flatten)]
        snapshots: SnapshotArgs,
        /// Resolution strategy (last_write_wins, keep_higher, merge_add, server_wins, client_wins)
        #[arg(long, value_name = "STRATEGY")]
        strategy: Option<ResolutionStrategy>,
        /// Resolve with the recommended strategy
        #[arg(long, conflicts_with = "strategy")]
        accept_recommended: bool,
        /// Optional output path for the merged snapshot (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Output the full reconciliation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the sync status for a snapshot pair and pending queue
    Status {
        #[command(flatten)]
        snapshots: SnapshotArgs,
        /// Pending change queue file
        #[arg(long, value_name = "PATH")]
        queue: Option<PathBuf>,
        /// Report that a sync is currently in flight
        #[arg(long)]
        syncing: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the checksum of one or more snapshots
    Checksum {
        /// Snapshot files
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,
    },
    /// Manage the pending change queue
    Queue {
        /// Pending change queue file
        #[arg(long, global = true, value_name = "PATH")]
        queue: Option<PathBuf>,
        #[command(subcommand)]
        command: QueueCommands,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Clone, Debug)]
pub struct SnapshotArgs {
    /// Server snapshot file (JSON array of cards)
    #[arg(long, value_name = "PATH")]
    pub server: PathBuf,
    /// Client snapshot file (JSON array of cards)
    #[arg(long, value_name = "PATH")]
    pub client: PathBuf,
}

#[derive(Args, Clone, Debug)]
pub struct ChangeArgs {
    /// Card identifier (e.g. sv1-1)
    #[arg(long = "card", value_name = "ID")]
    pub card_id: String,
    /// Print variant (normal, holofoil, reverseHolofoil, ...)
    #[arg(long, default_value = "normal")]
    pub variant: CardVariant,
    /// Number of copies
    #[arg(long)]
    pub quantity: u32,
    /// Server quantity this change was made against
    #[arg(long, value_name = "N")]
    pub expected: Option<u32>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

#[derive(Subcommand)]
pub enum QueueCommands {
    /// Queue copies to add
    Add(ChangeArgs),
    /// Queue copies to remove
    Remove(ChangeArgs),
    /// Queue an absolute quantity
    Update(ChangeArgs),
    /// List queued changes in timestamp order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Merge queued changes that target the same card
    Compact,
    /// Replay the queue on top of a snapshot
    Apply {
        /// Base snapshot file
        #[arg(long, value_name = "PATH")]
        snapshot: PathBuf,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Remove acknowledged changes (all changes when no id is given)
    Clear {
        /// Change id to remove
        #[arg(long = "id", value_name = "ID")]
        ids: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Device identifier stamped on queued changes
        #[arg(long, value_name = "ID")]
        device_id: Option<String>,
        /// Default resolution strategy for `cardsync resolve`
        #[arg(long, value_name = "STRATEGY")]
        strategy: Option<ResolutionStrategy>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved profile
    Show,
}
