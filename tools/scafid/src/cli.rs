//! Command-line arguments

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use scaffold_ids::domain::{
    DEFAULT_ID_COLUMN, DEFAULT_ID_LENGTH, DEFAULT_KEY_COLUMN, DEFAULT_SUFFIX_LENGTH, UPPER_ALNUM,
};

/// scafid: stable, collision-aware scaffold identifiers
///
/// Datasets are JSON arrays of objects. Use `-` to read from stdin; output
/// goes to stdout unless `--output` is given.
#[derive(Parser, Debug)]
#[command(name = "scafid")]
#[command(about = "Assign stable, collision-aware identifiers to scaffold keys")]
pub struct Cli {
    /// Log level filter (overrides SCAFID_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assign an identifier to every row of a dataset
    Assign(AssignArgs),
    /// Assign identifiers to a new dataset while preserving an existing registry
    Extrapolate(ExtrapolateArgs),
    /// Build a scaffold frequency table, optionally with composite labels
    Frequency(FrequencyArgs),
}

/// Column names
#[derive(Args, Debug, Clone)]
pub struct ColumnArgs {
    /// Column holding scaffold keys
    #[arg(long, default_value = DEFAULT_KEY_COLUMN)]
    pub key_column: String,

    /// Column receiving identifiers
    #[arg(long, default_value = DEFAULT_ID_COLUMN)]
    pub id_column: String,
}

/// Identifier generation options
#[derive(Args, Debug, Clone)]
pub struct IdArgs {
    /// Identifier strategy: stable | random. Random `assign` output with
    /// repeated keys needs `extrapolate --duplicate-keys first_wins|last_wins`
    #[arg(long, default_value = "stable")]
    pub strategy: String,

    /// Identifier length
    #[arg(long, default_value_t = DEFAULT_ID_LENGTH)]
    pub length: usize,

    /// Symbols for random identifiers
    #[arg(long, default_value = UPPER_ALNUM)]
    pub alphabet: String,

    /// Seed for reproducible random identifiers
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Input dataset
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output dataset (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub columns: ColumnArgs,

    #[command(flatten)]
    pub ids: IdArgs,
}

#[derive(Args, Debug)]
pub struct ExtrapolateArgs {
    /// Previously annotated dataset (key and identifier columns)
    #[arg(short, long)]
    pub registry: PathBuf,

    /// New dataset to annotate
    #[arg(short, long)]
    pub input: PathBuf,

    /// Annotated new dataset (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write registry rows followed by the annotated new rows
    #[arg(long)]
    pub merged_output: Option<PathBuf>,

    /// Registry duplicate-key policy: reject | first_wins | last_wins.
    /// Registries written by `assign --strategy random` need first_wins or
    /// last_wins when a key repeats
    #[arg(long, default_value = "reject")]
    pub duplicate_keys: String,

    /// Stable identifier already held by another key: warn | reject
    #[arg(long, default_value = "warn")]
    pub stable_collisions: String,

    #[command(flatten)]
    pub columns: ColumnArgs,

    #[command(flatten)]
    pub ids: IdArgs,
}

#[derive(Args, Debug)]
pub struct FrequencyArgs {
    /// Input dataset
    #[arg(short, long)]
    pub input: PathBuf,

    /// Frequency table (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Column holding scaffold keys
    #[arg(long, default_value = DEFAULT_KEY_COLUMN)]
    pub key_column: String,

    /// Keep only the N most frequent scaffolds
    #[arg(long)]
    pub top: Option<usize>,

    /// Count rows without a scaffold under NA_SCAFFOLD instead of dropping them
    #[arg(long)]
    pub keep_absent: bool,

    /// Attach composite labels with a random suffix
    #[arg(long, conflicts_with = "stable_labels")]
    pub labels: bool,

    /// Attach composite labels with a hash-derived suffix
    #[arg(long)]
    pub stable_labels: bool,

    /// Label suffix length
    #[arg(long, default_value_t = DEFAULT_SUFFIX_LENGTH)]
    pub suffix_length: usize,

    /// Seed for reproducible label suffixes
    #[arg(long)]
    pub seed: Option<u64>,
}
