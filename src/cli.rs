use std::path::PathBuf;

use clap::Parser;

use crate::sort::SortField;

/// Reorders a pacman mirror list using the remote mirror status report
#[derive(Parser, Debug)]
#[command(name = "mlsort", version, about)]
pub struct Args {
    /// TOML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mirror list to read [default: /etc/pacman.d/mirrorlist]
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Where to write the result, `-` for stdout
    #[arg(short, long, value_name = "DEST", default_value = "-")]
    pub output: String,

    /// Append to the output file instead of overwriting it
    #[arg(short, long)]
    pub append: bool,

    /// Field to sort by
    #[arg(short, long, value_enum, default_value_t = SortField::Score)]
    pub sort: SortField,

    /// Invert the field's default sort direction
    #[arg(short, long)]
    pub reverse: bool,

    /// Only keep the first N servers
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,

    /// Use servers that are not fully synced instead of the complete ones
    #[arg(long)]
    pub incomplete: bool,

    /// Mirror status endpoint
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Show more output
    #[arg(short, long)]
    pub verbose: bool,
}
