use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod config;
mod convert;
mod info;
mod lookup;
mod profile;

pub use profile::Profile;

/// keyed-parquet - Key-clustered Parquet writer and reader
#[derive(Parser)]
#[command(name = "keyed-parquet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Writer profile for trading speed against compression.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ProfileArg {
    /// Prioritize speed over compression
    Fast,
    /// Balance between speed and compression
    #[default]
    Balanced,
    /// Maximum compression, slower conversion
    MaxCompression,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Fast => Profile::Fast,
            ProfileArg::Balanced => Profile::Balanced,
            ProfileArg::MaxCompression => Profile::MaxCompression,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a CSV file (with header) into a keyed Parquet file
    Convert {
        /// Input CSV file path; rows should be sorted by the first column
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output Parquet file path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Writer profile (fast, balanced, max-compression)
        #[arg(short = 'p', long, default_value = "balanced", value_enum)]
        profile: ProfileArg,

        /// Load the row schema and writer settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Compression level for the selected codec
        #[arg(short = 'c', long)]
        compression_level: Option<i32>,

        /// Reject rows whose key is smaller than the previous key
        #[arg(long)]
        strict: bool,
    },

    /// Display row group layout and footer metadata of a keyed file
    Info {
        /// Input Parquet file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the rows stored under one key
    Lookup {
        /// Input Parquet file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Key value, parsed with the key column's type
        #[arg(value_name = "KEY")]
        key: String,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            profile,
            config,
            compression_level,
            strict,
        } => convert::run(
            input,
            output,
            Profile::from(profile),
            config,
            compression_level,
            strict,
        ),
        Commands::Info { file } => info::run(file),
        Commands::Lookup { file, key } => lookup::run(file, key),
    }
}
