//! # keyed-parquet
//!
//! Command-line front end for key-clustered Parquet files.
//!
//! ## Usage
//!
//! ```bash
//! # Convert a CSV file sorted by its first column
//! keyed-parquet convert events.csv events.parquet --config events.toml
//!
//! # Show row group layout and footer metadata
//! keyed-parquet info events.parquet
//!
//! # Print the rows of one key
//! keyed-parquet lookup events.parquet 42
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
