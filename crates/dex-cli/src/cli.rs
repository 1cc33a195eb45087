use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `dexdump` binary.
#[derive(Debug, Parser)]
#[command(name = "dexdump", version, about = "Dump the PokeAPI catalog to one sorted JSON file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only in the log)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Never draw a progress bar
    #[arg(long, global = true)]
    pub no_progress: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Fetch every pokemon and write the sorted dump.
    Scrape(ScrapeArgs),
    /// Re-sort an existing dump by id, in place.
    Sort(SortArgs),
}

/// Arguments for `dexdump scrape`.
#[derive(Clone, Debug, Default, Args)]
pub struct ScrapeArgs {
    /// Output file (defaults to `scrape.output` from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum requests in flight (defaults to `scrape.concurrency`)
    #[arg(short, long, value_parser = parse_positive)]
    pub concurrency: Option<usize>,

    /// API root, e.g. `https://pokeapi.co/api/v2`
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Arguments for `dexdump sort`.
#[derive(Clone, Debug, Default, Args)]
pub struct SortArgs {
    /// Dump to sort (defaults to `scrape.output`, then `../data/all_pokemon_data.json`)
    pub path: Option<PathBuf>,
}

/// Flags shared by all command handlers.
#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub progress: bool,
}

impl Cli {
    /// The progress bar is drawn only on an interactive stderr.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            progress: !self.quiet && !self.no_progress && std::io::stderr().is_terminal(),
        }
    }
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(value) => Ok(value),
        Err(error) => Err(format!("invalid number '{raw}': {error}")),
    }
}
