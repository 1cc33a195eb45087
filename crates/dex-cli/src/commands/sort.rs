use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use dex_config::DexConfig;
use serde_json::Value;

use crate::cli::SortArgs;

const PARENT_FALLBACK: &str = "../data/all_pokemon_data.json";
const VERIFY_COUNT: usize = 5;

/// Re-sort a dump in place and print its first entries for a visual check.
///
/// Read and write failures are logged; the file is left as it was.
pub fn handle(args: &SortArgs, config: &DexConfig) -> anyhow::Result<()> {
    let path = resolve_path(
        args.path.as_deref(),
        &config.scrape.output,
        Path::new(PARENT_FALLBACK),
    );

    match dex_core::sort_dump_in_place(&path) {
        Ok(count) => tracing::info!(path = %path.display(), count, "dump sorted and overwritten"),
        Err(error) => {
            tracing::error!(path = %path.display(), %error, "failed to sort dump");
            return Ok(());
        }
    }

    match dex_core::read_dump_values(&path) {
        Ok(records) => print_verification(&mut std::io::stdout().lock(), &path, &records)
            .context("failed to print sorted entries")?,
        Err(error) => tracing::error!(%error, "failed to re-read sorted dump"),
    }

    Ok(())
}

/// An explicit path wins. Otherwise the configured output, then `fallback`
/// when only that one exists.
fn resolve_path(explicit: Option<&Path>, configured: &Path, fallback: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if !configured.exists() && fallback.exists() {
        return fallback.to_path_buf();
    }
    configured.to_path_buf()
}

fn print_verification(out: &mut impl Write, path: &Path, records: &[Value]) -> std::io::Result<()> {
    writeln!(out, "First {VERIFY_COUNT} entries in {}:", path.display())?;
    for line in verify_lines(records) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn verify_lines(records: &[Value]) -> Vec<String> {
    records
        .iter()
        .take(VERIFY_COUNT)
        .enumerate()
        .map(|(i, record)| {
            let id = record
                .get("id")
                .filter(|id| !id.is_null())
                .map_or_else(|| "None".to_string(), ToString::to_string);
            let name = record.get("name").and_then(Value::as_str).unwrap_or("None");
            format!("  {}: ID={id}, Name={name}", i + 1)
        })
        .collect()
}
