use anyhow::Context;
use dex_api::{DexClient, Dispatcher};
use dex_config::DexConfig;

use crate::cli::{GlobalFlags, ScrapeArgs};
use crate::progress::Progress;

/// List, fetch, sort, write.
///
/// Only client setup can fail this command. An empty list ends the run
/// quietly and a failed write is logged; neither is an error.
pub async fn handle(args: &ScrapeArgs, config: &DexConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut api = config.api.clone();
    if let Some(base_url) = &args.base_url {
        api.base_url.clone_from(base_url);
    }
    let output = args.output.as_ref().unwrap_or(&config.scrape.output);
    let concurrency = args.concurrency.unwrap_or(config.scrape.concurrency);

    let client = DexClient::new(&api, &config.scrape.placeholder_sprite)
        .context("failed to build HTTP client")?;

    let urls = client.fetch_pokemon_list().await;
    if urls.is_empty() {
        tracing::warn!("no pokemon URLs to process, exiting");
        return Ok(());
    }

    let progress = Progress::bar(urls.len() as u64, "fetching details", flags.progress);
    let observer = progress.clone();
    let dispatcher = Dispatcher::new(concurrency, config.scrape.progress_every)
        .with_observer(move |_| observer.inc(1));

    let outcome = client.fetch_all(urls, &dispatcher).await;
    progress.finish_clear();

    let summary = outcome.summary;
    tracing::info!(
        failed = summary.failed,
        panicked = summary.panicked,
        "fetched details for {} pokemon in {:.2} seconds",
        summary.succeeded,
        summary.elapsed.as_secs_f64()
    );

    let mut entries = outcome.items;
    tracing::info!("sorting {} pokemon by id", entries.len());
    dex_core::sort_by_id(&mut entries);

    match dex_core::write_dump(output, &entries) {
        Ok(()) => tracing::info!(path = %output.display(), "dump written"),
        Err(error) => tracing::error!(path = %output.display(), %error, "failed to write dump"),
    }

    Ok(())
}
