//! Loading the planning-applications collection, from the API or the cache.

use bopsmap_client::{BopsClient, LoadOutcome};
use bopsmap_core::{AppConfig, FeatureCache, FeatureCollection};

/// Fetch every page and optionally refresh the cache.
///
/// Prints a one-line summary, or the whole collection as JSON when
/// `geojson` is set. A load that stopped early still prints what arrived,
/// but the cache is only overwritten by a complete load.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the cache cannot be
/// written, or the collection cannot be serialized.
pub(crate) async fn run_load(
    config: &AppConfig,
    geojson: bool,
    write_cache: bool,
) -> anyhow::Result<()> {
    let outcome = fetch_collection(config).await?;
    let collection = &outcome.collection;

    if write_cache {
        let cache = FeatureCache::new(&config.cache_path);
        if outcome.is_complete() {
            cache.store(collection)?;
            tracing::info!(path = %cache.path().display(), features = collection.len(), "cache updated");
        } else {
            tracing::warn!(
                path = %cache.path().display(),
                features = collection.len(),
                "load incomplete; keeping the existing cache"
            );
        }
    }

    if geojson {
        println!("{}", serde_json::to_string_pretty(collection)?);
    } else {
        println!("{}", summary_line(&outcome));
    }

    Ok(())
}

/// One-line summary of a load, including the API's own total when it
/// reported one.
pub(crate) fn summary_line(outcome: &LoadOutcome) -> String {
    let collection = &outcome.collection;
    let located = collection.iter().filter(|f| f.coordinates().is_some()).count();
    match outcome.reported_total {
        Some(total) => format!(
            "loaded {} of {total} applications ({located} with a map location)",
            collection.len()
        ),
        None => format!(
            "loaded {} applications ({located} with a map location)",
            collection.len()
        ),
    }
}

/// Runs a full load against the configured API.
///
/// # Errors
///
/// Returns an error only if the HTTP client cannot be built. Page failures
/// are reported on stderr and leave a partial outcome.
pub(crate) async fn fetch_collection(config: &AppConfig) -> anyhow::Result<LoadOutcome> {
    let client = BopsClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build planning API client: {e}"))?;

    let outcome = client.load_all().await;
    if let Some(failure) = &outcome.failure {
        eprintln!(
            "warning: load stopped after {} page(s): {failure}",
            outcome.pages_loaded
        );
    }
    Ok(outcome)
}

/// Returns the cached collection when `cached` is set and a cache exists,
/// otherwise fetches from the API.
///
/// # Errors
///
/// Same as [`fetch_collection`].
pub(crate) async fn obtain_collection(
    config: &AppConfig,
    cached: bool,
) -> anyhow::Result<FeatureCollection> {
    if cached {
        let cache = FeatureCache::new(&config.cache_path);
        if let Some(collection) = cache.load() {
            tracing::debug!(path = %cache.path().display(), features = collection.len(), "using cached collection");
            return Ok(collection);
        }
        tracing::info!(path = %cache.path().display(), "no usable cache; fetching from the API");
    }
    Ok(fetch_collection(config).await?.collection)
}
