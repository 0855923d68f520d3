use bopsmap_client::{resolve_search, PostcodeClient};
use bopsmap_core::view::find_reference;
use bopsmap_core::AppConfig;

use crate::load::obtain_collection;

/// Resolve a reference or postcode and print where the map would pan to.
///
/// Rejected input prints its user-facing message and is not an error.
///
/// # Errors
///
/// Returns an error if the collection cannot be obtained or the postcode
/// client cannot be built.
pub(crate) async fn run_search(config: &AppConfig, query: &str, cached: bool) -> anyhow::Result<()> {
    let collection = obtain_collection(config, cached).await?;
    let geocoder = PostcodeClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build postcode client: {e}"))?;

    match resolve_search(&collection, query, &geocoder).await {
        Ok(coords) => {
            println!("{:.6}, {:.6}", coords.longitude, coords.latitude);
            if let Some(feature) = find_reference(&collection, query.trim()) {
                for line in feature.popup_lines() {
                    println!("  {line}");
                }
            }
        }
        Err(e) => println!("{e}"),
    }

    Ok(())
}
