use bopsmap_client::{BopsClient, ClientError};
use bopsmap_core::AppConfig;

/// Print the document list for one application as JSON.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the request fails for
/// any reason other than an unknown reference.
pub(crate) async fn run_docs(config: &AppConfig, reference: &str) -> anyhow::Result<()> {
    let client = BopsClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build planning API client: {e}"))?;

    match client.fetch_documents(reference).await {
        Ok(docs) => println!("{}", serde_json::to_string_pretty(&docs)?),
        Err(ClientError::NotFound { .. }) => {
            println!("no documents found for application '{reference}'");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
