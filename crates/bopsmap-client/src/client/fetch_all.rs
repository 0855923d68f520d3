//! Multi-page load loop for `BopsClient`.

use std::time::Duration;

use bopsmap_core::{project, FeatureCollection, RecordStore};

use crate::error::ClientError;
use crate::normalize::normalize_page;
use crate::pagination::next_page_url;

use super::BopsClient;
use super::MAX_PAGES;

/// Result of one full load.
///
/// Pages that arrived before a failure are kept: `records` and `collection`
/// always reflect everything successfully loaded, and `failure` says why the
/// load stopped early, if it did.
#[derive(Debug)]
pub struct LoadOutcome {
    pub records: RecordStore,
    pub collection: FeatureCollection,
    pub pages_loaded: usize,
    /// Result count the first page's metadata reported, if any.
    pub reported_total: Option<u64>,
    pub failure: Option<ClientError>,
}

impl LoadOutcome {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

impl BopsClient {
    /// Loads every page of search results, following `links.next` until the
    /// API reports no further page.
    ///
    /// Pages are fetched strictly one after another. Each page is folded into
    /// the record store before the next request goes out, and the store is
    /// re-projected to a feature collection once at the end.
    ///
    /// A failed page stops the load; records from earlier pages are kept and
    /// the error is reported in [`LoadOutcome::failure`]. Nothing is retried.
    pub async fn load_all(&self) -> LoadOutcome {
        let mut records = RecordStore::new();
        let mut pages_loaded = 0usize;
        let mut reported_total = None;

        let failure = match self.search_url() {
            Ok(first) => {
                self.follow_pages(first, &mut records, &mut pages_loaded, &mut reported_total)
                    .await
            }
            Err(e) => Some(e),
        };

        match &failure {
            None => tracing::info!(pages = pages_loaded, records = records.len(), "load complete"),
            Some(e) => tracing::error!(
                pages = pages_loaded,
                records = records.len(),
                error = %e,
                "load stopped early; keeping records from earlier pages"
            ),
        }

        let collection = project(&records);
        LoadOutcome {
            records,
            collection,
            pages_loaded,
            reported_total,
            failure,
        }
    }

    async fn follow_pages(
        &self,
        first_url: String,
        records: &mut RecordStore,
        pages_loaded: &mut usize,
        reported_total: &mut Option<u64>,
    ) -> Option<ClientError> {
        let mut next = Some(first_url);

        while let Some(url) = next.take() {
            if *pages_loaded >= MAX_PAGES {
                return Some(ClientError::PaginationLimit {
                    url,
                    max_pages: MAX_PAGES,
                });
            }

            if *pages_loaded > 0 && self.inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.inter_request_delay_ms)).await;
            }

            let page = match self.fetch_page(&url).await {
                Ok(page) => page,
                Err(e) => return Some(e),
            };

            let following = next_page_url(&url, &page);
            let ordinal = *pages_loaded;
            if ordinal == 0 {
                *reported_total = page.reported_total();
            }
            *records = normalize_page(page, ordinal, self.page_size, std::mem::take(records));
            *pages_loaded += 1;
            tracing::debug!(page = ordinal, url = %url, records = records.len(), "page loaded");

            match following {
                Ok(link) => next = link,
                Err(e) => return Some(e),
            }
        }

        None
    }
}
