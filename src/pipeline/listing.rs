// src/pipeline/listing.rs

//! Listing pass: walk the paginated catalogue and collect course links.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::models::{Config, CourseRef};
use crate::services::LinkExtractor;
use crate::storage::LocalStorage;
use crate::utils::http::PageFetcher;
use crate::utils::url::listing_url;

use super::pause;

/// Summary of a listing pass.
#[derive(Debug, Default)]
pub struct ListingOutcome {
    /// Every reference found, in page then document order. Not deduplicated.
    pub refs: Vec<CourseRef>,
    pub page_total: usize,
    pub page_failures: usize,
    /// Where `refs` was written
    pub output_path: PathBuf,
}

/// Fetch listing pages `1..=max_pages`, then write all references to the
/// course ids file.
///
/// A page that fails to load contributes nothing; the walk continues.
pub async fn run_listing(
    config: &Config,
    fetcher: &dyn PageFetcher,
    storage: &LocalStorage,
) -> Result<ListingOutcome> {
    let extractor = LinkExtractor::new(&config.catalogue.preview_prefix)?;
    let delay = Duration::from_millis(config.crawler.request_delay_ms);
    let max_pages = config.catalogue.max_pages;

    let mut outcome = ListingOutcome {
        page_total: max_pages as usize,
        ..ListingOutcome::default()
    };

    for page in 1..=max_pages {
        let url = listing_url(&config.catalogue, page)?;

        match fetcher.fetch(&url, &[]).await {
            Ok(html) => {
                let refs = extractor.extract(&html);
                log::info!("Found {} courses on page {}", refs.len(), page);
                outcome.refs.extend(refs);
            }
            Err(error) => {
                outcome.page_failures += 1;
                log::warn!("Failed to fetch listing page {}: {}", page, error);
            }
        }

        log::info!("Scraped page {} of {}", page, max_pages);
        pause(delay).await;
    }

    log::info!("Total courses found: {}", outcome.refs.len());
    outcome.output_path = storage
        .write_json(&config.output.course_ids_file, &outcome.refs)
        .await?;
    log::info!("Course links saved to {}", outcome.output_path.display());

    Ok(outcome)
}
