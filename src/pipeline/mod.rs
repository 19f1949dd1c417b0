//! Pipeline entry points for crawler operations.
//!
//! - `run_listing`: Walk listing pages and save course references
//! - `run_details`: Scrape each referenced course and save the results
//! - `run_export`: Rebuild the CSV from saved details
//! - `run_pipeline`: Listing → Details → CSV

pub mod details;
pub mod export;
pub mod listing;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use details::{DetailOutcome, run_details};
pub use export::run_export;
pub use listing::{ListingOutcome, run_listing};
pub use pipeline::{RunSummary, run_pipeline};

use std::time::Duration;

/// Courtesy pause between requests.
async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
