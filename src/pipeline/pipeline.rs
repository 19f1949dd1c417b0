// src/pipeline/pipeline.rs

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Config;
use crate::storage::LocalStorage;
use crate::utils::http::PageFetcher;
use crate::utils::log::{header, step, summary};

use super::details::run_details;
use super::listing::run_listing;

/// What a full run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub page_total: usize,
    pub page_failures: usize,
    pub course_refs: usize,
    pub courses_scraped: usize,
    pub course_failures: usize,
    pub course_ids_path: PathBuf,
    pub details_json_path: PathBuf,
    pub details_csv_path: PathBuf,
}

/// Run the full pipeline.
///
/// Per-page and per-course failures are absorbed by the passes; any error
/// returned from here is fatal for the run.
pub async fn run_pipeline(
    config: &Config,
    fetcher: &dyn PageFetcher,
    storage: &LocalStorage,
) -> Result<RunSummary> {
    let started_at = Utc::now();
    header("Catalogue crawl starting");

    step(1, 3, "Listing - Collecting course links");
    let listing = run_listing(config, fetcher, storage).await?;

    step(2, 3, "Details - Scraping course details");
    let details = run_details(config, fetcher, storage, &listing.refs).await?;

    step(3, 3, "Export - Writing CSV");
    let details_csv_path = storage
        .write_csv(&config.output.details_csv_file, &details.courses)
        .await?;
    log::info!("Course details saved to {}", details_csv_path.display());

    let run = RunSummary {
        started_at,
        finished_at: Utc::now(),
        page_total: listing.page_total,
        page_failures: listing.page_failures,
        course_refs: listing.refs.len(),
        courses_scraped: details.courses.len(),
        course_failures: details.failures,
        course_ids_path: listing.output_path,
        details_json_path: details.output_path,
        details_csv_path,
    };

    let elapsed = run.finished_at - run.started_at;
    summary(
        "Catalogue crawl complete",
        &[
            (
                "Pages",
                format!("{} ({} failed)", run.page_total, run.page_failures),
            ),
            ("Course links", run.course_refs.to_string()),
            (
                "Courses scraped",
                format!("{} ({} failed)", run.courses_scraped, run.course_failures),
            ),
            ("Elapsed", format!("{}s", elapsed.num_seconds())),
            ("Output", storage.root().display().to_string()),
        ],
    );

    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseRef;
    use crate::pipeline::testing::{FakeFetcher, detail_fragment, test_config};
    use crate::utils::url::{detail_url, listing_url};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_one_failed_course_out_of_three() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path(), 1);
        let storage = LocalStorage::new(tmp.path());
        let base = config.catalogue.base_url.clone();

        let listing = r#"
            <a href="preview_course_nopop.php?catoid=12&coid=1">A</a>
            <a href="preview_course_nopop.php?catoid=12&coid=2">B</a>
            <a href="preview_course_nopop.php?catoid=12&coid=3">C</a>
        "#;
        let fetcher = FakeFetcher::default()
            .with_page(listing_url(&config.catalogue, 1).unwrap(), listing)
            .with_page(
                detail_url(&base, &CourseRef::new("12", "1")).unwrap(),
                detail_fragment("A 100", "Units: 4<br>Satisfies New General Education: GE-A"),
            )
            .with_page(
                detail_url(&base, &CourseRef::new("12", "3")).unwrap(),
                detail_fragment("C 300", "Units: 2"),
            );

        let run = run_pipeline(&config, &fetcher, &storage).await.unwrap();

        assert_eq!(run.course_refs, 3);
        assert_eq!(run.courses_scraped, 2);
        assert_eq!(run.course_failures, 1);
        assert!(run.course_ids_path.exists());
        assert!(run.details_json_path.exists());

        let csv = std::fs::read_to_string(&run.details_csv_path).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("\"A 100\",\"4\""));
        assert!(lines[1].contains("\"GE-A\""));
        assert!(lines[2].contains("\"C 300\",\"2\""));
    }
}
