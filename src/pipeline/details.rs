// src/pipeline/details.rs

//! Detail pass: fetch and parse one preview fragment per course.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::models::{Config, CourseDetail, CourseRef, ScrapedCourse};
use crate::services::DetailExtractor;
use crate::storage::LocalStorage;
use crate::utils::http::{PageFetcher, XHR_HEADER};
use crate::utils::url::detail_url;

use super::pause;

/// Summary of a detail pass.
#[derive(Debug, Default)]
pub struct DetailOutcome {
    /// Successfully scraped courses, in input order
    pub courses: Vec<ScrapedCourse>,
    pub total: usize,
    pub failures: usize,
    /// Where `courses` was written
    pub output_path: PathBuf,
}

/// Scrape every course in `refs`, one at a time, then write the results to
/// the details JSON file.
///
/// Courses whose fetch or extraction fails are logged and left out.
pub async fn run_details(
    config: &Config,
    fetcher: &dyn PageFetcher,
    storage: &LocalStorage,
    refs: &[CourseRef],
) -> Result<DetailOutcome> {
    let extractor = DetailExtractor::new()?;
    let delay = Duration::from_millis(config.crawler.request_delay_ms);
    let interval = config.logging.progress_interval.max(1);
    let total = refs.len();

    let mut outcome = DetailOutcome {
        total,
        ..DetailOutcome::default()
    };

    for (index, course) in refs.iter().enumerate() {
        let processed = index + 1;
        log::info!("Processing course {}/{}: {}", processed, total, course);

        match scrape_course(config, fetcher, &extractor, course).await {
            Ok(details) => {
                log::info!("Successfully scraped: {}", details.title);
                log::debug!("{:?}", details);
                outcome
                    .courses
                    .push(ScrapedCourse::new(course.clone(), details));
            }
            Err(error) => {
                outcome.failures += 1;
                log::warn!("Failed to scrape details for course {}: {}", course, error);
            }
        }

        if processed % interval == 0 {
            log::info!("Progress: {}/{} courses processed", processed, total);
        }

        pause(delay).await;
    }

    log::info!("Total course details scraped: {}", outcome.courses.len());
    outcome.output_path = storage
        .write_json(&config.output.details_json_file, &outcome.courses)
        .await?;
    log::info!("Course details saved to {}", outcome.output_path.display());

    let preview_len = config.logging.preview_count.min(outcome.courses.len());
    if preview_len > 0 {
        let preview = serde_json::to_string_pretty(&outcome.courses[..preview_len])?;
        log::info!("Sample of scraped data:\n{}", preview);
    }

    Ok(outcome)
}

async fn scrape_course(
    config: &Config,
    fetcher: &dyn PageFetcher,
    extractor: &DetailExtractor,
    course: &CourseRef,
) -> Result<CourseDetail> {
    let url = detail_url(&config.catalogue.base_url, course)?;
    let html = fetcher.fetch(&url, &[XHR_HEADER]).await?;
    extractor.extract(&html, &url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::{FakeFetcher, detail_fragment, test_config};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_failed_course_is_dropped() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path(), 1);
        let storage = LocalStorage::new(tmp.path());
        let refs = vec![
            CourseRef::new("12", "1"),
            CourseRef::new("12", "2"),
            CourseRef::new("12", "3"),
        ];
        let base = &config.catalogue.base_url;
        let fetcher = FakeFetcher::default()
            .with_page(detail_url(base, &refs[0]).unwrap(), detail_fragment("ONE 100", "Units: 4"))
            .with_page(detail_url(base, &refs[2]).unwrap(), detail_fragment("THREE 300", "Units: 2"));

        let outcome = run_details(&config, &fetcher, &storage, &refs).await.unwrap();

        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.failures, 1);
        let coids: Vec<&str> = outcome
            .courses
            .iter()
            .map(|c| c.course.course_id.as_str())
            .collect();
        assert_eq!(coids, vec!["1", "3"]);

        let saved: Vec<ScrapedCourse> = storage
            .read_json("course_details.json")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved, outcome.courses);
    }

    #[tokio::test]
    async fn test_extraction_failure_is_dropped() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path(), 1);
        let storage = LocalStorage::new(tmp.path());
        let refs = vec![CourseRef::new("12", "5")];
        let fetcher = FakeFetcher::default().with_page(
            detail_url(&config.catalogue.base_url, &refs[0]).unwrap(),
            "<p>Course not available</p>".to_string(),
        );

        let outcome = run_details(&config, &fetcher, &storage, &refs).await.unwrap();

        assert!(outcome.courses.is_empty());
        assert_eq!(outcome.failures, 1);
    }

    #[tokio::test]
    async fn test_sends_xhr_header() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path(), 1);
        let storage = LocalStorage::new(tmp.path());
        let refs = vec![CourseRef::new("12", "9")];
        let fetcher = FakeFetcher::default();

        run_details(&config, &fetcher, &storage, &refs).await.unwrap();

        let requests = fetcher.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].0.contains("coid=9"));
        assert!(requests[0].1.contains(&(
            "X-Requested-With".to_string(),
            "XMLHttpRequest".to_string()
        )));
    }
}
