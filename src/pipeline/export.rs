// src/pipeline/export.rs

//! Offline CSV export from a saved details file.

use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::models::{Config, ScrapedCourse};
use crate::storage::LocalStorage;

/// Rebuild the CSV file from the details JSON written by an earlier run.
pub async fn run_export(config: &Config, storage: &LocalStorage) -> Result<PathBuf> {
    let key = &config.output.details_json_file;
    let courses: Vec<ScrapedCourse> = storage.read_json(key).await?.ok_or_else(|| {
        AppError::config(format!(
            "{} not found. Run 'run' first.",
            storage.path(key).display()
        ))
    })?;

    log::info!("Loaded {} courses from {}", courses.len(), key);
    let path = storage
        .write_csv(&config.output.details_csv_file, &courses)
        .await?;
    log::info!("Course details saved to {}", path.display());

    Ok(path)
}
