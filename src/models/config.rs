//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and request pacing settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Which catalogue to crawl and where it lives
    #[serde(default)]
    pub catalogue: CatalogueConfig,

    /// Output file locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Log verbosity and progress reporting
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.catalogue.max_pages == 0 {
            return Err(AppError::validation("catalogue.max_pages must be > 0"));
        }
        if self.catalogue.catalogue_id.trim().is_empty() {
            return Err(AppError::validation("catalogue.catalogue_id is empty"));
        }
        if self.catalogue.preview_prefix.trim().is_empty() {
            return Err(AppError::validation("catalogue.preview_prefix is empty"));
        }
        url::Url::parse(&self.catalogue.base_url).map_err(|e| {
            AppError::validation(format!(
                "catalogue.base_url '{}' is not a valid URL: {e}",
                self.catalogue.base_url
            ))
        })?;
        if self.logging.progress_interval == 0 {
            return Err(AppError::validation(
                "logging.progress_interval must be > 0",
            ));
        }
        for (key, name) in [
            ("output.course_ids_file", &self.output.course_ids_file),
            ("output.details_json_file", &self.output.details_json_file),
            ("output.details_csv_file", &self.output.details_csv_file),
        ] {
            if name.trim().is_empty() {
                return Err(AppError::validation(format!("{key} is empty")));
            }
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Pause after every listing page and every course, in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Catalogue source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueConfig {
    /// Scheme and host of the catalogue site
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Catalogue edition (`catoid`)
    #[serde(default = "defaults::catalogue_id")]
    pub catalogue_id: String,

    /// Navigation id of the course listing (`navoid`)
    #[serde(default = "defaults::navoid")]
    pub navoid: String,

    /// Listing pages to walk, starting at 1
    #[serde(default = "defaults::max_pages")]
    pub max_pages: u32,

    /// `href` prefix identifying course preview anchors
    #[serde(default = "defaults::preview_prefix")]
    pub preview_prefix: String,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            catalogue_id: defaults::catalogue_id(),
            navoid: defaults::navoid(),
            max_pages: defaults::max_pages(),
            preview_prefix: defaults::preview_prefix(),
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving all output files
    #[serde(default = "defaults::output_dir")]
    pub dir: String,

    #[serde(default = "defaults::course_ids_file")]
    pub course_ids_file: String,

    #[serde(default = "defaults::details_json_file")]
    pub details_json_file: String,

    #[serde(default = "defaults::details_csv_file")]
    pub details_csv_file: String,
}

impl OutputConfig {
    /// Output directory as a path.
    pub fn dir_path(&self) -> PathBuf {
        PathBuf::from(&self.dir)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            course_ids_file: defaults::course_ids_file(),
            details_json_file: defaults::details_json_file(),
            details_csv_file: defaults::details_csv_file(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when neither `--verbose`, `--quiet` nor `RUST_LOG` is given
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Log a progress line every N courses
    #[serde(default = "defaults::progress_interval")]
    pub progress_interval: usize,

    /// Number of scraped courses echoed after the detail pass
    #[serde(default = "defaults::preview_count")]
    pub preview_count: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            progress_interval: defaults::progress_interval(),
            preview_count: defaults::preview_count(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/128.0.0.0 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        1000
    }

    // Catalogue defaults
    pub fn base_url() -> String {
        "https://catalogue.usc.edu".into()
    }
    pub fn catalogue_id() -> String {
        "12".into()
    }
    pub fn navoid() -> String {
        "4245".into()
    }
    pub fn max_pages() -> u32 {
        2
    }
    pub fn preview_prefix() -> String {
        "preview_course_nopop.php".into()
    }

    // Output defaults
    pub fn output_dir() -> String {
        ".".into()
    }
    pub fn course_ids_file() -> String {
        "course_ids.json".into()
    }
    pub fn details_json_file() -> String {
        "course_details.json".into()
    }
    pub fn details_csv_file() -> String {
        "course_details.csv".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
    pub fn progress_interval() -> usize {
        10
    }
    pub fn preview_count() -> usize {
        3
    }
}
