// src/models/mod.rs

//! Domain models for the crawler application.

mod config;
mod course;

// Re-export all public types
pub use config::{CatalogueConfig, Config, CrawlerConfig, LoggingConfig, OutputConfig};
pub use course::{CourseDetail, CourseRef, ScrapedCourse};
