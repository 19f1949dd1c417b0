//! Service layer for the crawler application.
//!
//! This module contains the HTML parsing logic for:
//! - Listing pages (`LinkExtractor`)
//! - Course preview fragments (`DetailExtractor`)
//! - Field label normalization (`labels`)

mod details;
pub mod labels;
mod links;

pub use details::DetailExtractor;
pub use links::LinkExtractor;
