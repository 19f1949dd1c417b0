// src/services/links.rs

//! Course link extraction from listing pages.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::CourseRef;
use crate::utils::url::course_ref_from_href;

/// Pulls course references out of a catalogue listing page.
pub struct LinkExtractor {
    anchor_sel: Selector,
}

impl LinkExtractor {
    /// Create an extractor matching anchors whose `href` starts with `preview_prefix`.
    pub fn new(preview_prefix: &str) -> Result<Self> {
        let selector = format!("a[href^=\"{}\"]", preview_prefix);
        let anchor_sel =
            Selector::parse(&selector).map_err(|e| AppError::selector(&selector, format!("{e:?}")))?;
        Ok(Self { anchor_sel })
    }

    /// Extract course references in document order.
    ///
    /// Anchors lacking `catoid` or `coid` are skipped. Duplicates are kept.
    pub fn extract(&self, html: &str) -> Vec<CourseRef> {
        let document = Html::parse_document(html);
        document
            .select(&self.anchor_sel)
            .filter_map(|anchor| anchor.value().attr("href"))
            .filter_map(|href| {
                let course = course_ref_from_href(href);
                if course.is_none() {
                    log::debug!("Skipping preview link without catoid/coid: {}", href);
                }
                course
            })
            .collect()
    }
}
