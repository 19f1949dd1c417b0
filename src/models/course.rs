//! Course data structures.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A course preview link found on a listing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CourseRef {
    /// Catalogue edition (`catoid`)
    #[serde(rename = "catoid")]
    pub catalogue_id: String,

    /// Course within the catalogue (`coid`)
    #[serde(rename = "coid")]
    pub course_id: String,
}

impl CourseRef {
    pub fn new(catalogue_id: impl Into<String>, course_id: impl Into<String>) -> Self {
        Self {
            catalogue_id: catalogue_id.into(),
            course_id: course_id.into(),
        }
    }
}

impl fmt::Display for CourseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.catalogue_id, self.course_id)
    }
}

/// Metadata extracted from one course detail fragment.
///
/// `fields` holds whatever labels the catalogue printed (`Units`,
/// `Terms Offered`, ...). It is flattened next to `url` and `title` when
/// serialized, so the JSON object looks like `{url, title, Units, ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CourseDetail {
    /// Detail URL the fragment was fetched from
    pub url: String,

    /// Course heading
    pub title: String,

    /// Label to value, keyed by normalized label
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl CourseDetail {
    /// Value of a labelled field, or `""` when absent.
    pub fn field(&self, label: &str) -> &str {
        self.fields.get(label).map(String::as_str).unwrap_or("")
    }

    /// Value for an output column: `url` and `title` come from the top
    /// level, everything else from `fields`.
    pub fn column(&self, name: &str) -> &str {
        match name {
            "url" => &self.url,
            "title" => &self.title,
            other => self.field(other),
        }
    }
}

/// A course reference joined with its scraped details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapedCourse {
    #[serde(flatten)]
    pub course: CourseRef,

    pub details: CourseDetail,
}

impl ScrapedCourse {
    pub fn new(course: CourseRef, details: CourseDetail) -> Self {
        Self { course, details }
    }
}
