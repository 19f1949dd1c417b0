// src/services/details.rs

//! Course detail extraction from AJAX preview fragments.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::CourseDetail;
use crate::services::labels::{GE_SATISFIED, normalize_label};

/// Content container inside a preview fragment.
const CONTAINER_SELECTOR: &str = "body > table > tbody > tr > td > div:nth-child(2)";

/// Course title element inside the container.
const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Turns a preview fragment into a [`CourseDetail`].
pub struct DetailExtractor {
    container_sel: Selector,
    heading_sel: Selector,
}

impl DetailExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            container_sel: Self::parse_selector(CONTAINER_SELECTOR)?,
            heading_sel: Self::parse_selector(HEADING_SELECTOR)?,
        })
    }

    /// Extract title and labelled fields from a fragment fetched from `url`.
    ///
    /// Only text sitting directly inside the container is read; text in
    /// nested elements is ignored. `GE satisfied` is always present.
    pub fn extract(&self, html: &str, url: &str) -> Result<CourseDetail> {
        let document = Html::parse_document(html);
        let container = document
            .select(&self.container_sel)
            .next()
            .ok_or_else(|| AppError::extract(url, "course container not found"))?;

        let title = container
            .select(&self.heading_sel)
            .next()
            .map(|heading| heading.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let mut fields = Self::collect_fields(container);
        fields.entry(GE_SATISFIED.to_string()).or_default();

        Ok(CourseDetail {
            url: url.to_string(),
            title,
            fields,
        })
    }

    fn collect_fields(container: ElementRef<'_>) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();

        for child in container.children() {
            let Some(text) = child.value().as_text() else {
                continue;
            };
            let Some((raw_label, value)) = split_field(text) else {
                continue;
            };
            match normalize_label(raw_label) {
                Some(label) => {
                    fields.insert(label.to_string(), value.to_string());
                }
                None => log::debug!("Dropping reserved label '{}'", raw_label),
            }
        }

        fields
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

/// Split `"Label: value"` on the first colon; both sides trimmed and non-empty.
fn split_field(text: &str) -> Option<(&str, &str)> {
    let (label, value) = text.trim().split_once(':')?;
    let (label, value) = (label.trim(), value.trim());
    if label.is_empty() || value.is_empty() {
        return None;
    }
    Some((label, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://catalogue.usc.edu/ajax/preview_course.php?catoid=12&coid=99&show";

    fn fragment(inner: &str) -> String {
        format!(
            "<table><tr><td><div>nav</div><div>{}</div></td></tr></table>",
            inner
        )
    }

    fn extract(inner: &str) -> CourseDetail {
        DetailExtractor::new()
            .unwrap()
            .extract(&fragment(inner), URL)
            .unwrap()
    }

    #[test]
    fn test_units_and_ge() {
        let detail = extract(
            "<h3>WRIT 150 Writing and Critical Reasoning</h3>\
             <br>Units: 4<br>\
             <strong>ignored</strong>Satisfies New General Education: GE Category I<br>",
        );

        assert_eq!(detail.url, URL);
        assert_eq!(detail.title, "WRIT 150 Writing and Critical Reasoning");
        assert_eq!(detail.field("Units"), "4");
        assert_eq!(detail.field("GE satisfied"), "GE Category I");
        assert!(!detail.fields.contains_key("Satisfies New General Education"));
    }

    #[test]
    fn test_ge_defaults_to_empty() {
        let detail = extract("<h3>BISC 120</h3>Units: 4<br>Terms Offered: Fall, Spring");

        assert_eq!(detail.fields.get("GE satisfied"), Some(&String::new()));
        assert_eq!(detail.field("Terms Offered"), "Fall, Spring");
    }

    #[test]
    fn test_splits_on_first_colon_only() {
        let detail = extract("<h3>X</h3>Registration Restriction: Open to: majors only");
        assert_eq!(detail.field("Registration Restriction"), "Open to: majors only");
    }

    #[test]
    fn test_skips_empty_sides_and_plain_text() {
        let detail = extract("<h3>X</h3>Units:<br>: 4<br>Just a description.<br>Max Units: 8.0");

        assert!(!detail.fields.contains_key("Units"));
        assert!(!detail.fields.contains_key(""));
        assert_eq!(detail.field("Max Units"), "8.0");
        // Max Units + GE satisfied
        assert_eq!(detail.fields.len(), 2);
    }

    #[test]
    fn test_nested_text_ignored() {
        let detail = extract("<h3>X</h3><p>Units: 2</p><em>Grading Option: Letter</em>");
        assert!(!detail.fields.contains_key("Units"));
        assert!(!detail.fields.contains_key("Grading Option"));
    }

    #[test]
    fn test_last_label_wins() {
        let detail = extract("<h3>X</h3>Units: 2<br>Units: 4");
        assert_eq!(detail.field("Units"), "4");
    }

    #[test]
    fn test_reserved_labels_do_not_clobber_top_level() {
        let detail = extract("<h3>Real Title</h3>title: Fake<br>url: elsewhere");
        assert_eq!(detail.title, "Real Title");
        assert_eq!(detail.url, URL);
        assert!(!detail.fields.contains_key("title"));
    }

    #[test]
    fn test_missing_container_is_error() {
        let extractor = DetailExtractor::new().unwrap();
        let result = extractor.extract("<p>Course not found</p>", URL);
        assert!(matches!(result, Err(AppError::Extract { .. })));
    }

    #[test]
    fn test_missing_heading_gives_empty_title() {
        let detail = extract("Units: 4");
        assert_eq!(detail.title, "");
        assert_eq!(detail.field("Units"), "4");
    }
}
