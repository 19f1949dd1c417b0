// src/utils/url.rs

//! Catalogue URL construction and query parsing.

use url::Url;
use url::form_urlencoded;

use crate::error::Result;
use crate::models::{CatalogueConfig, CourseRef};

/// Path of the paginated course listing.
pub const LISTING_PATH: &str = "/content.php";

/// Path of the AJAX course preview fragment.
pub const DETAIL_PATH: &str = "/ajax/preview_course.php";

/// Build the listing URL for a 1-based page number.
///
/// The catalogue expects `catoid` twice; the filter keys are sent
/// percent-encoded (`filter%5Bcpage%5D=2`).
///
/// # Examples
/// ```
/// use catalogue_crawler::models::CatalogueConfig;
/// use catalogue_crawler::utils::url::listing_url;
///
/// let url = listing_url(&CatalogueConfig::default(), 2).unwrap();
/// assert!(url.starts_with("https://catalogue.usc.edu/content.php?catoid=12&catoid=12"));
/// assert!(url.ends_with("filter%5Bcpage%5D=2"));
/// ```
pub fn listing_url(catalogue: &CatalogueConfig, page: u32) -> Result<String> {
    let mut url = Url::parse(&catalogue.base_url)?.join(LISTING_PATH)?;
    url.query_pairs_mut()
        .append_pair("catoid", &catalogue.catalogue_id)
        .append_pair("catoid", &catalogue.catalogue_id)
        .append_pair("navoid", &catalogue.navoid)
        .append_pair("filter[item_type]", "3")
        .append_pair("filter[only_active]", "1")
        .append_pair("filter[3]", "1")
        .append_pair("filter[cpage]", &page.to_string());
    Ok(url.into())
}

/// Build the detail fragment URL for a course.
///
/// # Examples
/// ```
/// use catalogue_crawler::models::CourseRef;
/// use catalogue_crawler::utils::url::detail_url;
///
/// assert_eq!(
///     detail_url("https://catalogue.usc.edu", &CourseRef::new("12", "99")).unwrap(),
///     "https://catalogue.usc.edu/ajax/preview_course.php?catoid=12&coid=99&show"
/// );
/// ```
pub fn detail_url(base_url: &str, course: &CourseRef) -> Result<String> {
    let mut url = Url::parse(base_url)?.join(DETAIL_PATH)?;
    url.query_pairs_mut()
        .append_pair("catoid", &course.catalogue_id)
        .append_pair("coid", &course.course_id)
        .append_key_only("show");
    Ok(url.into())
}

/// Read `catoid` and `coid` from the query string of a preview link.
///
/// Works on relative hrefs. Returns `None` when either parameter is
/// missing or empty.
pub fn course_ref_from_href(href: &str) -> Option<CourseRef> {
    let (_, query) = href.split_once('?')?;
    let query = query.split('#').next().unwrap_or("");

    let mut catalogue_id = None;
    let mut course_id = None;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match &*key {
            "catoid" if catalogue_id.is_none() => catalogue_id = Some(value.into_owned()),
            "coid" if course_id.is_none() => course_id = Some(value.into_owned()),
            _ => {}
        }
    }

    Some(CourseRef::new(catalogue_id?, course_id?))
}
