//! Field label normalization.
//!
//! Every label read from a detail fragment passes through
//! [`normalize_label`] before it is stored.

/// Label the catalogue prints for general-education coverage.
pub const GE_SOURCE_LABEL: &str = "Satisfies New General Education";

/// Stored name for general-education coverage. Always present in output.
pub const GE_SATISFIED: &str = "GE satisfied";

/// Keys owned by the top level of a course detail.
const RESERVED: [&str; 2] = ["url", "title"];

/// Map a raw label to the key it is stored under.
///
/// Returns `None` for labels that would shadow `url` or `title`.
pub fn normalize_label(raw: &str) -> Option<&str> {
    match raw {
        GE_SOURCE_LABEL => Some(GE_SATISFIED),
        reserved if RESERVED.iter().any(|r| *r == reserved) => None,
        other => Some(other),
    }
}
