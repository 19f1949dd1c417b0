//! Output persistence.
//!
//! - `local`: atomic JSON/CSV writes under the output directory
//! - `csv`: fixed-column CSV rendering

pub mod csv;
pub mod local;

// Re-export for convenience
pub use self::csv::CSV_COLUMNS;
pub use local::LocalStorage;
