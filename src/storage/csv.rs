// src/storage/csv.rs

//! Fixed-column CSV rendering of scraped courses.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{AppError, Result};
use crate::models::ScrapedCourse;

/// Output columns, in order. `url` and `title` are top-level detail keys.
pub const CSV_COLUMNS: [&str; 9] = [
    "url",
    "title",
    "Units",
    "Terms Offered",
    "Registration Restriction",
    "Instruction Mode",
    "Grading Option",
    "GE satisfied",
    "Max Units",
];

/// Render courses as CSV.
///
/// The header line is bare; every data cell is quoted with `"` doubled
/// inside. Lines end with `\n`.
pub fn to_csv_bytes(courses: &[ScrapedCourse]) -> Result<Vec<u8>> {
    let mut buf = CSV_COLUMNS.join(",").into_bytes();
    buf.push(b'\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buf);

    for course in courses {
        writer.write_record(CSV_COLUMNS.iter().map(|column| course.details.column(column)))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))
}
