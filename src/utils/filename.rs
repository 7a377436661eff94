use crate::error::{ProcessingError, Result};
use crate::utils::constants::{REPORT_FILE_PREFIX, REPORT_OUTPUT_DIR};
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

/// Extract the batch date from a file name such as `journeys_2024-03-15.csv`.
///
/// Accepts `YYYY-MM-DD`, `YYYY_MM_DD` and `YYYYMMDD` anywhere in the file stem;
/// the first candidate that is a real calendar date wins.
pub fn extract_batch_date(path: &Path) -> Result<NaiveDate> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ProcessingError::InvalidFormat("Invalid file path".to_string()))?;

    let bytes = stem.as_bytes();
    for start in 0..bytes.len() {
        if start > 0 && bytes[start - 1].is_ascii_digit() {
            continue;
        }

        for (width, format) in [(10, "%Y-%m-%d"), (10, "%Y_%m_%d"), (8, "%Y%m%d")] {
            let Some(candidate) = stem.get(start..start + width) else {
                continue;
            };
            let followed_by_digit = bytes
                .get(start + width)
                .is_some_and(|b| b.is_ascii_digit());

            if !candidate.starts_with(|c: char| c.is_ascii_digit()) || followed_by_digit {
                continue;
            }

            if let Ok(date) = NaiveDate::parse_from_str(candidate, format) {
                return Ok(date);
            }
        }
    }

    Err(ProcessingError::InvalidFormat(format!(
        "No batch date found in file name: {}",
        stem
    )))
}

/// Generate default report filename with format: journey-report-{YYMMDD}.json
pub fn default_report_filename(batch_date: NaiveDate) -> PathBuf {
    let year = batch_date.year() % 100; // Get last 2 digits of year
    let filename = format!(
        "{}-{:02}{:02}{:02}.json",
        REPORT_FILE_PREFIX,
        year,
        batch_date.month(),
        batch_date.day()
    );
    PathBuf::from(REPORT_OUTPUT_DIR).join(filename)
}
