//! Groups photos by the local calendar date of their modification time.

use crate::models::{DateMap, DayUnit, PhotosByDate};
use crate::scanner;
use chrono::{DateTime, Datelike, Local, NaiveDate};
use std::path::Path;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read photo directory: {0}")]
    Scan(#[from] walkdir::Error),
    #[error("date key {0:?} is not YYYY-MM-DD")]
    MalformedDate(String),
}

/// Newest date first; files within a day keep directory enumeration order,
/// which the OS does not guarantee to be stable.
pub fn list_photos_by_date(dir: &Path) -> Result<PhotosByDate, IndexError> {
    let mut grouped = PhotosByDate::new();
    for photo in scanner::scan_photos(dir)? {
        let date = DateTime::<Local>::from(photo.modified)
            .format(DATE_FORMAT)
            .to_string();
        grouped.entry_or_default(date).push(photo.name);
    }
    Ok(grouped)
}

/// Attaches the ISO-8601 week number of each date.
pub fn annotate_with_week(grouped: PhotosByDate) -> Result<DateMap<DayUnit>, IndexError> {
    grouped
        .into_iter()
        .map(|(date, files)| {
            let week = iso_week(&date)?;
            Ok((date, DayUnit { files, week }))
        })
        .collect()
}

pub fn filter_by_month_prefix(grouped: PhotosByDate, month: &str) -> PhotosByDate {
    grouped
        .into_iter()
        .filter(|(date, _)| date.starts_with(month))
        .collect()
}

pub fn iso_week(date: &str) -> Result<u32, IndexError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map(|d| d.iso_week().week())
        .map_err(|_| IndexError::MalformedDate(date.to_string()))
}
