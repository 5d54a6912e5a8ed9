use std::collections::BTreeMap;

use super::record::MemoryRecord;

/// Bucket for records whose date has no usable year.
pub const UNKNOWN_YEAR: &str = "Unknown";

/// Records that share a year key, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct YearBin<'a> {
    pub year: String,
    pub records: Vec<&'a MemoryRecord>,
}

/// Year key of a record: the first dash-separated segment of its date when
/// that segment is all digits, otherwise [`UNKNOWN_YEAR`].
pub fn year_key(record: &MemoryRecord) -> &str {
    record
        .date
        .as_deref()
        .and_then(|date| date.trim().split('-').next())
        .filter(|year| !year.is_empty() && year.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(UNKNOWN_YEAR)
}

/// Group records by year key, ascending by key string.
///
/// Digit keys always sort before `"Unknown"`, so undated memories grow at
/// the top of the trunk.
pub fn bin_records(records: &[MemoryRecord]) -> Vec<YearBin<'_>> {
    let mut by_year: BTreeMap<&str, Vec<&MemoryRecord>> = BTreeMap::new();
    for record in records {
        by_year.entry(year_key(record)).or_default().push(record);
    }

    by_year
        .into_iter()
        .map(|(year, records)| YearBin {
            year: year.to_string(),
            records,
        })
        .collect()
}
