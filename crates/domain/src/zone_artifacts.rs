//! Naming of the files a recursive transfer leaves on disk.

use super::{Label, ZoneRecord};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// `date(1)`-style stamp, e.g. `Fri Jan  5 09:03:07 UTC 2024`.
const RUN_TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Z %Y";

const RUN_DIRECTORY_SUFFIX: &str = "_recaxfr";
const ZONE_FILE_EXTENSION: &str = ".zone";

/// `<root-label-without-leading-dot>_<timestamp>_recaxfr`, spaces in the
/// timestamp replaced by dashes.
pub fn run_directory_name<Tz>(root: &Label, started_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let stamp = started_at
        .format(RUN_TIMESTAMP_FORMAT)
        .to_string()
        .replace(' ', "-");
    format!(
        "{}_{}{}",
        root.without_leading_dot(),
        stamp,
        RUN_DIRECTORY_SUFFIX
    )
}

pub fn zone_file_name(label: &Label) -> String {
    format!("{}{}", label.without_trailing_dot(), ZONE_FILE_EXTENSION)
}

/// Zone file body: one canonical record per line, in transfer order.
/// Returns `None` when there is nothing to write.
pub fn render_zone(records: &[ZoneRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }
    let mut body = String::with_capacity(records.iter().map(|r| r.text.len() + 1).sum());
    for record in records {
        body.push_str(&record.text);
        body.push('\n');
    }
    Some(body)
}
