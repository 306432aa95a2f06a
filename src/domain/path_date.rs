//! Dates derived from note paths

use super::DateFormat;
use chrono::NaiveDate;

/// Resolve the date a note stands for from its path
///
/// With a `folder`, the path must start with it (plain string prefix) and
/// only the remainder is scanned. A candidate only counts when the date,
/// formatted back with `format`, appears somewhere in the full path. This
/// rejects impossible dates such as `1234-56-78` and digit runs that only
/// resemble the format.
///
/// # Examples
///
/// ```
/// use readjour::domain::{resolve_date, DateFormat};
/// use chrono::NaiveDate;
///
/// let format = DateFormat::new("YYYY-MM-DD").unwrap();
/// let date = resolve_date("Daily Notes/2024-10-12.md", &format, Some("Daily Notes"));
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 10, 12));
/// ```
pub fn resolve_date(path: &str, format: &DateFormat, folder: Option<&str>) -> Option<NaiveDate> {
    let scanned = match folder {
        Some(folder) => path.strip_prefix(folder)?,
        None => path,
    };

    format
        .candidates(scanned)
        .filter_map(|candidate| format.parse(candidate))
        .find(|date| path.contains(&format.format(*date)))
}
