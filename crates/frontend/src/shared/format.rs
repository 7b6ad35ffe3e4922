//! Display formatting for file metadata and timestamps

use chrono::{DateTime, Utc};

/// Human-readable file size: `"512 B"`, `"20.00 KB"`, `"1.50 MB"`
pub fn format_file_size(size: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = size as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", size as u64, UNITS[unit])
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}

/// Example: 2024-03-15T14:02:26Z -> "15.03.2024 14:02"
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%d.%m.%Y %H:%M").to_string()
}

/// "1 row" / "12 rows"
pub fn pluralize(count: u64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(20 * 1024), "20.00 KB");
        assert_eq!(format_file_size(1536 * 1024), "1.50 MB");
    }

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(format_timestamp(&at), "15.03.2024 14:02");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "row", "rows"), "1 row");
        assert_eq!(pluralize(0, "row", "rows"), "0 rows");
        assert_eq!(pluralize(12, "lead", "leads"), "12 leads");
    }
}
