use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// Encodes a `namespace/name` path for use as a single `:id` URL segment.
pub fn encode_path(path: &str) -> String {
    path.replace('/', "%2F")
}

/// Timestamps in the `2023-01-01T00:00:00Z` shape GitLab filters accept.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Half-open creation window `[year-01-01T00:00:00Z, year+1-01-01T00:00:00Z)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl YearWindow {
    pub fn new(year: i32) -> Option<Self> {
        let start_of = |y: i32| Utc.with_ymd_and_hms(y, 1, 1, 0, 0, 0).single();

        Some(Self {
            since: start_of(year)?,
            until: start_of(year.checked_add(1)?)?,
        })
    }

    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        *at >= self.since && *at < self.until
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_path_test() {
        assert_eq!(encode_path("team/sub/repo"), "team%2Fsub%2Frepo");
        assert_eq!(encode_path("repo"), "repo");
    }

    #[test]
    fn year_window_bounds() {
        let window = YearWindow::new(2023).unwrap();

        assert_eq!(format_timestamp(&window.since), "2023-01-01T00:00:00Z");
        assert_eq!(format_timestamp(&window.until), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn year_window_is_half_open() {
        let window = YearWindow::new(2023).unwrap();
        let at = |s: &str| s.parse::<DateTime<Utc>>().unwrap();

        assert!(window.contains(&at("2023-01-01T00:00:00Z")));
        assert!(window.contains(&at("2023-12-31T23:59:59Z")));
        assert!(!window.contains(&at("2024-01-01T00:00:00Z")));
        assert!(!window.contains(&at("2022-12-31T23:59:59Z")));
    }

    #[test]
    fn year_window_rejects_out_of_range() {
        assert!(YearWindow::new(i32::MAX).is_none());
    }
}
