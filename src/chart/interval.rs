use serde::{Deserialize, Serialize};
use std::fmt;

/// Chart bucket sizes the dashboard can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    #[serde(rename = "1s")]
    OneSecond,
    #[serde(rename = "1m")]
    OneMinute,
    #[default]
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
}

// (label, interval, count, duration_ms); first match wins.
static TABLE: [(&str, Interval, usize, i64); 5] = [
    ("1s", Interval::OneSecond, 60, 1_000),
    ("1m", Interval::OneMinute, 60, 60_000),
    ("5m", Interval::FiveMinutes, 30, 300_000),
    ("15m", Interval::FifteenMinutes, 20, 900_000),
    ("1h", Interval::OneHour, 24, 3_600_000),
];

impl Interval {
    pub const ALL: [Interval; 5] = [
        Interval::OneSecond,
        Interval::OneMinute,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::OneHour,
    ];

    /// Unknown labels fall back to `5m`.
    pub fn resolve(label: &str) -> Self {
        let label = label.trim();
        TABLE
            .iter()
            .find(|(l, ..)| *l == label)
            .map(|(_, interval, ..)| *interval)
            .unwrap_or_default()
    }

    fn row(&self) -> &'static (&'static str, Interval, usize, i64) {
        // every variant has a row
        TABLE
            .iter()
            .find(|(_, interval, ..)| interval == self)
            .unwrap_or(&TABLE[2])
    }

    pub fn label(&self) -> &'static str {
        self.row().0
    }

    pub fn count(&self) -> usize {
        self.row().2
    }

    pub fn duration_ms(&self) -> i64 {
        self.row().3
    }

    /// Aggregator percent-change window used as this interval's signal.
    pub fn signal_window(&self) -> &'static str {
        match self {
            Interval::OneSecond | Interval::OneMinute | Interval::FiveMinutes => "m5",
            Interval::FifteenMinutes | Interval::OneHour => "h1",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `(count, duration_ms)` for a requested label.
pub fn resolve(label: &str) -> (usize, i64) {
    let interval = Interval::resolve(label);
    (interval.count(), interval.duration_ms())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        assert_eq!(resolve("1s"), (60, 1_000));
        assert_eq!(resolve("1m"), (60, 60_000));
        assert_eq!(resolve("5m"), (30, 300_000));
        assert_eq!(resolve("15m"), (20, 900_000));
        assert_eq!(resolve("1h"), (24, 3_600_000));
    }

    #[test]
    fn test_unknown_labels_default_to_five_minutes() {
        for label in ["", "4h", "1d", "1M", "5 m", "garbage"] {
            assert_eq!(Interval::resolve(label), Interval::FiveMinutes, "label {:?}", label);
            assert_eq!(resolve(label), (30, 300_000));
        }
    }

    #[test]
    fn test_labels_round_trip_through_resolve() {
        for interval in Interval::ALL {
            assert_eq!(Interval::resolve(interval.label()), interval);
            assert_eq!(interval.to_string(), interval.label());
        }
        assert_eq!(Interval::resolve(" 1h "), Interval::OneHour);
    }

    #[test]
    fn test_signal_windows() {
        assert_eq!(Interval::OneSecond.signal_window(), "m5");
        assert_eq!(Interval::FiveMinutes.signal_window(), "m5");
        assert_eq!(Interval::FifteenMinutes.signal_window(), "h1");
        assert_eq!(Interval::OneHour.signal_window(), "h1");
    }
}
