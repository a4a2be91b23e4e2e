//! Time-window staleness policy.
//!
//! The user selects one window for the whole map; both the push path and
//! the snapshot path apply it. `Realtime` disables filtering entirely.
//! Unknown tokens are rejected at parse time so the policy itself only ever
//! sees the enumerated windows.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::PositionReport;

/// User-selected staleness horizon governing which reports are displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeWindow {
    Realtime,
    M15,
    M30,
    H1,
    H6,
    H12,
    H24,
}

/// Error returned by [`TimeWindow::parse`] for tokens outside the closed set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownWindowToken(pub String);

impl fmt::Display for UnknownWindowToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown time window '{}'. expected one of: realtime | 15m | 30m | 1h | 6h | 12h | 24h",
            self.0
        )
    }
}

impl std::error::Error for UnknownWindowToken {}

impl TimeWindow {
    /// Wire/UI token for this window, as used in `?range=`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Realtime => "realtime",
            TimeWindow::M15 => "15m",
            TimeWindow::M30 => "30m",
            TimeWindow::H1 => "1h",
            TimeWindow::H6 => "6h",
            TimeWindow::H12 => "12h",
            TimeWindow::H24 => "24h",
        }
    }

    pub fn parse(s: &str) -> Result<Self, UnknownWindowToken> {
        match s.trim() {
            "realtime" => Ok(TimeWindow::Realtime),
            "15m" => Ok(TimeWindow::M15),
            "30m" => Ok(TimeWindow::M30),
            "1h" => Ok(TimeWindow::H1),
            "6h" => Ok(TimeWindow::H6),
            "12h" => Ok(TimeWindow::H12),
            "24h" => Ok(TimeWindow::H24),
            other => Err(UnknownWindowToken(other.to_string())),
        }
    }

    /// Validity horizon in seconds; `None` means no filtering.
    pub fn horizon_secs(&self) -> Option<i64> {
        match self {
            TimeWindow::Realtime => None,
            TimeWindow::M15 => Some(15 * 60),
            TimeWindow::M30 => Some(30 * 60),
            TimeWindow::H1 => Some(3_600),
            TimeWindow::H6 => Some(6 * 3_600),
            TimeWindow::H12 => Some(12 * 3_600),
            TimeWindow::H24 => Some(24 * 3_600),
        }
    }

    /// `true` if `report` has aged out of this window at time `now`.
    ///
    /// Monotonic in `(now - report.timestamp)` for every non-realtime
    /// window; `Realtime` never declares a report stale.
    pub fn is_stale(&self, report: &PositionReport, now: i64) -> bool {
        match self.horizon_secs() {
            None => false,
            Some(horizon) => (now - report.timestamp) > horizon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LatLon;

    fn report_at(ts: i64) -> PositionReport {
        PositionReport::new("IW0ABC-9", LatLon::new(44.5, 11.2), ts, "9")
    }

    #[test]
    fn realtime_never_stale() {
        let r = report_at(0);
        assert!(!TimeWindow::Realtime.is_stale(&r, i64::MAX));
    }

    #[test]
    fn horizon_boundary_is_inclusive() {
        // Exactly at the horizon the report is still valid; one second past
        // it is stale.
        let r = report_at(1_000);
        assert!(!TimeWindow::M15.is_stale(&r, 1_000 + 900));
        assert!(TimeWindow::M15.is_stale(&r, 1_000 + 901));
    }

    #[test]
    fn staleness_is_monotonic_in_age() {
        let windows = [
            TimeWindow::M15,
            TimeWindow::M30,
            TimeWindow::H1,
            TimeWindow::H6,
            TimeWindow::H12,
            TimeWindow::H24,
        ];
        let r = report_at(0);
        for w in windows {
            let horizon = w.horizon_secs().unwrap();
            let mut was_stale = false;
            for age in [0, horizon - 1, horizon, horizon + 1, horizon * 2] {
                let stale = w.is_stale(&r, age);
                assert!(!was_stale || stale, "{w:?} went stale then fresh at age {age}");
                was_stale = stale;
            }
            assert!(was_stale, "{w:?} never became stale");
        }
    }

    #[test]
    fn parse_round_trips_all_tokens() {
        for token in ["realtime", "15m", "30m", "1h", "6h", "12h", "24h"] {
            let w = TimeWindow::parse(token).unwrap();
            assert_eq!(w.as_str(), token);
        }
    }

    #[test]
    fn parse_rejects_unknown_token() {
        let err = TimeWindow::parse("7h").unwrap_err();
        assert_eq!(err, UnknownWindowToken("7h".to_string()));
    }

    #[test]
    fn horizons_match_enumerated_seconds() {
        assert_eq!(TimeWindow::M15.horizon_secs(), Some(900));
        assert_eq!(TimeWindow::M30.horizon_secs(), Some(1_800));
        assert_eq!(TimeWindow::H1.horizon_secs(), Some(3_600));
        assert_eq!(TimeWindow::H6.horizon_secs(), Some(21_600));
        assert_eq!(TimeWindow::H12.horizon_secs(), Some(43_200));
        assert_eq!(TimeWindow::H24.horizon_secs(), Some(86_400));
    }
}
