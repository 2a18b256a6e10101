//! Time primitives for telemetry data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A nanosecond-precision UTC timestamp.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TimeStamp(i64);

impl TimeStamp {
    /// The Unix epoch.
    pub const ZERO: TimeStamp = TimeStamp(0);
    /// The earliest representable timestamp.
    pub const MIN: TimeStamp = TimeStamp(i64::MIN);
    /// The latest representable timestamp.
    pub const MAX: TimeStamp = TimeStamp(i64::MAX);

    /// Create a timestamp from nanoseconds since the Unix epoch.
    pub const fn new(nanos: i64) -> Self {
        Self(nanos)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let now = Utc::now();
        Self(now.timestamp_nanos_opt().unwrap_or(i64::MAX))
    }

    /// Create a timestamp from milliseconds since the Unix epoch.
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis * 1_000_000)
    }

    /// Create a timestamp from seconds since the Unix epoch.
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs * 1_000_000_000)
    }

    /// Nanoseconds since the Unix epoch.
    #[inline]
    pub const fn as_nanos(&self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch.
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0 / 1_000_000
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }

    /// Build a valid range spanning from this timestamp to `other`.
    pub fn range(&self, other: TimeStamp) -> TimeRange {
        TimeRange::new(*self, other).make_valid()
    }

    /// Build a valid range spanning `span` from this timestamp.
    pub fn span_range(&self, span: TimeSpan) -> TimeRange {
        self.range(*self + span)
    }
}

impl Add<TimeSpan> for TimeStamp {
    type Output = TimeStamp;

    fn add(self, rhs: TimeSpan) -> TimeStamp {
        TimeStamp(self.0.saturating_add(rhs.0))
    }
}

impl Sub<TimeSpan> for TimeStamp {
    type Output = TimeStamp;

    fn sub(self, rhs: TimeSpan) -> TimeStamp {
        TimeStamp(self.0.saturating_sub(rhs.0))
    }
}

impl Sub<TimeStamp> for TimeStamp {
    type Output = TimeSpan;

    fn sub(self, rhs: TimeStamp) -> TimeSpan {
        TimeSpan(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datetime().to_rfc3339())
    }
}

/// A signed nanosecond duration.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TimeSpan(i64);

impl TimeSpan {
    /// A zero-length span.
    pub const ZERO: TimeSpan = TimeSpan(0);
    /// One nanosecond.
    pub const NANOSECOND: TimeSpan = TimeSpan(1);
    /// One microsecond.
    pub const MICROSECOND: TimeSpan = TimeSpan(1_000);
    /// One millisecond.
    pub const MILLISECOND: TimeSpan = TimeSpan(1_000_000);
    /// One second.
    pub const SECOND: TimeSpan = TimeSpan(1_000_000_000);
    /// One minute.
    pub const MINUTE: TimeSpan = TimeSpan(60 * 1_000_000_000);

    /// Create a span from nanoseconds.
    pub const fn new(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Create a span from seconds.
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs * 1_000_000_000)
    }

    /// Create a span from milliseconds.
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis * 1_000_000)
    }

    /// The span in nanoseconds.
    #[inline]
    pub const fn as_nanos(&self) -> i64 {
        self.0
    }

    /// The span in whole seconds.
    #[inline]
    pub const fn as_secs(&self) -> i64 {
        self.0 / 1_000_000_000
    }

    /// Check if the span is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.0;
        if nanos.abs() >= 1_000_000_000 {
            write!(f, "{:.3}s", nanos as f64 / 1e9)
        } else if nanos.abs() >= 1_000_000 {
            write!(f, "{:.3}ms", nanos as f64 / 1e6)
        } else {
            write!(f, "{nanos}ns")
        }
    }
}

/// A half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start of the range (inclusive).
    pub start: TimeStamp,
    /// End of the range (exclusive).
    pub end: TimeStamp,
}

impl TimeRange {
    /// A zero range at the epoch.
    pub const ZERO: TimeRange = TimeRange {
        start: TimeStamp::ZERO,
        end: TimeStamp::ZERO,
    };
    /// The maximum representable range.
    pub const MAX: TimeRange = TimeRange {
        start: TimeStamp::MIN,
        end: TimeStamp::MAX,
    };

    /// Create a range from start and end timestamps.
    pub const fn new(start: TimeStamp, end: TimeStamp) -> Self {
        Self { start, end }
    }

    /// The span occupied by the range.
    pub fn span(&self) -> TimeSpan {
        self.end - self.start
    }

    /// Check that the start does not come after the end.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Check if the range has a zero span.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.span().is_zero()
    }

    /// Return a range guaranteed to be valid, swapping bounds if needed.
    pub fn make_valid(&self) -> TimeRange {
        if self.is_valid() {
            *self
        } else {
            self.swap()
        }
    }

    /// A range with the start and end swapped.
    pub fn swap(&self) -> TimeRange {
        TimeRange::new(self.end, self.start)
    }

    /// Check whether two ranges share any instant.
    pub fn overlaps_with(&self, other: &TimeRange) -> bool {
        let a = self.make_valid();
        let b = other.make_valid();
        a.start.max(b.start) < a.end.min(b.end)
    }

    /// Check whether a timestamp falls within the range.
    pub fn contains(&self, stamp: TimeStamp) -> bool {
        stamp >= self.start && stamp < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_arithmetic() {
        let ts = TimeStamp::from_secs(10);
        assert_eq!(ts + TimeSpan::SECOND, TimeStamp::from_secs(11));
        assert_eq!(ts - TimeSpan::from_secs(4), TimeStamp::from_secs(6));
        assert_eq!(TimeStamp::from_secs(12) - ts, TimeSpan::from_secs(2));
    }

    #[test]
    fn test_range_validity() {
        let inverted = TimeRange::new(TimeStamp::from_secs(20), TimeStamp::from_secs(10));
        assert!(!inverted.is_valid());
        let valid = inverted.make_valid();
        assert!(valid.is_valid());
        assert_eq!(valid.start, TimeStamp::from_secs(10));
        assert_eq!(valid.span(), TimeSpan::from_secs(10));
    }

    #[test]
    fn test_range_overlap() {
        let a = TimeRange::new(TimeStamp::from_secs(10), TimeStamp::from_secs(20));
        let b = TimeRange::new(TimeStamp::from_secs(15), TimeStamp::from_secs(25));
        let c = TimeRange::new(TimeStamp::from_secs(20), TimeStamp::from_secs(30));
        assert!(a.overlaps_with(&b));
        assert!(b.overlaps_with(&a));
        // Adjacent half-open ranges do not overlap.
        assert!(!a.overlaps_with(&c));
        assert!(a.overlaps_with(&TimeRange::MAX));
    }

    #[test]
    fn test_range_contains() {
        let r = TimeRange::new(TimeStamp::from_secs(10), TimeStamp::from_secs(20));
        assert!(r.contains(TimeStamp::from_secs(10)));
        assert!(r.contains(TimeStamp::from_secs(19)));
        assert!(!r.contains(TimeStamp::from_secs(20)));
    }

    #[test]
    fn test_zero_range() {
        let r = TimeStamp::from_secs(5).range(TimeStamp::from_secs(5));
        assert!(r.is_zero());
        assert!(r.is_valid());
    }
}
