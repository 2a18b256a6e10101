//! Live-tail buffering for a single channel.

use telem_core::{CacheError, CacheResult, DataType, Series, TimeRange, TimeStamp};

use crate::rolling::RollingBuffer;

/// Buffers the most recent streaming samples for one channel and serves
/// approximate ("dirty") reads of the live tail.
#[derive(Debug)]
pub struct DynamicCache {
    capacity: usize,
    buffer: RollingBuffer,
}

impl DynamicCache {
    /// Create a cache whose rolling buffers hold `capacity` samples each.
    pub fn new(capacity: usize, data_type: DataType) -> CacheResult<Self> {
        if capacity == 0 {
            return Err(CacheError::Config(
                "dynamic buffer capacity must be greater than zero".into(),
            ));
        }
        Ok(Self {
            capacity,
            buffer: RollingBuffer::allocate(capacity, data_type, TimeStamp::now()),
        })
    }

    /// Append a batch of series to the live tail.
    ///
    /// Each series fills the current buffer up to its remaining capacity;
    /// the overflow is split into further buffers. Buffers filled along the
    /// way are returned in fill order, and ownership moves to the caller for
    /// archival; the cache retains no reference to them.
    pub fn write(&mut self, batch: &[Series]) -> Vec<RollingBuffer> {
        let mut filled = Vec::new();
        for series in batch {
            self.write_one(series, 0, &mut filled);
        }
        filled
    }

    fn write_one(&mut self, series: &Series, offset: usize, filled: &mut Vec<RollingBuffer>) {
        let pending = series.len() - offset;
        let remaining = self.buffer.remaining();
        if pending <= remaining {
            self.buffer.append(series, offset);
            return;
        }
        self.buffer.append(series, offset);
        let next = RollingBuffer::allocate(
            self.capacity,
            self.buffer.data_type(),
            self.buffer.time_range().end,
        );
        filled.push(std::mem::replace(&mut self.buffer, next));
        self.write_one(series, offset + remaining, filled);
    }

    /// Read the entire current buffer if it is non-empty and overlaps the
    /// query.
    ///
    /// The result is never trimmed to the query bounds; callers must be
    /// prepared to receive samples outside the requested range.
    pub fn dirty_read(&self, query: TimeRange) -> Option<Series> {
        if self.buffer.is_empty() || !self.buffer.time_range().overlaps_with(&query) {
            return None;
        }
        Some(self.buffer.as_series())
    }

    /// The time range currently covered by the live buffer.
    pub fn time_range(&self) -> TimeRange {
        self.buffer.time_range()
    }

    /// Drop the buffered tail, replacing the current buffer with an empty
    /// one.
    pub(crate) fn reset(&mut self) {
        self.buffer =
            RollingBuffer::allocate(self.capacity, self.buffer.data_type(), TimeStamp::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(start: i64, end: i64, samples: &[f64]) -> Series {
        Series::new(
            DataType::Float64,
            TimeRange::new(TimeStamp::from_secs(start), TimeStamp::from_secs(end)),
            samples.to_vec(),
        )
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            DynamicCache::new(0, DataType::Float64),
            Err(CacheError::Config(_))
        ));
    }

    #[test]
    fn test_overflow_splits_buffer() {
        let mut cache = DynamicCache::new(5, DataType::Float64).unwrap();

        let filled = cache.write(&[series(0, 30, &[1.0, 2.0, 3.0])]);
        assert!(filled.is_empty());

        let filled = cache.write(&[series(30, 60, &[4.0, 5.0, 6.0])]);
        assert_eq!(filled.len(), 1);
        assert_eq!(filled[0].as_series().data(), &[1.0, 2.0, 3.0, 4.0, 5.0]);

        let tail = cache.dirty_read(TimeRange::MAX).unwrap();
        assert_eq!(tail.data(), &[6.0]);
    }

    #[test]
    fn test_no_overflow_below_capacity() {
        let mut cache = DynamicCache::new(5, DataType::Float64).unwrap();
        assert!(cache.write(&[series(0, 10, &[1.0])]).is_empty());
        assert!(cache.write(&[series(10, 20, &[2.0, 3.0])]).is_empty());
        assert!(cache.write(&[series(20, 30, &[4.0])]).is_empty());
    }

    #[test]
    fn test_single_write_chains_filled_buffers() {
        let mut cache = DynamicCache::new(2, DataType::Float64).unwrap();
        let filled = cache.write(&[series(0, 50, &[1.0, 2.0, 3.0, 4.0, 5.0])]);
        assert_eq!(filled.len(), 2);
        assert_eq!(filled[0].as_series().data(), &[1.0, 2.0]);
        assert_eq!(filled[1].as_series().data(), &[3.0, 4.0]);
        assert_eq!(cache.dirty_read(TimeRange::MAX).unwrap().data(), &[5.0]);
        // Consecutive buffers tile the series without holes.
        assert_eq!(filled[0].time_range().end, filled[1].time_range().start);
    }

    #[test]
    fn test_exact_fill_stays_current() {
        let mut cache = DynamicCache::new(3, DataType::Float64).unwrap();
        let filled = cache.write(&[series(0, 30, &[1.0, 2.0, 3.0])]);
        assert!(filled.is_empty());
        // The full buffer still serves dirty reads until the next write.
        let tail = cache.dirty_read(TimeRange::MAX).unwrap();
        assert_eq!(tail.data(), &[1.0, 2.0, 3.0]);

        let filled = cache.write(&[series(30, 40, &[4.0])]);
        assert_eq!(filled.len(), 1);
        assert_eq!(cache.dirty_read(TimeRange::MAX).unwrap().data(), &[4.0]);
    }

    #[test]
    fn test_dirty_read_requires_overlap() {
        let mut cache = DynamicCache::new(5, DataType::Float64).unwrap();
        assert!(cache.dirty_read(TimeRange::MAX).is_none());

        cache.write(&[series(10, 20, &[1.0, 2.0])]);
        let query = TimeRange::new(TimeStamp::from_secs(40), TimeStamp::from_secs(50));
        assert!(cache.dirty_read(query).is_none());

        // The whole buffer comes back, not a trimmed slice.
        let query = TimeRange::new(TimeStamp::from_secs(14), TimeStamp::from_secs(16));
        assert_eq!(cache.dirty_read(query).unwrap().data(), &[1.0, 2.0]);
    }
}
