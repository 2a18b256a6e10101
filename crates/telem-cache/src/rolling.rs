//! Fixed-capacity rolling sample buffer.

use telem_core::{DataType, Series, TimeRange, TimeSpan, TimeStamp};

/// Fixed-capacity, append-only buffer holding the live tail of a channel.
///
/// The buffer tracks the time range its samples currently span. Once full
/// it is replaced by its owner, never mutated further.
#[derive(Debug)]
pub struct RollingBuffer {
    data: Vec<f64>,
    capacity: usize,
    data_type: DataType,
    time_range: TimeRange,
}

impl RollingBuffer {
    /// Allocate an empty buffer whose range starts at `start`.
    pub(crate) fn allocate(capacity: usize, data_type: DataType, start: TimeStamp) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
            data_type,
            time_range: TimeRange::new(start, start),
        }
    }

    /// Append samples from `series` starting at `offset`, up to the
    /// remaining capacity. Returns the number of samples consumed.
    ///
    /// The buffer range is advanced to cover the consumed prefix; the first
    /// append to an empty buffer also pins the range start to the series, so
    /// the range always describes exactly the samples held.
    pub(crate) fn append(&mut self, series: &Series, offset: usize) -> usize {
        let pending = series.len().saturating_sub(offset);
        let count = pending.min(self.remaining());
        if count == 0 {
            return 0;
        }
        if self.data.is_empty() {
            self.time_range.start = boundary(series, offset);
            self.time_range.end = self.time_range.start;
        }
        self.data
            .extend_from_slice(&series.data()[offset..offset + count]);
        let end = boundary(series, offset + count);
        if end > self.time_range.end {
            self.time_range.end = end;
        }
        count
    }

    /// The number of samples held.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The maximum number of samples the buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of samples that can still be appended.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }

    /// Check if the buffer is filled to capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    /// The time range currently spanned by the buffer.
    #[inline]
    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// The sample encoding of the buffer.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Snapshot the current contents as a series.
    pub fn as_series(&self) -> Series {
        Series::new(self.data_type, self.time_range, self.data.clone())
    }

    /// Consume the buffer, handing its contents off as a series.
    pub fn into_series(self) -> Series {
        Series::new(self.data_type, self.time_range, self.data)
    }
}

/// The timestamp of the boundary before sample `index`, interpolated over
/// the series range. Indexes at or past the end map to the range end.
fn boundary(series: &Series, index: usize) -> TimeStamp {
    let range = series.time_range().make_valid();
    if series.is_empty() || index >= series.len() {
        return range.end;
    }
    let nanos = (range.span().as_nanos() as i128 * index as i128) / series.len() as i128;
    range.start + TimeSpan::new(nanos as i64)
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
    fn test_append_within_capacity() {
        let mut buf = RollingBuffer::allocate(5, DataType::Float64, TimeStamp::now());
        let consumed = buf.append(&series(0, 30, &[1.0, 2.0, 3.0]), 0);
        assert_eq!(consumed, 3);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.remaining(), 2);
        assert!(!buf.is_full());
        // Range pinned to the written samples.
        assert_eq!(buf.time_range().start, TimeStamp::from_secs(0));
        assert_eq!(buf.time_range().end, TimeStamp::from_secs(30));
    }

    #[test]
    fn test_append_clamps_to_remaining() {
        let mut buf = RollingBuffer::allocate(2, DataType::Float64, TimeStamp::now());
        let consumed = buf.append(&series(0, 40, &[1.0, 2.0, 3.0, 4.0]), 0);
        assert_eq!(consumed, 2);
        assert!(buf.is_full());
        // End interpolates to the split point, not the series end.
        assert_eq!(buf.time_range().end, TimeStamp::from_secs(20));
        // A full buffer consumes nothing further.
        assert_eq!(buf.append(&series(40, 50, &[5.0]), 0), 0);
    }

    #[test]
    fn test_append_from_offset() {
        let mut buf = RollingBuffer::allocate(4, DataType::Float64, TimeStamp::now());
        let s = series(0, 40, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(buf.append(&s, 2), 2);
        assert_eq!(buf.as_series().data(), &[3.0, 4.0]);
        // Start pinned to the offset boundary.
        assert_eq!(buf.time_range().start, TimeStamp::from_secs(20));
        assert_eq!(buf.time_range().end, TimeStamp::from_secs(40));
    }

    #[test]
    fn test_into_series() {
        let mut buf = RollingBuffer::allocate(3, DataType::Float32, TimeStamp::now());
        buf.append(&series(0, 30, &[1.0, 2.0, 3.0]), 0);
        let s = buf.into_series();
        assert_eq!(s.data(), &[1.0, 2.0, 3.0]);
        assert_eq!(s.data_type(), DataType::Float32);
    }
}
