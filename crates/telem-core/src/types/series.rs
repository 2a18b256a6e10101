//! Sample series and data types.

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::telem::TimeRange;

/// Sample encoding for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// 32-bit floating point samples
    Float32,
    /// 64-bit floating point samples
    #[default]
    Float64,
    /// 8-bit signed integer samples
    Int8,
    /// 16-bit signed integer samples
    Int16,
    /// 32-bit signed integer samples
    Int32,
    /// 64-bit signed integer samples
    Int64,
    /// 8-bit unsigned integer samples
    Uint8,
    /// 16-bit unsigned integer samples
    Uint16,
    /// 32-bit unsigned integer samples
    Uint32,
    /// 64-bit unsigned integer samples
    Uint64,
    /// Nanosecond timestamp samples
    Timestamp,
    /// Unknown or invalid encoding
    Unknown,
}

impl DataType {
    /// Bytes per sample on the wire.
    pub fn density(&self) -> usize {
        match self {
            DataType::Float32 => 4,
            DataType::Float64 => 8,
            DataType::Int8 => 1,
            DataType::Int16 => 2,
            DataType::Int32 => 4,
            DataType::Int64 => 8,
            DataType::Uint8 => 1,
            DataType::Uint16 => 2,
            DataType::Uint32 => 4,
            DataType::Uint64 => 8,
            DataType::Timestamp => 8,
            DataType::Unknown => 0,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Uint8 => "uint8",
            DataType::Uint16 => "uint16",
            DataType::Uint32 => "uint32",
            DataType::Uint64 => "uint64",
            DataType::Timestamp => "timestamp",
            DataType::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// An immutable array of samples tagged with the time range it spans.
///
/// Storage is shared, so cloning a series on a cache hit does not copy
/// the underlying samples.
#[derive(Debug, Clone)]
pub struct Series {
    data_type: DataType,
    time_range: TimeRange,
    data: Arc<[f64]>,
}

impl Series {
    /// Create a series over the given range.
    pub fn new(data_type: DataType, time_range: TimeRange, data: Vec<f64>) -> Self {
        Self {
            data_type,
            time_range,
            data: data.into(),
        }
    }

    /// Create a series from any numeric sample slice.
    ///
    /// Samples that cannot be represented as f64 become NaN.
    pub fn from_samples<T: ToPrimitive>(
        data_type: DataType,
        time_range: TimeRange,
        samples: &[T],
    ) -> Self {
        let data: Vec<f64> = samples
            .iter()
            .map(|s| s.to_f64().unwrap_or(f64::NAN))
            .collect();
        Self::new(data_type, time_range, data)
    }

    /// The sample encoding of the series.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The time range the series spans.
    #[inline]
    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// The samples in the series.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// The number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the series holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a sample by index.
    pub fn at(&self, index: usize) -> Option<f64> {
        self.data.get(index).copied()
    }

    /// The size of the series when encoded, in bytes.
    pub fn byte_size(&self) -> usize {
        self.len() * self.data_type.density()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::telem::TimeStamp;

    fn secs_range(start: i64, end: i64) -> TimeRange {
        TimeRange::new(TimeStamp::from_secs(start), TimeStamp::from_secs(end))
    }

    #[test]
    fn test_series_from_samples() {
        let s = Series::from_samples(DataType::Int32, secs_range(0, 10), &[1i32, 2, 3]);
        assert_eq!(s.data(), &[1.0, 2.0, 3.0]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.at(1), Some(2.0));
        assert_eq!(s.at(3), None);
    }

    #[test]
    fn test_series_byte_size() {
        let s = Series::new(DataType::Float32, secs_range(0, 1), vec![0.0; 8]);
        assert_eq!(s.byte_size(), 32);
    }

    #[test]
    fn test_shared_storage() {
        let a = Series::new(DataType::Float64, secs_range(0, 1), vec![1.0, 2.0]);
        let b = a.clone();
        assert!(std::ptr::eq(a.data().as_ptr(), b.data().as_ptr()));
    }
}
