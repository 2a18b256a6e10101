//! Interval-indexed cache of historical fetch results.

use telem_core::{Series, TimeRange};

/// One historical fetch result: the queried range, the returned data, and
/// the trailing gap to the next cached interval.
///
/// Immutable after creation, except that inserting a neighbor rewrites the
/// previous entry's gap.
#[derive(Debug, Clone)]
pub struct IntervalRead {
    time_range: TimeRange,
    data: Vec<Series>,
    gap: TimeRange,
}

impl IntervalRead {
    fn new(time_range: TimeRange, data: Vec<Series>) -> Self {
        Self {
            time_range,
            data,
            // Zero-length until a later neighbor is inserted.
            gap: TimeRange::new(time_range.end, time_range.end),
        }
    }

    /// The range that was queried, fully covered by `data` at creation.
    #[inline]
    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// The series returned by the fetch.
    #[inline]
    pub fn data(&self) -> &[Series] {
        &self.data
    }

    /// The range between this entry's end and the next entry's start.
    #[inline]
    pub fn gap(&self) -> TimeRange {
        self.gap
    }
}

/// Ordered cache of historical reads, answering what is cached and what is
/// still missing for an arbitrary query range.
///
/// Entries stay sorted ascending by range start. Overlapping writes are not
/// merged or deduplicated; they coexist as-is.
#[derive(Debug, Default)]
pub struct StaticCache {
    entries: Vec<IntervalRead>,
}

impl StaticCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record the result of a historical fetch over `range`.
    ///
    /// The entry is inserted in start order, its gap set to the distance to
    /// the next entry, and the preceding entry's gap rewritten to end at
    /// `range.start`.
    pub fn write(&mut self, range: TimeRange, data: Vec<Series>) {
        let index = self
            .entries
            .iter()
            .position(|e| e.time_range.start >= range.start)
            .unwrap_or(self.entries.len());

        let mut entry = IntervalRead::new(range, data);
        if index < self.entries.len() {
            entry.gap = TimeRange::new(range.end, self.entries[index].time_range.start);
        }
        if index > 0 {
            let prev = &mut self.entries[index - 1];
            prev.gap = TimeRange::new(prev.time_range.end, range.start);
        }
        self.entries.insert(index, entry);
    }

    /// Answer a query with the cached series overlapping it and the
    /// sub-ranges still missing, both in chronological order.
    ///
    /// The returned gaps are exactly what a consumer must fetch from the
    /// network; covered sub-ranges are never re-reported.
    pub fn read(&self, query: TimeRange) -> (Vec<Series>, Vec<TimeRange>) {
        let matched: Vec<&IntervalRead> = self
            .entries
            .iter()
            .filter(|e| e.time_range.overlaps_with(&query))
            .collect();
        if matched.is_empty() {
            return (Vec::new(), vec![query]);
        }

        let mut data = Vec::new();
        let mut gaps = Vec::new();

        let leading = TimeRange::new(query.start, matched[0].time_range.start);
        if leading.is_valid() && !leading.is_zero() {
            gaps.push(leading);
        }
        for (i, entry) in matched.iter().enumerate() {
            // An entry may hold series outside the query; those are excluded
            // from the result but still count as covered for gap purposes.
            data.extend(
                entry
                    .data
                    .iter()
                    .filter(|s| s.time_range().overlaps_with(&query))
                    .cloned(),
            );
            if i + 1 < matched.len() {
                let gap = entry.gap;
                if gap.is_valid() && !gap.is_zero() {
                    gaps.push(gap);
                }
            }
        }
        let last = matched[matched.len() - 1];
        let trailing = TimeRange::new(last.time_range.end, query.end);
        if trailing.is_valid() && !trailing.is_zero() {
            gaps.push(trailing);
        }

        (data, gaps)
    }

    /// The range spanning from the first entry's start to the last entry's
    /// end, or a zero range if the cache is empty.
    pub fn extent(&self) -> TimeRange {
        match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => {
                TimeRange::new(first.time_range.start, last.time_range.end)
            }
            _ => TimeRange::ZERO,
        }
    }

    /// Drop entries failing the predicate, restoring the gap adjacency of
    /// the survivors. Returns the number of entries removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&IntervalRead) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|e| keep(e));
        let removed = before - self.entries.len();
        if removed > 0 {
            self.relink();
        }
        removed
    }

    /// Drop every entry.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    fn relink(&mut self) {
        let len = self.entries.len();
        for i in 0..len {
            let next_start = if i + 1 < len {
                self.entries[i + 1].time_range.start
            } else {
                self.entries[i].time_range.end
            };
            let entry = &mut self.entries[i];
            entry.gap = TimeRange::new(entry.time_range.end, next_start);
        }
    }

    /// The cached entries, in start order.
    pub fn entries(&self) -> &[IntervalRead] {
        &self.entries
    }

    /// The number of cached entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
