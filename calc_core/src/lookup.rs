//! Ordered half-open range tables for category lookups (BMI class, WHR risk, ...).
//!
//! A value belongs to a bucket when `lower <= value < upper`; the first
//! matching bucket wins. Tables are expected to be sorted, contiguous and
//! non-overlapping. That is a property of the table data, asserted in tests,
//! not re-checked on every lookup.

use serde::Serialize;

/// One `[lower, upper)` bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeBucket<T> {
    pub lower: f64,
    pub upper: f64,
    pub value: T,
}

impl<T> RangeBucket<T> {
    pub const fn new(lower: f64, upper: f64, value: T) -> Self {
        RangeBucket { lower, upper, value }
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x < self.upper
    }
}

/// An ordered table of buckets
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeTable<T: 'static> {
    buckets: &'static [RangeBucket<T>],
}

impl<T: 'static> RangeTable<T> {
    pub const fn new(buckets: &'static [RangeBucket<T>]) -> Self {
        RangeTable { buckets }
    }

    /// First bucket containing `x`, `None` for NaN or values outside the table
    pub fn lookup(&self, x: f64) -> Option<&'static T> {
        self.buckets.iter().find(|b| b.contains(x)).map(|b| &b.value)
    }

    pub fn buckets(&self) -> &'static [RangeBucket<T>] {
        self.buckets
    }

    /// Lowest covered value
    pub fn lower_bound(&self) -> Option<f64> {
        self.buckets.first().map(|b| b.lower)
    }

    /// True when each bucket starts where the previous one ended.
    pub fn is_contiguous(&self) -> bool {
        self.buckets
            .windows(2)
            .all(|w| w[0].upper == w[1].lower && w[0].lower < w[0].upper)
    }
}
