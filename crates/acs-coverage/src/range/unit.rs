//! Type-safe unit identifiers and the interval-backed unit set.
//!
//! Units are 1-based block/tower indices inside a condominium. The set keeps
//! disjoint, non-adjacent spans so a range such as `1-4000000` costs one
//! entry instead of four million.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

/// Type-safe unit identifier (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(u32);

impl UnitId {
    /// Create a new unit ID
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the inner value
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for UnitId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Deduplicated, ordered set of units.
///
/// Serializes as compact range text (`"1-13,15,20-22"`), the same shape the
/// backend stores in `blocos_ativos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct UnitSet {
    /// start -> end (inclusive); spans never overlap or touch
    spans: BTreeMap<u32, u32>,
}

impl UnitSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single unit
    pub fn insert(&mut self, unit: UnitId) {
        self.insert_range(unit.0..=unit.0);
    }

    /// Insert every unit of an inclusive range, merging with neighbours
    pub fn insert_range(&mut self, range: RangeInclusive<u32>) {
        let (mut start, mut end) = range.into_inner();
        if start > end {
            return;
        }

        if let Some((&s, &e)) = self.spans.range(..=start).next_back() {
            if e.saturating_add(1) >= start {
                start = s;
                end = end.max(e);
            }
        }

        let absorbed: Vec<(u32, u32)> = self
            .spans
            .range(start..=end.saturating_add(1))
            .map(|(&s, &e)| (s, e))
            .collect();
        for (s, e) in absorbed {
            let _ = self.spans.remove(&s);
            end = end.max(e);
        }

        let _ = self.spans.insert(start, end);
    }

    /// Number of units in the set
    #[must_use]
    pub fn len(&self) -> u64 {
        self.spans
            .iter()
            .map(|(&s, &e)| u64::from(e - s) + 1)
            .sum()
    }

    /// Check if the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Check membership
    #[must_use]
    pub fn contains(&self, unit: UnitId) -> bool {
        self.spans
            .range(..=unit.0)
            .next_back()
            .is_some_and(|(_, &e)| e >= unit.0)
    }

    /// Smallest unit, if any
    #[must_use]
    pub fn first(&self) -> Option<UnitId> {
        self.spans.keys().next().copied().map(UnitId)
    }

    /// Largest unit, if any
    #[must_use]
    pub fn last(&self) -> Option<UnitId> {
        self.spans.values().next_back().copied().map(UnitId)
    }

    /// Iterate units in ascending order
    pub fn iter(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.spans.iter().flat_map(|(&s, &e)| (s..=e).map(UnitId))
    }

    /// Iterate the maximal contiguous spans
    pub fn spans(&self) -> impl Iterator<Item = RangeInclusive<u32>> + '_ {
        self.spans.iter().map(|(&s, &e)| s..=e)
    }

    /// Union of two sets
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for span in other.spans() {
            merged.insert_range(span);
        }
        merged
    }

    /// Units of this set that fall inside `range`
    #[must_use]
    pub fn intersect_range(&self, range: RangeInclusive<u32>) -> Self {
        let (lo, hi) = range.into_inner();
        let mut out = Self::new();
        if lo > hi {
            return out;
        }
        for (&s, &e) in self.spans.range(..=hi) {
            let (s, e) = (s.max(lo), e.min(hi));
            if s <= e {
                let _ = out.spans.insert(s, e);
            }
        }
        out
    }

    /// Render as compact range text, e.g. `1-13,15,20-22`
    #[must_use]
    pub fn to_range_text(&self) -> String {
        self.spans
            .iter()
            .map(|(&s, &e)| if s == e { s.to_string() } else { format!("{s}-{e}") })
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for UnitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_range_text())
    }
}

impl FromIterator<UnitId> for UnitSet {
    fn from_iter<I: IntoIterator<Item = UnitId>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<UnitId> for UnitSet {
    fn extend<I: IntoIterator<Item = UnitId>>(&mut self, iter: I) {
        for unit in iter {
            self.insert(unit);
        }
    }
}

impl From<UnitSet> for String {
    fn from(set: UnitSet) -> Self {
        set.to_range_text()
    }
}

impl From<String> for UnitSet {
    /// Reads range text with no upper bound other than `u32::MAX`
    fn from(text: String) -> Self {
        super::parse_units(&text, i64::from(u32::MAX))
    }
}
