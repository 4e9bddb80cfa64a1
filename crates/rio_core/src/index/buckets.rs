use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::Serialize;

use super::EventSet;
use crate::normalize::EventId;

/// How a negative item in a signed-magnitude list widens its bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeDirection {
    /// `-n` selects buckets `n..=max`
    AtLeast,
    /// `-n` selects buckets `min..=n`
    AtMost,
}

/// Dense integer-bucketed index: one set per value in `min..=max`, every
/// bucket present even when empty.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketIndex {
    min: u8,
    buckets: Vec<EventSet>,
}

impl BucketIndex {
    pub fn new(domain: RangeInclusive<u8>) -> Self {
        let (min, max) = (*domain.start(), *domain.end());
        Self {
            min,
            buckets: vec![EventSet::new(); usize::from(max.saturating_sub(min)) + 1],
        }
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.min + (self.buckets.len() - 1) as u8
    }

    pub fn contains_value(&self, value: i64) -> bool {
        value >= i64::from(self.min()) && value <= i64::from(self.max())
    }

    pub fn insert(&mut self, value: u8, event_id: EventId) -> bool {
        match value.checked_sub(self.min).and_then(|i| self.buckets.get_mut(usize::from(i))) {
            Some(bucket) => bucket.insert(event_id),
            None => false,
        }
    }

    pub fn bucket(&self, value: i64) -> Option<&EventSet> {
        if !self.contains_value(value) {
            return None;
        }
        self.buckets.get((value - i64::from(self.min)) as usize)
    }

    /// Union of the buckets selected by a signed-magnitude list.
    ///
    /// `i >= 0` selects bucket `i`; `i < 0` selects a run of buckets bounded by
    /// `|i|` in `direction`. Items whose magnitude lies outside the domain
    /// select nothing.
    pub fn select(&self, values: &[i64], direction: RangeDirection) -> EventSet {
        let mut selected = EventSet::new();
        for &value in values {
            let magnitude = value.unsigned_abs() as i64;
            if !self.contains_value(magnitude) {
                continue;
            }
            let range = if value >= 0 {
                magnitude..=magnitude
            } else {
                match direction {
                    RangeDirection::AtLeast => magnitude..=i64::from(self.max()),
                    RangeDirection::AtMost => i64::from(self.min())..=magnitude,
                }
            };
            for v in range {
                if let Some(bucket) = self.bucket(v) {
                    selected.extend(bucket.iter().copied());
                }
            }
        }
        selected
    }

    /// Non-empty bucket count
    pub fn occupied(&self) -> usize {
        self.buckets.iter().filter(|b| !b.is_empty()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &EventSet)> {
        self.buckets
            .iter()
            .enumerate()
            .map(move |(i, set)| (self.min + i as u8, set))
    }
}

/// Rounds to two decimals the way Python's `round(x, 2)` does: ties go to
/// the even neighbour, judged on the exact binary value. Returns hundredths.
pub fn round_half_even_hundredths(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    // Exact multiples of 1/8 are the only binary fractions that can sit on a
    // decimal tie at two places.
    if (value * 8.0).fract() == 0.0 {
        return Some((value * 100.0).round_ties_even() as i64);
    }
    // Otherwise the shortest correctly-rounded decimal expansion decides.
    format!("{:.2}", value).replace('.', "").parse::<i64>().ok()
}

/// Float dimension bucketed by its value rounded to hundredths
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandedIndex {
    bands: BTreeMap<i64, EventSet>,
}

impl BandedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: f64, event_id: EventId) -> bool {
        match round_half_even_hundredths(value) {
            Some(key) => self.bands.entry(key).or_default().insert(event_id),
            None => false,
        }
    }

    /// Events whose rounded value equals `value` rounded
    pub fn band(&self, value: f64) -> EventSet {
        round_half_even_hundredths(value)
            .and_then(|key| self.bands.get(&key))
            .cloned()
            .unwrap_or_default()
    }

    /// Union of every band whose absolute value is at least `|threshold|`
    pub fn at_least_magnitude(&self, threshold: f64) -> EventSet {
        let bound = threshold.abs();
        self.bands
            .iter()
            .filter(|(key, _)| (**key as f64 / 100.0).abs() >= bound)
            .flat_map(|(_, set)| set.iter().copied())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}
