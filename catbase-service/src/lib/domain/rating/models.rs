use std::collections::BTreeMap;

use serde::Serialize;

use crate::rating::errors::RatingError;

/// Highest star value on any axis.
pub const MAX_RATING: i64 = 5;

/// Star ratings attached to a top-level discussion, keyed by axis name
/// (e.g. `friendliness`, `energyLevel`).
///
/// A value of 0 means the axis was left unrated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ratings(BTreeMap<String, u8>);

impl Ratings {
    /// Validate raw axis values.
    ///
    /// # Errors
    /// * `BlankAxis` - An axis name is empty or whitespace
    /// * `OutOfRange` - A value is outside 0..=5
    pub fn new(raw: BTreeMap<String, i64>) -> Result<Self, RatingError> {
        let mut ratings = BTreeMap::new();
        for (axis, value) in raw {
            if axis.trim().is_empty() {
                return Err(RatingError::BlankAxis);
            }
            let stars = u8::try_from(value)
                .ok()
                .filter(|v| i64::from(*v) <= MAX_RATING)
                .ok_or_else(|| RatingError::OutOfRange {
                    axis: axis.clone(),
                    value,
                })?;
            ratings.insert(axis, stars);
        }
        Ok(Self(ratings))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, axis: &str) -> Option<u8> {
        self.0.get(axis).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(axis, value)| (axis.as_str(), *value))
    }

    pub fn as_map(&self) -> &BTreeMap<String, u8> {
        &self.0
    }
}

impl From<BTreeMap<String, u8>> for Ratings {
    fn from(map: BTreeMap<String, u8>) -> Self {
        Self(map)
    }
}

/// Denormalised per-breed rating summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateRating {
    /// Axis name to mean of its non-zero values, rounded to 2 decimals.
    pub averages: BTreeMap<String, f64>,
    /// Number of top-level discussions that carried ratings.
    pub count: i64,
}

/// Recompute the aggregate from the full contributing set.
///
/// Every axis seen in any entry is reported. Zero values do not count
/// towards an axis mean; an axis with only zeros reports 0.0. The result does
/// not depend on the order of `entries`.
pub fn aggregate(entries: &[Ratings]) -> AggregateRating {
    let mut totals: BTreeMap<&str, (u64, u64)> = BTreeMap::new();

    for ratings in entries {
        for (axis, value) in ratings.iter() {
            let (sum, rated) = totals.entry(axis).or_insert((0, 0));
            if value > 0 {
                *sum += u64::from(value);
                *rated += 1;
            }
        }
    }

    let averages = totals
        .into_iter()
        .map(|(axis, (sum, rated))| {
            let mean = if rated == 0 {
                0.0
            } else {
                round2(sum as f64 / rated as f64)
            };
            (axis.to_string(), mean)
        })
        .collect();

    AggregateRating {
        averages,
        count: entries.len() as i64,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
