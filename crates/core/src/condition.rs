//! Typed condition categories.
//!
//! Every condition category on a technique is either a wildcard or a
//! concrete set. An absent key deserialises to [`ConditionSet::Any`]; an
//! explicitly empty list is normalised to `Any` as well, so callers never
//! have to guess what an empty collection means.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

/// A condition category that is either a wildcard or a non-empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionSet<T: Ord> {
    /// No constraint: the category always passes.
    Any,
    /// The category passes only for members of this (non-empty) set.
    OneOf(BTreeSet<T>),
}

impl<T: Ord> Default for ConditionSet<T> {
    fn default() -> Self {
        Self::Any
    }
}

impl<T: Ord> ConditionSet<T> {
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Membership test. A wildcard contains everything.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::Any => true,
            Self::OneOf(set) => set.contains(value),
        }
    }

    /// The concrete members, or `None` for a wildcard.
    pub fn members(&self) -> Option<&BTreeSet<T>> {
        match self {
            Self::Any => None,
            Self::OneOf(set) => Some(set),
        }
    }
}

impl<T: Ord> From<Vec<T>> for ConditionSet<T> {
    fn from(items: Vec<T>) -> Self {
        if items.is_empty() {
            Self::Any
        } else {
            Self::OneOf(items.into_iter().collect())
        }
    }
}

impl<T: Ord> FromIterator<T> for ConditionSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl<'de, T> Deserialize<'de> for ConditionSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        if items.is_empty() {
            tracing::warn!("empty condition list treated as wildcard");
        }
        Ok(Self::from(items))
    }
}

impl<T: Ord + Serialize> Serialize for ConditionSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Any => serializer.collect_seq(std::iter::empty::<&T>()),
            Self::OneOf(set) => serializer.collect_seq(set),
        }
    }
}

/// Inclusive `[min, max]` range over the estimated complexity score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }

    /// A range is usable when both bounds are finite and ordered.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}
