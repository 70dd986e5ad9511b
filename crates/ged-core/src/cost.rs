// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Non-negative finite edit costs.
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected cost value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CostError {
    /// The value was below zero.
    #[error("cost must be non-negative, got {0}")]
    Negative(f64),
    /// The value was NaN or infinite.
    #[error("cost must be finite, got {0}")]
    NotFinite(f64),
}

/// Cost of a single edit operation.
///
/// Invariants
/// - finite and `>= 0.0`;
/// - `-0.0` is stored as `0.0`, so bitwise equality and hashing agree with
///   numeric equality.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Cost(f64);

impl Cost {
    /// Zero cost.
    pub const ZERO: Self = Self(0.0);
    /// Unit cost, the default for every operation kind.
    pub const UNIT: Self = Self(1.0);

    /// Validates `value` as a cost.
    pub fn new(value: f64) -> Result<Self, CostError> {
        if !value.is_finite() {
            return Err(CostError::NotFinite(value));
        }
        if value < 0.0 {
            return Err(CostError::Negative(value));
        }
        // Collapses -0.0.
        Ok(Self(value + 0.0))
    }

    /// The raw value.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Cost {
    fn default() -> Self {
        Self::UNIT
    }
}

impl TryFrom<f64> for Cost {
    type Error = CostError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Cost> for f64 {
    fn from(cost: Cost) -> Self {
        cost.0
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Cost {}

impl Hash for Cost {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_and_non_finite() {
        assert_eq!(Cost::new(-0.5), Err(CostError::Negative(-0.5)));
        assert!(matches!(Cost::new(f64::NAN), Err(CostError::NotFinite(_))));
        assert!(matches!(
            Cost::new(f64::INFINITY),
            Err(CostError::NotFinite(_))
        ));
    }

    #[test]
    fn negative_zero_is_zero() {
        let cost = Cost::new(-0.0).expect("-0.0 is a valid cost");
        assert_eq!(cost, Cost::ZERO);
        assert!(cost.get().is_sign_positive());
    }

    #[test]
    fn orders_numerically() {
        let small = Cost::new(0.25).expect("valid");
        let large = Cost::new(3.0).expect("valid");
        assert!(small < large);
        assert!(Cost::ZERO < Cost::UNIT);
    }

    #[test]
    fn deserialize_validates() {
        let ok: Cost = serde_json::from_str("2.5").expect("valid cost");
        assert_eq!(ok.get(), 2.5);
        assert!(serde_json::from_str::<Cost>("-1.0").is_err());
    }
}
