//! Integer money.

use serde::{Deserialize, Serialize};

/// An amount in whole cents.
///
/// Prices travel between the services and the database as `i64` cents so
/// arithmetic stays exact; dollars only appear when an amount is formatted
/// for display.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// An amount of zero cents.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Wraps an amount already expressed in cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// The amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Scales the amount by a unit count, as in a line total from a unit
    /// price.
    pub fn multiply(&self, quantity: i64) -> Money {
        Self {
            cents: self.cents * quantity,
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            cents: self.cents + rhs.cents,
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let cents = self.cents.abs();
        write!(f, "{sign}${}.{:02}", cents / 100, cents % 100)
    }
}
