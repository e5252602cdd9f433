//! Display-only price snapshot.

use core::fmt;

use rust_decimal::Decimal;

/// A product price as quoted by the catalog service.
///
/// Prices in the cart mirror are display-only snapshots copied from server
/// responses; the cart engine never does arithmetic on them beyond rendering.
/// Decimal is used instead of a float so the snapshot round-trips exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    /// Format as a dollar amount with two decimal places, e.g. `$19.99`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
