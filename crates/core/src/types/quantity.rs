//! Cart line quantity with a floor of one.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing or adjusting a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The value would fall below the minimum of 1.
    ///
    /// A cart line can never hold quantity 0; removing the line is the only
    /// way to reach zero.
    #[error("minimum quantity is 1")]
    BelowMinimum,
}

/// Quantity of one cart line.
///
/// Invariant: the wrapped value is always `>= 1`. A line that would reach 0
/// must be removed from the cart instead; [`Quantity::decrement`] refuses to
/// cross the floor. Deserialization goes through the same validation, so a
/// zero quantity on the wire is a parse error, never a reachable state.
///
/// ## Examples
///
/// ```
/// use marula_core::Quantity;
///
/// let qty = Quantity::new(2).unwrap();
/// assert_eq!(qty.increment().get(), 3);
/// assert_eq!(qty.decrement().unwrap().get(), 1);
///
/// assert!(Quantity::new(0).is_err());
/// assert!(Quantity::MIN.decrement().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest representable quantity.
    pub const MIN: Self = Self(1);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::BelowMinimum`] if `value` is 0.
    pub const fn new(value: u32) -> Result<Self, QuantityError> {
        if value == 0 {
            return Err(QuantityError::BelowMinimum);
        }
        Ok(Self(value))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Quantity one step higher, saturating at `u32::MAX`.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Quantity one step lower.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::BelowMinimum`] if the quantity is already at
    /// the floor of 1.
    pub const fn decrement(self) -> Result<Self, QuantityError> {
        if self.0 <= 1 {
            return Err(QuantityError::BelowMinimum);
        }
        Ok(Self(self.0 - 1))
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_rejected() {
        assert_eq!(Quantity::new(0), Err(QuantityError::BelowMinimum));
    }

    #[test]
    fn test_increment() {
        let qty = Quantity::new(1).unwrap();
        assert_eq!(qty.increment().get(), 2);
    }

    #[test]
    fn test_increment_saturates() {
        let qty = Quantity::new(u32::MAX).unwrap();
        assert_eq!(qty.increment().get(), u32::MAX);
    }

    #[test]
    fn test_decrement_at_floor_fails() {
        assert_eq!(Quantity::MIN.decrement(), Err(QuantityError::BelowMinimum));
    }

    #[test]
    fn test_decrement_above_floor() {
        let qty = Quantity::new(3).unwrap();
        assert_eq!(qty.decrement().unwrap().get(), 2);
    }

    #[test]
    fn test_deserialize_zero_fails() {
        let result: Result<Quantity, _> = serde_json::from_str("0");
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let qty: Quantity = serde_json::from_str("4").unwrap();
        assert_eq!(qty.get(), 4);
        assert_eq!(serde_json::to_string(&qty).unwrap(), "4");
    }
}
