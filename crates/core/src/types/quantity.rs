//! Cart line quantity type.

use core::fmt;

use serde::Serialize;

/// Errors that can occur when validating a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum QuantityError {
    /// The input is zero or negative.
    #[error("quantity must be at least 1 (got {0})")]
    NotPositive(i32),
}

/// A cart line quantity.
///
/// Quantities are strictly positive integers: a line with zero units does
/// not exist (the item is removed instead). Construction goes through
/// [`Quantity::new`] so a non-positive value can never circulate.
///
/// ## Examples
///
/// ```
/// use larder_core::Quantity;
///
/// assert!(Quantity::new(1).is_ok());
/// assert!(Quantity::new(25).is_ok());
///
/// assert!(Quantity::new(0).is_err());
/// assert!(Quantity::new(-3).is_err());
/// ```
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Quantity(i32);

impl Quantity {
    /// One unit, the default for "add to cart".
    pub const ONE: Self = Self(1);

    /// Validate a raw integer as a `Quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotPositive`] if the input is zero or
    /// negative.
    pub const fn new(value: i32) -> Result<Self, QuantityError> {
        if value < 1 {
            return Err(QuantityError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Get the underlying integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Quantity {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i32 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Quantity {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <i32 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid (CHECK (quantity >= 1))
        Ok(Self(raw))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Quantity {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_positive() {
        assert_eq!(Quantity::new(1).unwrap().get(), 1);
        assert_eq!(Quantity::new(500).unwrap().get(), 500);
        assert_eq!(Quantity::new(i32::MAX).unwrap().get(), i32::MAX);
    }

    #[test]
    fn test_new_zero() {
        assert!(matches!(Quantity::new(0), Err(QuantityError::NotPositive(0))));
    }

    #[test]
    fn test_new_negative() {
        assert!(matches!(
            Quantity::new(-7),
            Err(QuantityError::NotPositive(-7))
        ));
    }

    #[test]
    fn test_one_constant() {
        assert_eq!(Quantity::ONE.get(), 1);
    }

    #[test]
    fn test_try_from() {
        let quantity: Quantity = 4_i32.try_into().unwrap();
        assert_eq!(i32::from(quantity), 4);
        assert!(Quantity::try_from(0).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Quantity::new(12).unwrap()), "12");
    }

    #[test]
    fn test_serialize_transparent() {
        let quantity = Quantity::new(3).unwrap();
        assert_eq!(serde_json::to_string(&quantity).unwrap(), "3");
    }
}
