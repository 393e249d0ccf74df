//! Monetary value definitions.

use std::{fmt, ops, str::FromStr};

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Non-negative amount of money in a minor-unit-free integer representation.
///
/// Used for rent amounts and property prices, which the business quotes as
/// whole units only.
#[derive(Clone, Copy, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Amount(i64);

impl Amount {
    /// An [`Amount`] of zero.
    pub const ZERO: Self = Self(0);

    /// Creates a new [`Amount`] if the given `value` is non-negative.
    #[must_use]
    pub fn new(value: i64) -> Option<Self> {
        (value >= 0).then_some(Self(value))
    }

    /// Returns the integer value of this [`Amount`].
    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Amount`")
    }
}

/// Non-negative sum of money with a fractional part.
///
/// Used for invoice figures, which carry two decimal places.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Sum(Decimal);

impl Sum {
    /// A [`Sum`] of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Sum`] if the given `value` is non-negative.
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        (value >= Decimal::ZERO).then_some(Self(value))
    }

    /// Returns the [`Decimal`] value of this [`Sum`].
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Subtracts the given [`Sum`] from this one, saturating at zero.
    #[must_use]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self((self.0 - rhs.0).max(Decimal::ZERO))
    }
}

impl ops::Add for Sum {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Display for Sum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Sum {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Sum`")
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use rust_decimal::Decimal;
    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    use super::{Amount, Sum};

    impl Serialize for Amount {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_i64(self.0)
        }
    }

    impl<'de> Deserialize<'de> for Amount {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            Self::new(i64::deserialize(deserializer)?)
                .ok_or_else(|| Error::custom("`Amount` cannot be negative"))
        }
    }

    impl Serialize for Sum {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            Serialize::serialize(&self.0, serializer)
        }
    }

    impl<'de> Deserialize<'de> for Sum {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            Self::new(<Decimal as Deserialize>::deserialize(deserializer)?)
                .ok_or_else(|| Error::custom("`Sum` cannot be negative"))
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Amount, Sum};

    fn sum(s: &str) -> Sum {
        Sum::new(Decimal::from_str(s).unwrap()).unwrap()
    }

    #[test]
    fn amount_is_non_negative() {
        assert_eq!(Amount::new(150_000).map(Amount::value), Some(150_000));
        assert_eq!(Amount::new(0), Some(Amount::ZERO));
        assert_eq!(Amount::new(-1), None);

        assert!(Amount::from_str("1200").is_ok());
        assert!(Amount::from_str("-1200").is_err());
        assert!(Amount::from_str("12.5").is_err());
    }

    #[test]
    fn sum_is_non_negative() {
        assert!(Sum::new(Decimal::new(12_345, 2)).is_some());
        assert!(Sum::new(Decimal::new(-1, 2)).is_none());
    }

    #[test]
    fn sum_subtraction_saturates_at_zero() {
        assert_eq!(sum("100.00").saturating_sub(sum("40.50")), sum("59.50"));
        assert_eq!(sum("40.50").saturating_sub(sum("100.00")), Sum::ZERO);
    }

    #[test]
    fn sum_addition() {
        assert_eq!(sum("100.00") + sum("21.00"), sum("121.00"));
    }
}
