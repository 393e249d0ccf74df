//! [`Payment`] definitions.

use std::str::FromStr as _;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateOf, DateTimeOf, Sum};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Invoice;
use crate::domain::invoice;

/// Payment registered against an [`Invoice`].
#[derive(Clone, Debug)]
pub struct Payment {
    /// ID of this [`Payment`].
    pub id: Id,

    /// ID of the [`Invoice`] this [`Payment`] covers.
    pub invoice_id: invoice::Id,

    /// [`Date`] when this [`Payment`] was made.
    ///
    /// [`Date`]: common::Date
    pub paid_on: PaymentDate,

    /// Paid [`Sum`].
    pub amount: Sum,

    /// [`Method`] this [`Payment`] was made with.
    pub method: Method,

    /// External [`Reference`] of this [`Payment`], if any.
    pub reference: Option<Reference>,

    /// [`DateTime`] when this [`Payment`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Payment`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_kind! {
    #[doc = "Method a [`Payment`] was made with."]
    enum Method {
        #[doc = "Cash."]
        Cash = 1,

        #[doc = "Bank transfer."]
        BankTransfer = 2,

        #[doc = "Check."]
        Check = 3,

        #[doc = "Debit or credit card."]
        Card = 4,

        #[doc = "Any other method."]
        Other = 5,
    }
}

/// External reference of a [`Payment`] (a transfer or check number).
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Reference(String);

impl Reference {
    /// Creates a new [`Reference`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `reference` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Creates a new [`Reference`] if the given `reference` is valid.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Option<Self> {
        let reference = reference.into();
        Self::check(&reference).then_some(Self(reference))
    }

    /// Checks whether the given `reference` is a valid [`Reference`].
    fn check(reference: impl AsRef<str>) -> bool {
        let reference = reference.as_ref();
        reference.trim() == reference
            && !reference.is_empty()
            && reference.len() <= 128
    }
}

impl FromStr for Reference {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Reference`")
    }
}

/// Unit type of a [`Payment`] date.
#[derive(Clone, Copy, Debug)]
pub struct Paid;

/// [`Date`] when a [`Payment`] was made.
///
/// [`Date`]: common::Date
pub type PaymentDate = DateOf<(Payment, Paid)>;

/// [`DateTime`] when a [`Payment`] was created.
pub type CreationDateTime = DateTimeOf<(Payment, unit::Creation)>;
