//! [`Invoice`] definitions.

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
use crate::domain::{Client, Contract, Property};
use crate::domain::{client, contract, property};

/// Invoice issued to a [`Client`].
#[derive(Clone, Debug)]
pub struct Invoice {
    /// ID of this [`Invoice`].
    pub id: Id,

    /// ID of the [`Client`] this [`Invoice`] is issued to.
    pub client_id: client::Id,

    /// ID of the [`Contract`] this [`Invoice`] bills, if any.
    pub contract_id: Option<contract::Id>,

    /// ID of the [`Property`] this [`Invoice`] relates to, if any.
    pub property_id: Option<property::Id>,

    /// Fiscal [`Kind`] of this [`Invoice`].
    pub kind: Kind,

    /// [`Series`] of this [`Invoice`].
    pub series: Series,

    /// [`Number`] of this [`Invoice`] within its [`Series`].
    pub number: Number,

    /// [`Date`] when this [`Invoice`] was issued.
    ///
    /// [`Date`]: common::Date
    pub issued_on: IssueDate,

    /// [`Date`] when this [`Invoice`] is due.
    ///
    /// [`Date`]: common::Date
    pub due_on: DueDate,

    /// Base [`Sum`] of this [`Invoice`], before tax.
    pub base: Sum,

    /// Tax [`Sum`] of this [`Invoice`].
    pub tax: Sum,

    /// Total [`Sum`] of this [`Invoice`].
    ///
    /// Always `base + tax`, recomputed server-side whenever either component
    /// changes.
    pub total: Sum,

    /// Outstanding [`Sum`] of this [`Invoice`].
    pub amount_due: Sum,

    /// [`PaymentStatus`] of this [`Invoice`].
    pub payment_status: PaymentStatus,

    /// [`Description`] of the billed item, if any.
    pub description: Option<Description>,

    /// [`DateTime`] when this [`Invoice`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Invoice`] was last modified.
    pub modified_at: ModificationDateTime,
}

impl Invoice {
    /// Recomputes [`total`] of this [`Invoice`] from its components.
    ///
    /// [`total`]: Invoice::total
    pub fn recompute_total(&mut self) {
        self.total = self.base + self.tax;
    }

    /// Recomputes [`amount_due`] and [`PaymentStatus`] of this [`Invoice`]
    /// from the total [`Sum`] of its registered payments.
    ///
    /// The status rolls forward only: fully covered means
    /// [`PaymentStatus::Paid`], partially covered means
    /// [`PaymentStatus::PartiallyPaid`].
    ///
    /// [`amount_due`]: Invoice::amount_due
    pub fn settle(&mut self, paid_total: Sum) {
        self.amount_due = self.total.saturating_sub(paid_total);
        self.payment_status = if self.amount_due == Sum::ZERO {
            PaymentStatus::Paid
        } else if paid_total == Sum::ZERO {
            PaymentStatus::Pending
        } else {
            PaymentStatus::PartiallyPaid
        };
    }

    /// Voids this [`Invoice`], zeroing its [`amount_due`].
    ///
    /// [`amount_due`]: Invoice::amount_due
    pub fn void(&mut self) {
        self.payment_status = PaymentStatus::Voided;
        self.amount_due = Sum::ZERO;
    }

    /// Indicates whether this [`Invoice`] accepts further payments.
    #[must_use]
    pub fn accepts_payments(&self) -> bool {
        match self.payment_status {
            PaymentStatus::Pending | PaymentStatus::PartiallyPaid => true,
            PaymentStatus::Paid | PaymentStatus::Voided => false,
        }
    }
}

/// ID of an [`Invoice`].
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
    #[doc = "Fiscal kind of an [`Invoice`]."]
    enum Kind {
        #[doc = "Type A invoice, between registered responsibles."]
        A = 1,

        #[doc = "Type B invoice, to final consumers and exempts."]
        B = 2,

        #[doc = "Type C invoice, issued by monotax payers."]
        C = 3,
    }
}

define_kind! {
    #[doc = "Payment status of an [`Invoice`]."]
    enum PaymentStatus {
        #[doc = "No payment registered yet."]
        Pending = 1,

        #[doc = "Partially covered by payments."]
        PartiallyPaid = 2,

        #[doc = "Fully covered by payments."]
        Paid = 3,

        #[doc = "Voided. Accepts no payments, owes nothing."]
        Voided = 4,
    }
}

/// Series of an [`Invoice`] (the point-of-sale prefix).
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Series(String);

impl Series {
    /// Creates a new [`Series`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `series` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(series: impl Into<String>) -> Self {
        Self(series.into())
    }

    /// Creates a new [`Series`] if the given `series` is valid.
    #[must_use]
    pub fn new(series: impl Into<String>) -> Option<Self> {
        let series = series.into();
        Self::check(&series).then_some(Self(series))
    }

    /// Checks whether the given `series` is a valid [`Series`].
    fn check(series: impl AsRef<str>) -> bool {
        let series = series.as_ref();
        !series.is_empty()
            && series.len() <= 8
            && series.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

impl FromStr for Series {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Series`")
    }
}

/// Sequential number of an [`Invoice`] within its [`Series`].
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[serde(try_from = "i32")]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Number(i32);

impl Number {
    /// Creates a new [`Number`] if the given `number` is positive.
    #[must_use]
    pub fn new(number: i32) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    /// Returns the value of this [`Number`].
    #[must_use]
    pub fn value(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Number {
    type Error = &'static str;

    fn try_from(number: i32) -> Result<Self, Self::Error> {
        Self::new(number).ok_or("`Number` must be positive")
    }
}

/// Description of an [`Invoice`]'s billed item.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Description`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.is_empty() && text.len() <= 1024
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Unit type of an [`Invoice`] issue.
#[derive(Clone, Copy, Debug)]
pub struct Issue;

/// Unit type of an [`Invoice`] due date.
#[derive(Clone, Copy, Debug)]
pub struct Due;

/// [`Date`] when an [`Invoice`] was issued.
///
/// [`Date`]: common::Date
pub type IssueDate = DateOf<(Invoice, Issue)>;

/// [`Date`] when an [`Invoice`] is due.
///
/// [`Date`]: common::Date
pub type DueDate = DateOf<(Invoice, Due)>;

/// [`DateTime`] when an [`Invoice`] was created.
pub type CreationDateTime = DateTimeOf<(Invoice, unit::Creation)>;

/// [`DateTime`] when an [`Invoice`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Invoice, unit::Modification)>;

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{Date, DateTime, Sum};

    use crate::domain::client;

    use super::{Id, Invoice, Kind, Number, PaymentStatus, Series};

    fn sum(s: &str) -> Sum {
        Sum::from_str(s).unwrap()
    }

    fn invoice() -> Invoice {
        let now = DateTime::from_rfc3339("2024-03-01T12:00:00Z").unwrap();
        Invoice {
            id: Id::new(),
            client_id: client::Id::new(),
            contract_id: None,
            property_id: None,
            kind: Kind::B,
            series: Series::new("0001").unwrap(),
            number: Number::new(42).unwrap(),
            issued_on: Date::from_iso8601("2024-03-01").unwrap().coerce(),
            due_on: Date::from_iso8601("2024-03-11").unwrap().coerce(),
            base: sum("1000.00"),
            tax: sum("210.00"),
            total: sum("1210.00"),
            amount_due: sum("1210.00"),
            payment_status: PaymentStatus::Pending,
            description: None,
            created_at: now.coerce(),
            modified_at: now.coerce(),
        }
    }

    #[test]
    fn total_is_base_plus_tax() {
        let mut i = invoice();
        i.base = sum("2000.00");
        i.recompute_total();
        assert_eq!(i.total, sum("2210.00"));
    }

    #[test]
    fn settling_rolls_status_forward() {
        let mut i = invoice();

        i.settle(sum("0.00"));
        assert_eq!(i.payment_status, PaymentStatus::Pending);
        assert_eq!(i.amount_due, sum("1210.00"));

        i.settle(sum("210.00"));
        assert_eq!(i.payment_status, PaymentStatus::PartiallyPaid);
        assert_eq!(i.amount_due, sum("1000.00"));

        i.settle(sum("1210.00"));
        assert_eq!(i.payment_status, PaymentStatus::Paid);
        assert_eq!(i.amount_due, Sum::ZERO);
    }

    #[test]
    fn overpayment_never_goes_negative() {
        let mut i = invoice();
        i.settle(sum("2000.00"));
        assert_eq!(i.amount_due, Sum::ZERO);
        assert_eq!(i.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn voiding_zeroes_the_amount_due() {
        let mut i = invoice();
        i.settle(sum("210.00"));
        i.void();
        assert_eq!(i.payment_status, PaymentStatus::Voided);
        assert_eq!(i.amount_due, Sum::ZERO);
        assert!(!i.accepts_payments());
    }

    #[test]
    fn paid_invoice_accepts_no_payments() {
        let mut i = invoice();
        assert!(i.accepts_payments());
        i.settle(sum("1210.00"));
        assert!(!i.accepts_payments());
    }
}
