//! [`Contract`] definitions.
//!
//! A [`Contract`] is a rental agreement between the agency and a tenant
//! [`Client`] over a [`Property`]. It carries the rent-increase schedule:
//! every [`IncreaseInterval`] months the rent is renegotiated, and the
//! backend surfaces the [`Contract`]s whose [`next_increase_on`] date is
//! close enough to warrant notifying the tenant.
//!
//! [`next_increase_on`]: Contract::next_increase_on

#[cfg(doc)]
use common::DateTime;
use common::{
    datetime::MonthAddError, define_kind, unit, Amount, Date, DateOf,
    DateTimeOf,
};
use derive_more::{Display, Error, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Client, Property};
use crate::domain::{client, property};

/// Rental contract over a [`Property`].
///
/// [`Contract`]s are never hard-deleted: finishing or rescinding one is a
/// terminal [`Status`] change.
#[derive(Clone, Debug)]
pub struct Contract {
    /// ID of this [`Contract`].
    pub id: Id,

    /// ID of the rented [`Property`].
    pub property_id: property::Id,

    /// ID of the tenant [`Client`].
    pub tenant_id: client::Id,

    /// [`Date`] when this [`Contract`] commences.
    pub started_on: CommencementDate,

    /// [`Date`] when this [`Contract`] expires.
    ///
    /// Nothing transitions automatically once this [`Date`] passes: closing
    /// the [`Contract`] is an administrative action.
    pub ends_on: ExpirationDate,

    /// Day of month (1-28) the monthly rent is due.
    pub payment_day: PaymentDay,

    /// Monthly rent [`Amount`] agreed at commencement.
    pub initial_rent: Amount,

    /// Monthly rent [`Amount`] currently in effect.
    pub current_rent: Amount,

    /// [`IncreaseInterval`] between rent renegotiations.
    pub increase_interval: IncreaseInterval,

    /// [`Date`] when the next rent increase is due.
    pub next_increase_on: IncreaseDate,

    /// [`DateTime`] when a rent-increase notification was last sent for this
    /// [`Contract`], if ever.
    ///
    /// Monotonic: updates may move it forward, never backward.
    pub last_notified_at: Option<NotificationDateTime>,

    /// [`Status`] of this [`Contract`].
    pub status: Status,

    /// [`DateTime`] when this [`Contract`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Contract`] was last modified.
    pub modified_at: ModificationDateTime,
}

impl Contract {
    /// Applies the provided [`Patch`] to this [`Contract`].
    ///
    /// Supplied fields are applied last-write-wins. Once they all are in
    /// place, a supplied [`current_rent`] advances [`next_increase_on`] by
    /// exactly one [`IncreaseInterval`] from its post-assignment value
    /// (which may have been supplied by the same [`Patch`]). The advance
    /// never involves "today" and never recomputes from [`started_on`].
    ///
    /// # Errors
    ///
    /// - [`PatchError::TerminalStatus`] on an attempt to change the
    ///   [`Status`] of a finished or rescinded [`Contract`];
    /// - [`PatchError::NotificationMovedBackward`] on an attempt to move
    ///   [`last_notified_at`] backward;
    /// - [`PatchError::MonthAdd`] if the advanced [`next_increase_on`] does
    ///   not fit the supported calendar range.
    ///
    /// [`current_rent`]: Contract::current_rent
    /// [`last_notified_at`]: Contract::last_notified_at
    /// [`next_increase_on`]: Contract::next_increase_on
    /// [`started_on`]: Contract::started_on
    pub fn apply(&mut self, patch: Patch) -> Result<(), PatchError> {
        use PatchError as E;

        if let Some(status) = patch.status {
            if status != self.status && self.status.is_terminal() {
                return Err(E::TerminalStatus(self.status));
            }
        }
        if let (Some(new), Some(old)) =
            (patch.last_notified_at, self.last_notified_at)
        {
            if new < old {
                return Err(E::NotificationMovedBackward);
            }
        }

        let rent_supplied = patch.current_rent.is_some();

        if let Some(ends_on) = patch.ends_on {
            self.ends_on = ends_on;
        }
        if let Some(payment_day) = patch.payment_day {
            self.payment_day = payment_day;
        }
        if let Some(current_rent) = patch.current_rent {
            self.current_rent = current_rent;
        }
        if let Some(increase_interval) = patch.increase_interval {
            self.increase_interval = increase_interval;
        }
        if let Some(next_increase_on) = patch.next_increase_on {
            self.next_increase_on = next_increase_on;
        }
        if let Some(last_notified_at) = patch.last_notified_at {
            self.last_notified_at = Some(last_notified_at);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }

        if rent_supplied && !self.increase_interval.is_zero() {
            self.next_increase_on = self
                .next_increase_on
                .advanced_by_months(self.increase_interval.months())?;
        }

        Ok(())
    }

    /// Checks whether a rent-increase notification is due for this
    /// [`Contract`] as of `today`.
    ///
    /// A notification is due when all of the following hold:
    /// - the [`Contract`] is [`Status::Active`];
    /// - [`next_increase_on`] lies within `[today, today + window]`;
    /// - no notification was ever sent, or the last one was sent strictly
    ///   before the midnight preceding [`next_increase_on`] by one day.
    ///
    /// [`next_increase_on`]: Contract::next_increase_on
    #[must_use]
    pub fn needs_increase_notification(
        &self,
        today: Date,
        window: WindowDays,
    ) -> bool {
        if self.status != Status::Active {
            return false;
        }

        let next: Date = self.next_increase_on.coerce();
        let Some(horizon) = today.advanced_by_days(window.days()) else {
            return false;
        };
        if next < today || next > horizon {
            return false;
        }

        match (self.last_notified_at, next.previous_day()) {
            (None, _) | (Some(_), None) => true,
            (Some(at), Some(threshold)) => at < threshold.midnight().coerce(),
        }
    }
}

/// Derives the [`Date`] of the next rent increase of a newly created
/// [`Contract`] when none is supplied explicitly.
///
/// A zero `interval` means the rent never increases, in which case the
/// commencement [`Date`] itself is used as the placeholder. Otherwise the
/// commencement [`Date`] is advanced by exactly one `interval`.
///
/// # Errors
///
/// Propagates [`MonthAddError::ComponentRange`] if the advanced [`Date`] does
/// not fit the supported calendar range.
pub fn derive_next_increase_on(
    started_on: CommencementDate,
    interval: IncreaseInterval,
) -> Result<IncreaseDate, MonthAddError> {
    if interval.is_zero() {
        Ok(started_on.coerce())
    } else {
        started_on
            .advanced_by_months(interval.months())
            .map(DateOf::coerce)
    }
}

/// ID of a [`Contract`].
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
    #[doc = "Status of a [`Contract`]."]
    enum Status {
        #[doc = "In effect."]
        Active = 1,

        #[doc = "Ran to its term. Terminal."]
        Finished = 2,

        #[doc = "Terminated early. Terminal."]
        Rescinded = 3,
    }
}

impl Status {
    /// Indicates whether this [`Status`] admits no further transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        match self {
            Self::Active => false,
            Self::Finished | Self::Rescinded => true,
        }
    }
}

/// Day of month (1-28) the monthly rent of a [`Contract`] is due.
///
/// Days 29-31 are not representable, so the rent is due on the same day
/// every month.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[serde(try_from = "i16")]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct PaymentDay(i16);

impl PaymentDay {
    /// Creates a new [`PaymentDay`] if the given `day` is within 1-28.
    #[must_use]
    pub fn new(day: i16) -> Option<Self> {
        (1..=28).contains(&day).then_some(Self(day))
    }

    /// Returns the day of month of this [`PaymentDay`].
    #[must_use]
    pub fn day(self) -> i16 {
        self.0
    }
}

impl TryFrom<i16> for PaymentDay {
    type Error = &'static str;

    fn try_from(day: i16) -> Result<Self, Self::Error> {
        Self::new(day).ok_or("`PaymentDay` must be within 1-28")
    }
}

/// Interval between rent renegotiations of a [`Contract`], in whole calendar
/// months.
///
/// Zero means the rent never increases.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[serde(try_from = "i32")]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct IncreaseInterval(i32);

impl IncreaseInterval {
    /// Creates a new [`IncreaseInterval`] if the given `months` is not
    /// negative.
    #[must_use]
    pub fn new(months: i32) -> Option<Self> {
        (months >= 0).then_some(Self(months))
    }

    /// Returns the number of months of this [`IncreaseInterval`].
    #[must_use]
    pub fn months(self) -> i32 {
        self.0
    }

    /// Indicates whether this [`IncreaseInterval`] disables rent increases.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<i32> for IncreaseInterval {
    type Error = &'static str;

    fn try_from(months: i32) -> Result<Self, Self::Error> {
        Self::new(months).ok_or("`IncreaseInterval` cannot be negative")
    }
}

/// Look-ahead window of the pending-notification selection, in days.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub struct WindowDays(u16);

impl WindowDays {
    /// Default [`WindowDays`] applied when the caller provides none.
    pub const DEFAULT: Self = Self(30);

    /// Creates a new [`WindowDays`] if the given `days` is within 1-90.
    #[must_use]
    pub fn new(days: u16) -> Option<Self> {
        (1..=90).contains(&days).then_some(Self(days))
    }

    /// Returns the number of days of this [`WindowDays`].
    #[must_use]
    pub fn days(self) -> u16 {
        self.0
    }
}

impl Default for WindowDays {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Partial last-write-wins update of a [`Contract`].
///
/// Fields left as [`None`] are untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct Patch {
    /// New expiration [`Date`], if supplied.
    pub ends_on: Option<ExpirationDate>,

    /// New [`PaymentDay`], if supplied.
    pub payment_day: Option<PaymentDay>,

    /// New monthly rent [`Amount`], if supplied.
    ///
    /// Its presence alone triggers the one-interval advance of
    /// [`Contract::next_increase_on`].
    pub current_rent: Option<Amount>,

    /// New [`IncreaseInterval`], if supplied.
    pub increase_interval: Option<IncreaseInterval>,

    /// New [`Date`] of the next rent increase, if supplied.
    pub next_increase_on: Option<IncreaseDate>,

    /// New [`DateTime`] of the last sent notification, if supplied.
    pub last_notified_at: Option<NotificationDateTime>,

    /// New [`Status`], if supplied.
    pub status: Option<Status>,
}

/// Error of applying a [`Patch`] to a [`Contract`].
#[derive(Clone, Copy, Debug, Display, Error, From)]
pub enum PatchError {
    /// [`Contract`] is in a terminal [`Status`].
    #[display("cannot change status of a {_0} contract")]
    #[from(ignore)]
    TerminalStatus(#[error(not(source))] Status),

    /// [`Patch`] moves [`Contract::last_notified_at`] backward.
    #[display("last notification timestamp cannot move backward")]
    NotificationMovedBackward,

    /// Advancing [`Contract::next_increase_on`] failed.
    MonthAdd(MonthAddError),
}

/// Unit type of a [`Contract`] commencement.
#[derive(Clone, Copy, Debug)]
pub struct Commencement;

/// Unit type of a [`Contract`] expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// Unit type of a [`Contract`] rent increase.
#[derive(Clone, Copy, Debug)]
pub struct Increase;

/// [`Date`] when a [`Contract`] commences.
pub type CommencementDate = DateOf<(Contract, Commencement)>;

/// [`Date`] when a [`Contract`] expires.
pub type ExpirationDate = DateOf<(Contract, Expiration)>;

/// [`Date`] when the next rent increase of a [`Contract`] is due.
pub type IncreaseDate = DateOf<(Contract, Increase)>;

/// [`DateTime`] when a rent-increase notification was last sent.
pub type NotificationDateTime = DateTimeOf<(Contract, unit::Notification)>;

/// [`DateTime`] when a [`Contract`] was created.
pub type CreationDateTime = DateTimeOf<(Contract, unit::Creation)>;

/// [`DateTime`] when a [`Contract`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Contract, unit::Modification)>;

#[cfg(test)]
mod spec {
    use common::{Amount, Date, DateTime};

    use crate::domain::{client, property};

    use super::{
        derive_next_increase_on, Contract, Id, IncreaseInterval, Patch,
        PatchError, PaymentDay, Status, WindowDays,
    };

    fn date(s: &str) -> Date {
        Date::from_iso8601(s).unwrap()
    }

    fn datetime(s: &str) -> DateTime {
        DateTime::from_rfc3339(s).unwrap()
    }

    fn interval(months: i32) -> IncreaseInterval {
        IncreaseInterval::new(months).unwrap()
    }

    fn contract() -> Contract {
        Contract {
            id: Id::new(),
            property_id: property::Id::new(),
            tenant_id: client::Id::new(),
            started_on: date("2024-01-15").coerce(),
            ends_on: date("2026-01-15").coerce(),
            payment_day: PaymentDay::new(10).unwrap(),
            initial_rent: Amount::new(100_000).unwrap(),
            current_rent: Amount::new(100_000).unwrap(),
            increase_interval: interval(4),
            next_increase_on: date("2024-05-15").coerce(),
            last_notified_at: None,
            status: Status::Active,
            created_at: datetime("2024-01-15T12:00:00Z").coerce(),
            modified_at: datetime("2024-01-15T12:00:00Z").coerce(),
        }
    }

    #[test]
    fn derives_next_increase_one_interval_after_commencement() {
        assert_eq!(
            derive_next_increase_on(date("2024-01-15").coerce(), interval(4))
                .unwrap(),
            date("2024-05-15").coerce(),
        );
        assert_eq!(
            derive_next_increase_on(date("2024-01-31").coerce(), interval(1))
                .unwrap(),
            date("2024-02-29").coerce(),
        );
    }

    #[test]
    fn derives_commencement_date_itself_on_zero_interval() {
        assert_eq!(
            derive_next_increase_on(date("2024-01-15").coerce(), interval(0))
                .unwrap(),
            date("2024-01-15").coerce(),
        );
    }

    #[test]
    fn rent_update_advances_next_increase_by_exactly_one_interval() {
        let mut c = contract();

        c.apply(Patch {
            current_rent: Amount::new(120_000),
            ..Patch::default()
        })
        .unwrap();
        assert_eq!(c.current_rent, Amount::new(120_000).unwrap());
        assert_eq!(c.next_increase_on, date("2024-09-15").coerce());

        c.apply(Patch {
            current_rent: Amount::new(140_000),
            ..Patch::default()
        })
        .unwrap();
        assert_eq!(c.next_increase_on, date("2025-01-15").coerce());
    }

    #[test]
    fn rent_update_advances_from_supplied_next_increase_date() {
        let mut c = contract();

        c.apply(Patch {
            current_rent: Amount::new(120_000),
            next_increase_on: Some(date("2024-07-01").coerce()),
            ..Patch::default()
        })
        .unwrap();

        assert_eq!(c.next_increase_on, date("2024-11-01").coerce());
    }

    #[test]
    fn update_without_rent_change_never_advances() {
        let mut c = contract();

        c.apply(Patch {
            payment_day: PaymentDay::new(5),
            ends_on: Some(date("2027-01-15").coerce()),
            ..Patch::default()
        })
        .unwrap();

        assert_eq!(c.next_increase_on, date("2024-05-15").coerce());
    }

    #[test]
    fn rent_update_on_zero_interval_leaves_next_increase_as_is() {
        let mut c = contract();
        c.increase_interval = interval(0);

        c.apply(Patch {
            current_rent: Amount::new(120_000),
            ..Patch::default()
        })
        .unwrap();

        assert_eq!(c.next_increase_on, date("2024-05-15").coerce());
    }

    #[test]
    fn rent_update_uses_interval_supplied_by_the_same_patch() {
        let mut c = contract();

        c.apply(Patch {
            current_rent: Amount::new(120_000),
            increase_interval: Some(interval(6)),
            ..Patch::default()
        })
        .unwrap();

        assert_eq!(c.next_increase_on, date("2024-11-15").coerce());
    }

    #[test]
    fn active_contract_can_finish_and_rescind() {
        let mut c = contract();
        c.apply(Patch {
            status: Some(Status::Finished),
            ..Patch::default()
        })
        .unwrap();
        assert_eq!(c.status, Status::Finished);

        let mut c = contract();
        c.apply(Patch {
            status: Some(Status::Rescinded),
            ..Patch::default()
        })
        .unwrap();
        assert_eq!(c.status, Status::Rescinded);
    }

    #[test]
    fn terminal_status_rejects_transitions() {
        let mut c = contract();
        c.status = Status::Finished;

        assert!(matches!(
            c.apply(Patch {
                status: Some(Status::Active),
                ..Patch::default()
            }),
            Err(PatchError::TerminalStatus(Status::Finished)),
        ));
    }

    #[test]
    fn last_notification_is_monotonic() {
        let mut c = contract();
        c.last_notified_at = Some(datetime("2024-05-01T10:00:00Z").coerce());

        assert!(matches!(
            c.apply(Patch {
                last_notified_at: Some(
                    datetime("2024-04-30T10:00:00Z").coerce(),
                ),
                ..Patch::default()
            }),
            Err(PatchError::NotificationMovedBackward),
        ));

        c.apply(Patch {
            last_notified_at: Some(datetime("2024-05-02T10:00:00Z").coerce()),
            ..Patch::default()
        })
        .unwrap();
        assert_eq!(
            c.last_notified_at,
            Some(datetime("2024-05-02T10:00:00Z").coerce()),
        );
    }

    #[test]
    fn notification_requires_active_status() {
        let window = WindowDays::default();
        let today = date("2024-05-01");

        let mut c = contract();
        assert!(c.needs_increase_notification(today, window));

        c.status = Status::Finished;
        assert!(!c.needs_increase_notification(today, window));

        c.status = Status::Rescinded;
        assert!(!c.needs_increase_notification(today, window));
    }

    #[test]
    fn notification_requires_increase_within_window() {
        let c = contract();
        let window = WindowDays::new(30).unwrap();

        // 2024-05-15 is within [today, today + 30].
        assert!(c.needs_increase_notification(date("2024-04-15"), window));
        assert!(c.needs_increase_notification(date("2024-05-15"), window));

        // Already passed, or still too far ahead.
        assert!(!c.needs_increase_notification(date("2024-05-16"), window));
        assert!(!c.needs_increase_notification(date("2024-04-14"), window));
    }

    #[test]
    fn notification_suppressed_within_one_day_of_increase() {
        let mut c = contract();
        let window = WindowDays::new(30).unwrap();
        let today = date("2024-05-01");

        // Notified strictly before the day preceding the increase.
        c.last_notified_at = Some(datetime("2024-05-13T23:59:59Z").coerce());
        assert!(c.needs_increase_notification(today, window));

        // Notified on or after the preceding day's midnight.
        c.last_notified_at = Some(datetime("2024-05-14T00:00:00Z").coerce());
        assert!(!c.needs_increase_notification(today, window));

        c.last_notified_at = Some(datetime("2024-05-14T09:30:00Z").coerce());
        assert!(!c.needs_increase_notification(today, window));
    }

    #[test]
    fn payment_day_bounds() {
        assert!(PaymentDay::new(0).is_none());
        assert!(PaymentDay::new(29).is_none());
        assert!(PaymentDay::new(1).is_some());
        assert!(PaymentDay::new(28).is_some());
    }

    #[test]
    fn window_days_bounds() {
        assert!(WindowDays::new(0).is_none());
        assert!(WindowDays::new(91).is_none());
        assert!(WindowDays::new(1).is_some());
        assert!(WindowDays::new(90).is_some());
        assert_eq!(WindowDays::default().days(), 30);
    }
}
