//! Date and time utilities.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{cmp::Ordering, fmt, marker::PhantomData, ops, time::Duration};

use derive_more::{Debug, Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::{
    format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, UtcOffset,
};

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// Untyped calendar date.
pub type Date = DateOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// A [`DateTime`] representing the Unix epoch.
    pub const UNIX_EPOCH: Self = Self {
        inner: time::OffsetDateTime::UNIX_EPOCH,
        _of: PhantomData,
    };

    /// Creates a new [`DateTime`] representing the current date and time.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn now() -> Self {
        let inner = time::OffsetDateTime::now_utc();
        Self {
            _of: PhantomData,
            inner: inner
                .replace_microsecond(inner.microsecond())
                .expect("infallible"),
        }
    }

    /// Creates a new [`DateTime`] from the provided [`UNIX_EPOCH`] timestamp.
    ///
    /// [`None`] is returned if the timestamp is invalid.
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn from_unix_timestamp(timestamp: i64) -> Option<Self> {
        Some(Self {
            inner: time::OffsetDateTime::from_unix_timestamp(timestamp).ok()?,
            _of: PhantomData,
        })
    }

    /// Returns the [`UNIX_EPOCH`] timestamp of this [`DateTime`].
    ///
    /// [`UNIX_EPOCH`]: Self::UNIX_EPOCH
    #[must_use]
    pub fn unix_timestamp(&self) -> i64 {
        self.inner.unix_timestamp()
    }

    /// Creates a new [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        use ParseError as E;

        time::OffsetDateTime::parse(input, &Rfc3339)
            .map_err(E::Parse)?
            .try_into()
            .map_err(E::ComponentRange)
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }

    /// Returns the [`Date`] part of this [`DateTime`].
    #[must_use]
    pub fn date(&self) -> DateOf<Of> {
        DateOf {
            inner: self.inner.date(),
            _of: PhantomData,
        }
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing [`DateTime`] or [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse the string.
    Parse(time::error::Parse),

    /// Parsed value has an out of range component.
    ComponentRange(time::error::ComponentRange),
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> TryFrom<time::OffsetDateTime> for DateTimeOf<Of> {
    type Error = time::error::ComponentRange;

    fn try_from(dt: time::OffsetDateTime) -> Result<Self, Self::Error> {
        dt.to_offset(UtcOffset::UTC)
            .replace_microsecond(dt.microsecond())
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for time::OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.inner
    }
}

impl<Of: ?Sized> ops::Add<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self {
            inner: self.inner + rhs,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> ops::Sub for DateTimeOf<Of> {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        (self.inner - rhs.inner)
            .try_into()
            .expect("duration overflow")
    }
}

impl<Of: ?Sized> ops::Sub<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self {
            inner: self.inner - rhs,
            _of: PhantomData,
        }
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> FromSql<'_> for DateTimeOf<Of> {
    accepts!(TIMESTAMPTZ);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::OffsetDateTime::from_sql(ty, raw)?
            .try_into()
            .map_err(Box::from)
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> ToSql for DateTimeOf<Of> {
    accepts!(TIMESTAMPTZ);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.inner.to_sql(ty, w)
    }
}

/// Format of an [ISO 8601] calendar date (`YYYY-MM-DD`).
///
/// [ISO 8601]: https://wikipedia.org/wiki/ISO_8601
const ISO8601_DATE: &[BorrowedFormatItem<'_>] =
    time::macros::format_description!("[year]-[month]-[day]");

/// Calendar date without a time component.
#[derive(Debug)]
pub struct DateOf<Of: ?Sized = ()> {
    /// Inner representation of the date.
    #[debug("{inner}")]
    inner: time::Date,

    /// Type parameter describing the kind of date.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateOf<Of> {
    /// Creates a new [`Date`] representing the current date in UTC.
    #[must_use]
    pub fn today() -> Self {
        Self {
            inner: time::OffsetDateTime::now_utc().date(),
            _of: PhantomData,
        }
    }

    /// Creates a new [`Date`] from the provided [ISO 8601] `YYYY-MM-DD`
    /// string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [ISO 8601] date.
    ///
    /// [ISO 8601]: https://wikipedia.org/wiki/ISO_8601
    pub fn from_iso8601(input: &str) -> Result<Self, ParseError> {
        time::Date::parse(input, ISO8601_DATE)
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
            .map_err(ParseError::Parse)
    }

    /// Returns the [`Date`] as an [ISO 8601] `YYYY-MM-DD` string.
    ///
    /// [ISO 8601]: https://wikipedia.org/wiki/ISO_8601
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.inner.format(ISO8601_DATE).unwrap_or_else(|e| {
            panic!("cannot format `Date` as ISO 8601: {e}")
        })
    }

    /// Returns this [`Date`] advanced by exactly the provided number of
    /// whole calendar months.
    ///
    /// The day-of-month is preserved where valid and clamped to the last
    /// valid day of the resulting month otherwise (`2024-01-31` advanced by
    /// 1 month is `2024-02-29`).
    ///
    /// # Errors
    ///
    /// - [`MonthAddError::InvalidInterval`] if `months` is zero or negative
    ///   (a caller contract violation, never clamped silently);
    /// - [`MonthAddError::ComponentRange`] if the resulting date does not
    ///   fit the supported calendar range.
    #[expect(clippy::missing_panics_doc, reason = "month is within 1..=12")]
    pub fn advanced_by_months(self, months: i32) -> Result<Self, MonthAddError> {
        use MonthAddError as E;

        if months <= 0 {
            return Err(E::InvalidInterval(months));
        }

        // `months` can be up to `i32::MAX`, so the zero-based sum needs
        // `i64`. A year not fitting `i32` is out of the calendar range,
        // which `from_calendar_date()` reports below.
        let zero_based =
            i64::from(u8::from(self.inner.month())) - 1 + i64::from(months);
        let year = i64::from(self.inner.year()) + zero_based.div_euclid(12);
        let year = i32::try_from(year).unwrap_or(i32::MAX);
        let month = time::Month::try_from(
            u8::try_from(zero_based.rem_euclid(12) + 1)
                .expect("within 1..=12"),
        )
        .expect("within 1..=12");
        let day = self
            .inner
            .day()
            .min(time::util::days_in_year_month(year, month));

        time::Date::from_calendar_date(year, month, day)
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
            .map_err(E::ComponentRange)
    }

    /// Returns this [`Date`] advanced by the provided number of days.
    ///
    /// [`None`] is returned if the resulting date does not fit the supported
    /// calendar range.
    #[must_use]
    pub fn advanced_by_days(self, days: u16) -> Option<Self> {
        self.inner
            .checked_add(time::Duration::days(days.into()))
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
    }

    /// Returns the [`Date`] preceding this one.
    ///
    /// [`None`] is returned if this [`Date`] is the first representable one.
    #[must_use]
    pub fn previous_day(self) -> Option<Self> {
        self.inner.previous_day().map(|inner| Self {
            inner,
            _of: PhantomData,
        })
    }

    /// Returns the [`DateTime`] of this [`Date`]'s midnight in UTC.
    #[must_use]
    pub fn midnight(self) -> DateTimeOf<Of> {
        DateTimeOf {
            inner: self.inner.midnight().assume_utc(),
            _of: PhantomData,
        }
    }

    /// Coerces one kind of [`Date`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateOf<NewOf> {
        DateOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of advancing a [`Date`] by calendar months.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum MonthAddError {
    /// Provided interval of months is zero or negative.
    #[display("invalid interval of months: {_0}")]
    InvalidInterval(#[error(not(source))] i32),

    /// Resulting [`Date`] has an out of range component.
    ComponentRange(time::error::ComponentRange),
}

impl<Of: ?Sized> Copy for DateOf<Of> {}
impl<Of: ?Sized> Clone for DateOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateOf<Of> {}
impl<Of: ?Sized> PartialEq for DateOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> fmt::Display for DateOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso8601())
    }
}

impl<Of: ?Sized> std::str::FromStr for DateOf<Of> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iso8601(s)
    }
}

impl<Of: ?Sized> From<time::Date> for DateOf<Of> {
    fn from(inner: time::Date) -> Self {
        Self {
            inner,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> From<DateOf<Of>> for time::Date {
    fn from(date: DateOf<Of>) -> Self {
        date.inner
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> FromSql<'_> for DateOf<Of> {
    accepts!(DATE);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        Ok(time::Date::from_sql(ty, raw)?.into())
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> ToSql for DateOf<Of> {
    accepts!(DATE);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.inner.to_sql(ty, w)
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    //! Module providing integration with [`serde`] crate.

    use super::{DateOf, DateTimeOf};

    pub mod unix_timestamp {
        //! Module providing serialization and deserialization of
        //! [`DateTimeOf`] as a Unix timestamp.

        use serde::{de::Error, Deserialize, Deserializer, Serializer};

        use super::DateTimeOf;

        /// Serializes the [`DateTimeOf`] as a Unix timestamp.
        ///
        /// # Errors
        ///
        /// Returns an error if the timestamp is invalid.
        pub fn serialize<Of, S>(
            dt: &DateTimeOf<Of>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
            Of: ?Sized,
        {
            serializer.serialize_i64(dt.unix_timestamp())
        }

        /// Deserializes the Unix timestamp into a [`DateTimeOf`].
        ///
        /// # Errors
        ///
        /// Returns an error if the timestamp is invalid.
        pub fn deserialize<'de, D, Of>(
            deserializer: D,
        ) -> Result<DateTimeOf<Of>, D::Error>
        where
            D: Deserializer<'de>,
            Of: ?Sized,
        {
            DateTimeOf::from_unix_timestamp(i64::deserialize(deserializer)?)
                .ok_or_else(|| Error::custom("invalid timestamp"))
        }
    }

    pub mod rfc3339 {
        //! Module providing serialization and deserialization of
        //! [`DateTimeOf`] as an [RFC 3339] string.
        //!
        //! [RFC 3339]: https://tools.ietf.org/html/rfc3339

        use serde::{de::Error, Deserialize, Deserializer, Serializer};

        use super::DateTimeOf;

        /// Serializes the [`DateTimeOf`] as an [RFC 3339] string.
        ///
        /// # Errors
        ///
        /// Never.
        ///
        /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
        pub fn serialize<Of, S>(
            dt: &DateTimeOf<Of>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
            Of: ?Sized,
        {
            serializer.serialize_str(&dt.to_rfc3339())
        }

        /// Deserializes the [RFC 3339] string into a [`DateTimeOf`].
        ///
        /// # Errors
        ///
        /// Returns an error if the string is not a valid [RFC 3339] date and
        /// time.
        ///
        /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
        pub fn deserialize<'de, D, Of>(
            deserializer: D,
        ) -> Result<DateTimeOf<Of>, D::Error>
        where
            D: Deserializer<'de>,
            Of: ?Sized,
        {
            DateTimeOf::from_rfc3339(&String::deserialize(deserializer)?)
                .map_err(Error::custom)
        }
    }

    impl<Of: ?Sized> ::serde::Serialize for DateOf<Of> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: ::serde::Serializer,
        {
            serializer.serialize_str(&self.to_iso8601())
        }
    }

    impl<'de, Of: ?Sized> ::serde::Deserialize<'de> for DateOf<Of> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: ::serde::Deserializer<'de>,
        {
            use ::serde::Deserialize as _;

            Self::from_iso8601(&String::deserialize(deserializer)?)
                .map_err(::serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Date, MonthAddError};

    fn date(s: &str) -> Date {
        Date::from_iso8601(s).unwrap()
    }

    #[test]
    fn advances_by_whole_months_preserving_day() {
        assert_eq!(
            date("2024-01-15").advanced_by_months(4).unwrap(),
            date("2024-05-15"),
        );
        assert_eq!(
            date("2024-05-15").advanced_by_months(4).unwrap(),
            date("2024-09-15"),
        );
        assert_eq!(
            date("2024-11-10").advanced_by_months(3).unwrap(),
            date("2025-02-10"),
        );
        assert_eq!(
            date("2020-06-01").advanced_by_months(48).unwrap(),
            date("2024-06-01"),
        );
    }

    #[test]
    fn clamps_to_last_day_of_shorter_month() {
        assert_eq!(
            date("2024-01-31").advanced_by_months(1).unwrap(),
            date("2024-02-29"),
        );
        assert_eq!(
            date("2023-01-31").advanced_by_months(1).unwrap(),
            date("2023-02-28"),
        );
        assert_eq!(
            date("2024-03-31").advanced_by_months(1).unwrap(),
            date("2024-04-30"),
        );
        assert_eq!(
            date("2024-02-29").advanced_by_months(12).unwrap(),
            date("2025-02-28"),
        );
    }

    #[test]
    fn advancing_twice_equals_advancing_by_the_sum() {
        for (start, n) in [
            ("2024-01-15", 4),
            ("2024-07-01", 6),
            ("2023-12-31", 1),
            ("2024-02-29", 12),
        ] {
            assert_eq!(
                date(start)
                    .advanced_by_months(n)
                    .unwrap()
                    .advanced_by_months(n)
                    .unwrap(),
                date(start).advanced_by_months(2 * n).unwrap(),
                "start: {start}, months: {n}",
            );
        }
    }

    #[test]
    fn rejects_non_positive_interval() {
        assert!(matches!(
            date("2024-01-15").advanced_by_months(0),
            Err(MonthAddError::InvalidInterval(0)),
        ));
        assert!(matches!(
            date("2024-01-15").advanced_by_months(-3),
            Err(MonthAddError::InvalidInterval(-3)),
        ));
    }

    #[test]
    fn rejects_interval_exceeding_the_calendar() {
        assert!(matches!(
            date("2024-12-15").advanced_by_months(i32::MAX - 5),
            Err(MonthAddError::ComponentRange(_)),
        ));
        assert!(matches!(
            date("2024-01-15").advanced_by_months(i32::MAX),
            Err(MonthAddError::ComponentRange(_)),
        ));
    }

    #[test]
    fn advances_by_days() {
        assert_eq!(
            date("2024-02-28").advanced_by_days(2).unwrap(),
            date("2024-03-01"),
        );
        assert_eq!(
            date("2024-12-31").advanced_by_days(30).unwrap(),
            date("2025-01-30"),
        );
    }

    #[test]
    fn roundtrips_iso8601() {
        assert_eq!(date("2024-05-15").to_iso8601(), "2024-05-15");
        assert!(Date::from_iso8601("15/05/2024").is_err());
        assert!(Date::from_iso8601("2024-13-01").is_err());
    }
}
