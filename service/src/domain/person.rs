//! Personal data definitions shared by [`Client`]s, [`Agent`]s and
//! [`User`]s.
//!
//! [`Agent`]: crate::domain::Agent
//! [`Client`]: crate::domain::Client
//! [`User`]: crate::domain::User

use std::{str::FromStr, sync::LazyLock};

use common::define_kind;
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;

/// First name of a person.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct FirstName(String);

impl FirstName {
    /// Creates a new [`FirstName`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`FirstName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`FirstName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 128
    }
}

impl FromStr for FirstName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `FirstName`")
    }
}

/// Last name of a person.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct LastName(String);

impl LastName {
    /// Creates a new [`LastName`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`LastName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`LastName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 128
    }
}

impl FromStr for LastName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `LastName`")
    }
}

define_kind! {
    #[doc = "Kind of an identity document."]
    enum DocumentKind {
        #[doc = "National identity document (DNI)."]
        Dni = 1,

        #[doc = "Unified tax identification code (CUIT)."]
        Cuit = 2,

        #[doc = "Unified labour identification code (CUIL)."]
        Cuil = 3,

        #[doc = "Passport."]
        Passport = 4,

        #[doc = "Any other identity document."]
        Other = 5,
    }
}

/// Number of an identity document.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct DocumentNumber(String);

impl DocumentNumber {
    /// Creates a new [`DocumentNumber`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `number` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Creates a new [`DocumentNumber`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`DocumentNumber`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`DocumentNumber`] invariants:
        /// - Must consist of digits, Latin letters and dashes;
        /// - Must be between 4 and 32 characters long.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[0-9A-Za-z-]{4,32}$").expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for DocumentNumber {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `DocumentNumber`")
    }
}

/// Phone number of a person.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `phone` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    /// Creates a new [`Phone`] if the given `phone` is valid.
    #[must_use]
    pub fn new(phone: impl Into<String>) -> Option<Self> {
        let phone = phone.into();
        Self::check(&phone).then_some(Self(phone))
    }

    /// Checks whether the given `phone` is a valid [`Phone`].
    fn check(phone: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] invariants:
        /// - Must consist of digits, spaces, parentheses and dashes, with an
        ///   optional leading `+`;
        /// - Must be between 5 and 20 characters long.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?[0-9 ()-]{5,20}$").expect("valid regex")
        });

        REGEX.is_match(phone.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Email address of a person.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] invariants:
        /// - Must have a local part and a domain separated by `@`;
        /// - Must not contain whitespace;
        /// - Must be at most 254 characters long.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^@\s]{1,64}@[^@\s]+\.[^@\s]+$").expect("valid regex")
        });

        address.as_ref().len() <= 254 && REGEX.is_match(address.as_ref())
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

define_kind! {
    #[doc = "Gender of a person."]
    enum Gender {
        #[doc = "Male."]
        Male = 1,

        #[doc = "Female."]
        Female = 2,

        #[doc = "Other."]
        Other = 3,
    }
}

define_kind! {
    #[doc = "Fiscal status of a person towards the tax authority."]
    enum FiscalStatus {
        #[doc = "Registered responsible."]
        RegisteredResponsible = 1,

        #[doc = "Non-registered responsible."]
        NonRegisteredResponsible = 2,

        #[doc = "Exempt."]
        Exempt = 3,

        #[doc = "Final consumer."]
        FinalConsumer = 4,

        #[doc = "Monotax payer."]
        Monotax = 5,

        #[doc = "Non-responsible."]
        NonResponsible = 6,

        #[doc = "Any other fiscal status."]
        Other = 7,
    }
}

#[cfg(test)]
mod spec {
    use super::{DocumentNumber, Email, Phone};

    #[test]
    fn email_format() {
        assert!(Email::new("agent@example.com").is_some());
        assert!(Email::new("a.b+c@mail.example.org").is_some());
        assert!(Email::new("not-an-email").is_none());
        assert!(Email::new("two@@example.com").is_none());
        assert!(Email::new("with space@example.com").is_none());
    }

    #[test]
    fn phone_format() {
        assert!(Phone::new("+54 11 5555-1234").is_some());
        assert!(Phone::new("555-0199").is_some());
        assert!(Phone::new("call me").is_none());
        assert!(Phone::new("123").is_none());
    }

    #[test]
    fn document_number_format() {
        assert!(DocumentNumber::new("30123456").is_some());
        assert!(DocumentNumber::new("20-30123456-7").is_some());
        assert!(DocumentNumber::new("123").is_none());
        assert!(DocumentNumber::new("12 34 56").is_none());
    }
}
