//! [`Agent`] definitions.

use std::{str::FromStr as _, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{unit, Date, DateOf, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Address, User};
use crate::domain::{
    address,
    person::{DocumentKind, DocumentNumber, Phone},
    user,
};

/// Real-estate agent employed by the agency.
///
/// An [`Agent`] always references the [`User`] account it authenticates with.
#[derive(Clone, Debug, From)]
pub struct Agent {
    /// ID of this [`Agent`].
    pub id: Id,

    /// ID of the [`User`] account of this [`Agent`].
    ///
    /// Unique across all [`Agent`]s.
    pub user_id: user::Id,

    /// [`DocumentKind`] of this [`Agent`]'s identity document.
    pub document_kind: DocumentKind,

    /// [`DocumentNumber`] of this [`Agent`]'s identity document.
    pub document_number: DocumentNumber,

    /// [`Phone`] of this [`Agent`], if any.
    pub phone: Option<Phone>,

    /// [`Date`] when this [`Agent`] was born, if known.
    pub born_on: Option<BirthDate>,

    /// Professional [`Licence`] of this [`Agent`], if any.
    pub licence: Option<Licence>,

    /// Indicator whether this [`Agent`] is currently employed.
    pub is_active: bool,

    /// ID of the [`Address`] of this [`Agent`], if any.
    pub address_id: Option<address::Id>,

    /// [`DateTime`] when this [`Agent`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Agent`] was last modified.
    pub modified_at: ModificationDateTime,
}

/// ID of an [`Agent`].
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

/// Professional licence number of an [`Agent`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Licence(String);

impl Licence {
    /// Creates a new [`Licence`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `licence` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(licence: impl Into<String>) -> Self {
        Self(licence.into())
    }

    /// Creates a new [`Licence`] if the given `licence` is valid.
    #[must_use]
    pub fn new(licence: impl Into<String>) -> Option<Self> {
        let licence = licence.into();
        Self::check(&licence).then_some(Self(licence))
    }

    /// Checks whether the given `licence` is a valid [`Licence`].
    fn check(licence: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Licence`] invariants:
        /// - Must consist of digits, Latin letters, dots, slashes and dashes;
        /// - Must be between 2 and 32 characters long.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[0-9A-Za-z./-]{2,32}$").expect("valid regex")
        });

        REGEX.is_match(licence.as_ref())
    }
}

impl FromStr for Licence {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Licence`")
    }
}

/// Unit type of an [`Agent`] birth.
#[derive(Clone, Copy, Debug)]
pub struct Birth;

/// [`Date`] when an [`Agent`] was born.
pub type BirthDate = DateOf<(Agent, Birth)>;

/// [`DateTime`] when an [`Agent`] was created.
pub type CreationDateTime = DateTimeOf<(Agent, unit::Creation)>;

/// [`DateTime`] when an [`Agent`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Agent, unit::Modification)>;
