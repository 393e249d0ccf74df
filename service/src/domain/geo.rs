//! Geographic catalog definitions.
//!
//! [`Country`], [`Province`] and [`Locality`] form a read-only catalog seeded
//! by migrations. [`Address`]es reference a [`Locality`].
//!
//! [`Address`]: crate::domain::Address

use std::str::FromStr;

use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

pub mod country {
    //! [`Country`] identity.
    //!
    //! [`Country`]: super::Country

    use derive_more::{Display, From, FromStr, Into};
    #[cfg(feature = "postgres")]
    use postgres_types::{FromSql, ToSql};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    /// ID of a [`Country`].
    ///
    /// [`Country`]: super::Country
    #[derive(
        Clone,
        Copy,
        Debug,
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
    #[cfg_attr(
        feature = "postgres",
        derive(ToSql, FromSql),
        postgres(transparent)
    )]
    pub struct Id(Uuid);
}

pub mod province {
    //! [`Province`] identity.
    //!
    //! [`Province`]: super::Province

    use derive_more::{Display, From, FromStr, Into};
    #[cfg(feature = "postgres")]
    use postgres_types::{FromSql, ToSql};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    /// ID of a [`Province`].
    ///
    /// [`Province`]: super::Province
    #[derive(
        Clone,
        Copy,
        Debug,
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
    #[cfg_attr(
        feature = "postgres",
        derive(ToSql, FromSql),
        postgres(transparent)
    )]
    pub struct Id(Uuid);
}

pub mod locality {
    //! [`Locality`] identity.
    //!
    //! [`Locality`]: super::Locality

    use derive_more::{Display, From, FromStr, Into};
    #[cfg(feature = "postgres")]
    use postgres_types::{FromSql, ToSql};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    /// ID of a [`Locality`].
    ///
    /// [`Locality`]: super::Locality
    #[derive(
        Clone,
        Copy,
        Debug,
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
    #[cfg_attr(
        feature = "postgres",
        derive(ToSql, FromSql),
        postgres(transparent)
    )]
    pub struct Id(Uuid);
}

/// Country of the geographic catalog.
#[derive(Clone, Debug)]
pub struct Country {
    /// ID of this [`Country`].
    pub id: country::Id,

    /// [`Name`] of this [`Country`].
    pub name: Name,
}

/// Province of a [`Country`].
#[derive(Clone, Debug)]
pub struct Province {
    /// ID of this [`Province`].
    pub id: province::Id,

    /// ID of the [`Country`] this [`Province`] belongs to.
    pub country_id: country::Id,

    /// [`Name`] of this [`Province`].
    pub name: Name,
}

/// Locality of a [`Province`].
#[derive(Clone, Debug)]
pub struct Locality {
    /// ID of this [`Locality`].
    pub id: locality::Id,

    /// ID of the [`Province`] this [`Locality`] belongs to.
    pub province_id: province::Id,

    /// [`Name`] of this [`Locality`].
    pub name: Name,
}

/// Name of a [`Country`], [`Province`] or [`Locality`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 256
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}
