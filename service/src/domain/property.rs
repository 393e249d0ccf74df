//! [`Property`] definitions.

use std::str::FromStr as _;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Amount, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Address, Agent, Client, Image};
use crate::domain::{address, agent, client, image};

/// Property managed by the agency.
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Name`] of this [`Property`].
    pub name: Name,

    /// [`Kind`] of this [`Property`].
    pub kind: Kind,

    /// [`Operation`] this [`Property`] is offered for.
    pub operation: Operation,

    /// [`Status`] of this [`Property`].
    pub status: Status,

    /// Sale price of this [`Property`], if offered for sale.
    pub sale_price: Option<Amount>,

    /// Monthly rent price of this [`Property`], if offered for rent.
    pub rent_price: Option<Amount>,

    /// ID of the [`Client`] owning this [`Property`].
    pub owner_id: client::Id,

    /// ID of the [`Agent`] managing this [`Property`], if any.
    pub agent_id: Option<agent::Id>,

    /// ID of the [`Address`] of this [`Property`], if any.
    pub address_id: Option<address::Id>,

    /// ID of the cover [`Image`] of this [`Property`], if any.
    pub cover_image_id: Option<image::Id>,

    /// [`Description`] of this [`Property`], if any.
    pub description: Option<Description>,

    /// Physical [`Features`] of this [`Property`].
    pub features: Features,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Property`] was last modified.
    pub modified_at: ModificationDateTime,
}

/// ID of a [`Property`].
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

/// Name of a [`Property`].
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

/// Description of a [`Property`].
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
        !text.is_empty() && text.len() <= 8192
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

define_kind! {
    #[doc = "Kind of a [`Property`]."]
    enum Kind {
        #[doc = "A standalone house."]
        House = 1,

        #[doc = "An apartment in a building."]
        Apartment = 2,

        #[doc = "An office space."]
        Office = 3,

        #[doc = "A commercial space."]
        Commercial = 4,

        #[doc = "An empty lot."]
        Lot = 5,

        #[doc = "A garage."]
        Garage = 6,

        #[doc = "A warehouse."]
        Warehouse = 7,

        #[doc = "Any other kind of property."]
        Other = 8,
    }
}

define_kind! {
    #[doc = "Operation a [`Property`] is offered for."]
    enum Operation {
        #[doc = "Offered for sale only."]
        Sale = 1,

        #[doc = "Offered for rent only."]
        Rent = 2,

        #[doc = "Offered both for sale and for rent."]
        Both = 3,
    }
}

define_kind! {
    #[doc = "Status of a [`Property`]."]
    enum Status {
        #[doc = "Not yet published."]
        Draft = 1,

        #[doc = "Published and available."]
        Active = 2,

        #[doc = "Withdrawn from the market."]
        Inactive = 3,

        #[doc = "Reserved by a prospective buyer or tenant."]
        Reserved = 4,

        #[doc = "Sold."]
        Sold = 5,

        #[doc = "Rented out."]
        Rented = 6,
    }
}

/// Physical features of a [`Property`].
///
/// All the fields are optional, as listings are frequently created before the
/// property is surveyed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Features {
    /// Year the [`Property`] was built.
    pub year_built: Option<u16>,

    /// Number of bathrooms.
    pub bathrooms: Option<u16>,

    /// Number of bedrooms.
    pub bedrooms: Option<u16>,

    /// Total number of rooms.
    pub rooms: Option<u16>,

    /// Number of garage spots.
    pub garages: Option<u16>,

    /// Indicator whether the [`Property`] is furnished.
    pub furnished: Option<bool>,

    /// Covered surface in square meters.
    pub covered_surface: Option<u32>,

    /// Uncovered surface in square meters.
    pub uncovered_surface: Option<u32>,

    /// Total surface in square meters.
    pub total_surface: Option<u32>,
}

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;

/// [`DateTime`] when a [`Property`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Property, unit::Modification)>;
