//! [`Client`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, Date, DateOf, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Address;
use crate::domain::{
    address,
    person::{
        DocumentKind, DocumentNumber, Email, FiscalStatus, FirstName, Gender,
        LastName, Phone,
    },
};

/// Client of the agency: a property owner or a tenant.
#[derive(Clone, Debug, From)]
pub struct Client {
    /// ID of this [`Client`].
    pub id: Id,

    /// [`FirstName`] of this [`Client`].
    pub first_name: FirstName,

    /// [`LastName`] of this [`Client`].
    pub last_name: LastName,

    /// [`DocumentKind`] of this [`Client`]'s identity document.
    pub document_kind: DocumentKind,

    /// [`DocumentNumber`] of this [`Client`]'s identity document.
    ///
    /// Unique across all [`Client`]s.
    pub document_number: DocumentNumber,

    /// [`Email`] of this [`Client`], if any.
    pub email: Option<Email>,

    /// Landline [`Phone`] of this [`Client`], if any.
    pub phone: Option<Phone>,

    /// Mobile [`Phone`] of this [`Client`], if any.
    pub mobile: Option<Phone>,

    /// [`Date`] when this [`Client`] was born, if known.
    pub born_on: Option<BirthDate>,

    /// [`Gender`] of this [`Client`], if known.
    pub gender: Option<Gender>,

    /// [`FiscalStatus`] of this [`Client`], if known.
    pub fiscal_status: Option<FiscalStatus>,

    /// ID of the [`Address`] of this [`Client`], if any.
    pub address_id: Option<address::Id>,

    /// [`DateTime`] when this [`Client`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Client`].
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

/// Unit type of a [`Client`] birth.
#[derive(Clone, Copy, Debug)]
pub struct Birth;

/// [`Date`] when a [`Client`] was born.
pub type BirthDate = DateOf<(Client, Birth)>;

/// [`DateTime`] when a [`Client`] was created.
pub type CreationDateTime = DateTimeOf<(Client, unit::Creation)>;
