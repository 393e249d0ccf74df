//! [`Query`] collection related to the geographic catalog.

use common::operations::By;

use crate::domain::geo;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all [`geo::Country`]s of the catalog.
pub type Countries = DatabaseQuery<By<Vec<geo::Country>, ()>>;

/// Queries [`geo::Province`]s of a [`geo::Country`].
pub type Provinces =
    DatabaseQuery<By<Vec<geo::Province>, geo::country::Id>>;

/// Queries [`geo::Locality`]s of a [`geo::Province`].
pub type Localities =
    DatabaseQuery<By<Vec<geo::Locality>, geo::province::Id>>;
