//! [`Query`] collection related to [`Property`]s.

use common::operations::By;

use crate::{
    domain::{property, Property},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Property`] by its [`property::Id`].
pub type ById = DatabaseQuery<By<Option<Property>, property::Id>>;

/// Queries a filtered page of [`Property`]s ordered by ID.
pub type List =
    DatabaseQuery<By<Vec<Property>, read::property::list::Selector>>;
