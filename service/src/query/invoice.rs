//! [`Query`] collection related to [`Invoice`]s.

use common::operations::By;

use crate::{
    domain::{invoice, Invoice},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Invoice`] by its [`invoice::Id`].
pub type ById = DatabaseQuery<By<Option<Invoice>, invoice::Id>>;

/// Queries a filtered page of [`Invoice`]s, newest first.
pub type List =
    DatabaseQuery<By<Vec<Invoice>, read::invoice::list::Selector>>;
