//! [`Query`] collection related to [`Client`]s.

use common::{operations::By, pagination};

use crate::domain::{client, person, Client};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Client`] by its [`client::Id`].
pub type ById = DatabaseQuery<By<Option<Client>, client::Id>>;

/// Queries a [`Client`] by its [`person::DocumentNumber`].
pub type ByDocumentNumber<'n> =
    DatabaseQuery<By<Option<Client>, &'n person::DocumentNumber>>;

/// Queries a page of all [`Client`]s ordered by ID.
pub type List = DatabaseQuery<By<Vec<Client>, pagination::Arguments>>;
