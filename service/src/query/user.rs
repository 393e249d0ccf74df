//! [`Query`] collection related to [`User`]s.

use common::{operations::By, pagination};

use crate::domain::{person, user, User};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`User`] by its [`user::Id`].
pub type ById = DatabaseQuery<By<Option<User>, user::Id>>;

/// Queries a [`User`] by its login [`person::Email`].
pub type ByEmail<'e> = DatabaseQuery<By<Option<User>, &'e person::Email>>;

/// Queries a page of all [`User`]s ordered by ID.
pub type List = DatabaseQuery<By<Vec<User>, pagination::Arguments>>;
