//! [`Query`] collection related to [`Agent`]s.

use common::{operations::By, pagination};

use crate::domain::{agent, user, Agent};
#[cfg(doc)]
use crate::{domain::User, Query};

use super::DatabaseQuery;

/// Queries an [`Agent`] by its [`agent::Id`].
pub type ById = DatabaseQuery<By<Option<Agent>, agent::Id>>;

/// Queries an [`Agent`] by ID of its [`User`] account.
pub type ByUserId = DatabaseQuery<By<Option<Agent>, user::Id>>;

/// Queries a page of all [`Agent`]s ordered by ID.
pub type List = DatabaseQuery<By<Vec<Agent>, pagination::Arguments>>;
