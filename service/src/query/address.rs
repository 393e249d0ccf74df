//! [`Query`] collection related to [`Address`]es.

use common::operations::By;

use crate::domain::{address, Address};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Address`] by its [`address::Id`].
pub type ById = DatabaseQuery<By<Option<Address>, address::Id>>;
