//! [`Query`] collection related to [`Image`]s.

use common::operations::By;

use crate::domain::{image, Image};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Image`] by its [`image::Id`].
pub type ById = DatabaseQuery<By<Option<Image>, image::Id>>;

/// Queries all [`Image`]s of an [`image::Owner`], newest first.
pub type ByOwner = DatabaseQuery<By<Vec<Image>, image::Owner>>;
