//! [`Query`] collection related to [`Contract`]s.

use common::operations::By;

use crate::{
    domain::{contract, Contract},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Contract`] by its [`contract::Id`].
pub type ById = DatabaseQuery<By<Option<Contract>, contract::Id>>;

/// Queries a filtered page of [`Contract`]s ordered by ID.
pub type List =
    DatabaseQuery<By<Vec<Contract>, read::contract::list::Selector>>;

/// Queries [`Contract`]s due a rent-increase notification.
///
/// The SQL narrows by status and window; the full anti-duplication predicate
/// is [`Contract::needs_increase_notification`].
pub type PendingIncreases =
    DatabaseQuery<By<Vec<Contract>, read::contract::PendingIncreases>>;
