//! [`Query`] collection related to [`Payment`]s.

use common::operations::By;

use crate::domain::{invoice, payment, Payment};
#[cfg(doc)]
use crate::{domain::Invoice, Query};

use super::DatabaseQuery;

/// Queries a [`Payment`] by its [`payment::Id`].
pub type ById = DatabaseQuery<By<Option<Payment>, payment::Id>>;

/// Queries all [`Payment`]s of an [`Invoice`], newest first.
pub type ByInvoice = DatabaseQuery<By<Vec<Payment>, invoice::Id>>;
