//! [`Address`]-related handlers and representations.
//!
//! [`Address`]: domain::Address

use axum::{extract::Path, Json};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain, query,
    Query as _,
};

use crate::{AsError, Context, Error};

use super::{parse, NotFoundError};

/// Representation of a [`domain::Address`].
#[derive(Debug, Serialize)]
pub struct Address {
    /// ID of the [`domain::Address`].
    pub id: domain::address::Id,

    /// Street name.
    pub street: String,

    /// Street number.
    pub street_number: String,

    /// Postal code.
    pub postal_code: Option<String>,

    /// Neighborhood name.
    pub neighborhood: Option<String>,

    /// ID of the locality the [`domain::Address`] lies in.
    pub locality_id: domain::geo::locality::Id,
}

impl From<domain::Address> for Address {
    fn from(address: domain::Address) -> Self {
        Self {
            id: address.id,
            street: address.street.to_string(),
            street_number: address.street_number.to_string(),
            postal_code: address.postal_code.map(|c| c.to_string()),
            neighborhood: address.neighborhood.map(|n| n.to_string()),
            locality_id: address.locality_id,
        }
    }
}

/// Request body of the `POST /api/addresses` handler.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// Street name.
    pub street: String,

    /// Street number.
    pub street_number: String,

    /// Postal code.
    pub postal_code: Option<String>,

    /// Neighborhood name.
    pub neighborhood: Option<String>,

    /// ID of the locality the new [`Address`] lies in.
    pub locality_id: domain::geo::locality::Id,
}

/// Handles the `POST /api/addresses` request.
pub async fn create(
    ctx: Context,
    Json(req): Json<CreateRequest>,
) -> Result<Json<Address>, Error> {
    let CreateRequest {
        street,
        street_number,
        postal_code,
        neighborhood,
        locality_id,
    } = req;

    ctx.service()
        .execute(command::CreateAddress {
            street: parse(&street)?,
            street_number: parse(&street_number)?,
            postal_code: postal_code.as_deref().map(parse).transpose()?,
            neighborhood: neighborhood.as_deref().map(parse).transpose()?,
            locality_id,
        })
        .await
        .map(|address| Json(address.into()))
        .map_err(AsError::into_error)
}

/// Handles the `GET /api/addresses/:id` request.
pub async fn by_id(
    ctx: Context,
    Path(id): Path<domain::address::Id>,
) -> Result<Json<Address>, Error> {
    ctx.service()
        .execute(query::address::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .map(|address| Json(address.into()))
        .ok_or_else(|| NotFoundError::Address.into())
}

impl AsError for command::create_address::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::LocalityNotExists(_) => Some(Error {
                code: "LOCALITY_NOT_FOUND",
                status_code: http::StatusCode::NOT_FOUND,
                backtrace: None,
                message: self.to_string(),
            }),
        }
    }
}
