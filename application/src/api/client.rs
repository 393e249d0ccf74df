//! [`Client`]-related handlers and representations.
//!
//! [`Client`]: domain::Client

use axum::{
    extract::{Path, Query},
    Json,
};
use common::{Date, DateTime};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain, query,
    Query as _,
};

use crate::{AsError, Context, Error};

use super::{parse, NotFoundError, PageQuery};

/// Representation of a [`domain::Client`].
#[derive(Debug, Serialize)]
pub struct Client {
    /// ID of the [`domain::Client`].
    pub id: domain::client::Id,

    /// First name of the [`domain::Client`].
    pub first_name: String,

    /// Last name of the [`domain::Client`].
    pub last_name: String,

    /// Kind of the identity document.
    pub document_kind: domain::person::DocumentKind,

    /// Number of the identity document.
    pub document_number: String,

    /// Email of the [`domain::Client`].
    pub email: Option<String>,

    /// Landline phone of the [`domain::Client`].
    pub phone: Option<String>,

    /// Mobile phone of the [`domain::Client`].
    pub mobile: Option<String>,

    /// Birth [`Date`] of the [`domain::Client`].
    pub born_on: Option<Date>,

    /// Gender of the [`domain::Client`].
    pub gender: Option<domain::person::Gender>,

    /// Fiscal status of the [`domain::Client`].
    pub fiscal_status: Option<domain::person::FiscalStatus>,

    /// ID of the [`domain::Client`]'s address.
    pub address_id: Option<domain::address::Id>,

    /// [`DateTime`] when the [`domain::Client`] was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,
}

impl From<domain::Client> for Client {
    fn from(client: domain::Client) -> Self {
        Self {
            id: client.id,
            first_name: client.first_name.to_string(),
            last_name: client.last_name.to_string(),
            document_kind: client.document_kind,
            document_number: client.document_number.to_string(),
            email: client.email.map(|e| e.to_string()),
            phone: client.phone.map(|p| p.to_string()),
            mobile: client.mobile.map(|p| p.to_string()),
            born_on: client.born_on.map(|d| d.coerce()),
            gender: client.gender,
            fiscal_status: client.fiscal_status,
            address_id: client.address_id,
            created_at: client.created_at.coerce(),
        }
    }
}

/// Request body of the `POST /api/clients` handler.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// First name of the new [`Client`].
    pub first_name: String,

    /// Last name of the new [`Client`].
    pub last_name: String,

    /// Kind of the identity document.
    pub document_kind: domain::person::DocumentKind,

    /// Number of the identity document.
    pub document_number: String,

    /// Email of the new [`Client`].
    pub email: Option<String>,

    /// Landline phone of the new [`Client`].
    pub phone: Option<String>,

    /// Mobile phone of the new [`Client`].
    pub mobile: Option<String>,

    /// Birth [`Date`] of the new [`Client`].
    pub born_on: Option<domain::client::BirthDate>,

    /// Gender of the new [`Client`].
    pub gender: Option<domain::person::Gender>,

    /// Fiscal status of the new [`Client`].
    pub fiscal_status: Option<domain::person::FiscalStatus>,

    /// ID of the new [`Client`]'s address.
    pub address_id: Option<domain::address::Id>,
}

/// Handles the `POST /api/clients` request.
pub async fn create(
    ctx: Context,
    Json(req): Json<CreateRequest>,
) -> Result<Json<Client>, Error> {
    let CreateRequest {
        first_name,
        last_name,
        document_kind,
        document_number,
        email,
        phone,
        mobile,
        born_on,
        gender,
        fiscal_status,
        address_id,
    } = req;

    ctx.service()
        .execute(command::CreateClient {
            first_name: parse(&first_name)?,
            last_name: parse(&last_name)?,
            document_kind,
            document_number: parse(&document_number)?,
            email: email.as_deref().map(parse).transpose()?,
            phone: phone.as_deref().map(parse).transpose()?,
            mobile: mobile.as_deref().map(parse).transpose()?,
            born_on,
            gender,
            fiscal_status,
            address_id,
        })
        .await
        .map(|client| Json(client.into()))
        .map_err(AsError::into_error)
}

/// Handles the `GET /api/clients/:id` request.
pub async fn by_id(
    ctx: Context,
    Path(id): Path<domain::client::Id>,
) -> Result<Json<Client>, Error> {
    ctx.service()
        .execute(query::client::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .map(|client| Json(client.into()))
        .ok_or_else(|| NotFoundError::Client.into())
}

/// Handles the `GET /api/clients` request.
pub async fn list(
    ctx: Context,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Client>>, Error> {
    ctx.service()
        .execute(query::client::List::by(page.arguments()?))
        .await
        .map(|clients| Json(clients.into_iter().map(Into::into).collect()))
        .map_err(AsError::into_error)
}

/// Request body of the `PUT /api/clients/:id` handler.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// New first name, if supplied.
    pub first_name: Option<String>,

    /// New last name, if supplied.
    pub last_name: Option<String>,

    /// New email, if supplied.
    pub email: Option<String>,

    /// New landline phone, if supplied.
    pub phone: Option<String>,

    /// New mobile phone, if supplied.
    pub mobile: Option<String>,

    /// New birth [`Date`], if supplied.
    pub born_on: Option<domain::client::BirthDate>,

    /// New gender, if supplied.
    pub gender: Option<domain::person::Gender>,

    /// New fiscal status, if supplied.
    pub fiscal_status: Option<domain::person::FiscalStatus>,

    /// New address ID, if supplied.
    pub address_id: Option<domain::address::Id>,
}

/// Handles the `PUT /api/clients/:id` request.
pub async fn update(
    ctx: Context,
    Path(id): Path<domain::client::Id>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<Client>, Error> {
    let UpdateRequest {
        first_name,
        last_name,
        email,
        phone,
        mobile,
        born_on,
        gender,
        fiscal_status,
        address_id,
    } = req;

    ctx.service()
        .execute(command::UpdateClient {
            client_id: id,
            first_name: first_name.as_deref().map(parse).transpose()?,
            last_name: last_name.as_deref().map(parse).transpose()?,
            email: email.as_deref().map(parse).transpose()?,
            phone: phone.as_deref().map(parse).transpose()?,
            mobile: mobile.as_deref().map(parse).transpose()?,
            born_on,
            gender,
            fiscal_status,
            address_id,
        })
        .await
        .map(|client| Json(client.into()))
        .map_err(AsError::into_error)
}

impl AsError for command::create_client::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::AddressNotExists(_) => Some(NotFoundError::Address.into()),
            Self::DocumentOccupied(_) => Some(Error {
                code: "DOCUMENT_OCCUPIED",
                status_code: http::StatusCode::BAD_REQUEST,
                backtrace: None,
                message: self.to_string(),
            }),
        }
    }
}

impl AsError for command::update_client::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::AddressNotExists(_) => Some(NotFoundError::Address.into()),
            Self::ClientNotExists(_) => Some(NotFoundError::Client.into()),
        }
    }
}
