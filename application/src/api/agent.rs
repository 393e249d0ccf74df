//! [`Agent`]-related handlers and representations.
//!
//! [`Agent`]: domain::Agent

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

/// Representation of a [`domain::Agent`].
#[derive(Debug, Serialize)]
pub struct Agent {
    /// ID of the [`domain::Agent`].
    pub id: domain::agent::Id,

    /// ID of the [`domain::User`] backing the [`domain::Agent`].
    pub user_id: domain::user::Id,

    /// Kind of the identity document.
    pub document_kind: domain::person::DocumentKind,

    /// Number of the identity document.
    pub document_number: String,

    /// Phone of the [`domain::Agent`].
    pub phone: Option<String>,

    /// Birth [`Date`] of the [`domain::Agent`].
    pub born_on: Option<Date>,

    /// Realtor licence of the [`domain::Agent`].
    pub licence: Option<String>,

    /// Indicator whether the [`domain::Agent`] is active.
    pub is_active: bool,

    /// ID of the [`domain::Agent`]'s address.
    pub address_id: Option<domain::address::Id>,

    /// [`DateTime`] when the [`domain::Agent`] was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,

    /// [`DateTime`] when the [`domain::Agent`] was last modified.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub modified_at: DateTime,
}

impl From<domain::Agent> for Agent {
    fn from(agent: domain::Agent) -> Self {
        Self {
            id: agent.id,
            user_id: agent.user_id,
            document_kind: agent.document_kind,
            document_number: agent.document_number.to_string(),
            phone: agent.phone.map(|p| p.to_string()),
            born_on: agent.born_on.map(|d| d.coerce()),
            licence: agent.licence.map(|l| l.to_string()),
            is_active: agent.is_active,
            address_id: agent.address_id,
            created_at: agent.created_at.coerce(),
            modified_at: agent.modified_at.coerce(),
        }
    }
}

/// Request body of the `POST /api/agents` handler.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// ID of the [`domain::User`] backing the new [`Agent`].
    pub user_id: domain::user::Id,

    /// Kind of the identity document.
    pub document_kind: domain::person::DocumentKind,

    /// Number of the identity document.
    pub document_number: String,

    /// Phone of the new [`Agent`].
    pub phone: Option<String>,

    /// Birth [`Date`] of the new [`Agent`].
    pub born_on: Option<domain::agent::BirthDate>,

    /// Realtor licence of the new [`Agent`].
    pub licence: Option<String>,

    /// ID of the new [`Agent`]'s address.
    pub address_id: Option<domain::address::Id>,
}

/// Handles the `POST /api/agents` request.
pub async fn create(
    ctx: Context,
    Json(req): Json<CreateRequest>,
) -> Result<Json<Agent>, Error> {
    let CreateRequest {
        user_id,
        document_kind,
        document_number,
        phone,
        born_on,
        licence,
        address_id,
    } = req;

    ctx.service()
        .execute(command::CreateAgent {
            user_id,
            document_kind,
            document_number: parse(&document_number)?,
            phone: phone.as_deref().map(parse).transpose()?,
            born_on,
            licence: licence.as_deref().map(parse).transpose()?,
            address_id,
        })
        .await
        .map(|agent| Json(agent.into()))
        .map_err(AsError::into_error)
}

/// Handles the `GET /api/agents/:id` request.
pub async fn by_id(
    ctx: Context,
    Path(id): Path<domain::agent::Id>,
) -> Result<Json<Agent>, Error> {
    ctx.service()
        .execute(query::agent::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .map(|agent| Json(agent.into()))
        .ok_or_else(|| NotFoundError::Agent.into())
}

/// Handles the `GET /api/agents` request.
pub async fn list(
    ctx: Context,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Agent>>, Error> {
    ctx.service()
        .execute(query::agent::List::by(page.arguments()?))
        .await
        .map(|agents| Json(agents.into_iter().map(Into::into).collect()))
        .map_err(AsError::into_error)
}

/// Request body of the `PUT /api/agents/:id` handler.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// New phone, if supplied.
    pub phone: Option<String>,

    /// New birth [`Date`], if supplied.
    pub born_on: Option<domain::agent::BirthDate>,

    /// New realtor licence, if supplied.
    pub licence: Option<String>,

    /// New activity indicator, if supplied.
    pub is_active: Option<bool>,

    /// New address ID, if supplied.
    pub address_id: Option<domain::address::Id>,
}

/// Handles the `PUT /api/agents/:id` request.
pub async fn update(
    ctx: Context,
    Path(id): Path<domain::agent::Id>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<Agent>, Error> {
    let UpdateRequest {
        phone,
        born_on,
        licence,
        is_active,
        address_id,
    } = req;

    ctx.service()
        .execute(command::UpdateAgent {
            agent_id: id,
            phone: phone.as_deref().map(parse).transpose()?,
            born_on,
            licence: licence.as_deref().map(parse).transpose()?,
            is_active,
            address_id,
        })
        .await
        .map(|agent| Json(agent.into()))
        .map_err(AsError::into_error)
}

impl AsError for command::create_agent::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::AddressNotExists(_) => Some(NotFoundError::Address.into()),
            Self::UserNotExists(_) => Some(NotFoundError::User.into()),
            Self::UserOccupied(_) => Some(Error {
                code: "USER_OCCUPIED",
                status_code: http::StatusCode::BAD_REQUEST,
                backtrace: None,
                message: self.to_string(),
            }),
        }
    }
}

impl AsError for command::update_agent::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::AddressNotExists(_) => Some(NotFoundError::Address.into()),
            Self::AgentNotExists(_) => Some(NotFoundError::Agent.into()),
        }
    }
}
