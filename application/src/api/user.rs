//! [`User`]-related handlers and representations.
//!
//! [`User`]: domain::User

use axum::{
    extract::{Path, Query},
    Json,
};
use common::DateTime;
use secrecy::SecretBox;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain, query,
    Query as _,
};

use crate::{AsError, Context, Error};

use super::{parse, NotFoundError, PageQuery};

/// Representation of a [`domain::User`].
#[derive(Debug, Serialize)]
pub struct User {
    /// ID of the [`domain::User`].
    pub id: domain::user::Id,

    /// First name of the [`domain::User`].
    pub first_name: String,

    /// Last name of the [`domain::User`].
    pub last_name: String,

    /// Email of the [`domain::User`].
    pub email: String,

    /// Indicator whether the [`domain::User`] may log in.
    pub is_active: bool,

    /// Indicator whether the [`domain::User`] is a superuser.
    pub is_superuser: bool,

    /// [`DateTime`] when the [`domain::User`] was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.to_string(),
            last_name: user.last_name.to_string(),
            email: user.email.to_string(),
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            created_at: user.created_at.coerce(),
        }
    }
}

/// Request body of the `POST /api/users` handler.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// First name of the new [`User`].
    pub first_name: String,

    /// Last name of the new [`User`].
    pub last_name: String,

    /// Email of the new [`User`].
    pub email: String,

    /// Password of the new [`User`].
    pub password: String,

    /// Indicator whether the new [`User`] is a superuser.
    #[serde(default)]
    pub is_superuser: bool,
}

/// Handles the `POST /api/users` request.
pub async fn create(
    ctx: Context,
    Json(req): Json<CreateRequest>,
) -> Result<Json<User>, Error> {
    let CreateRequest {
        first_name,
        last_name,
        email,
        password,
        is_superuser,
    } = req;

    ctx.service()
        .execute(command::CreateUser {
            first_name: parse(&first_name)?,
            last_name: parse(&last_name)?,
            email: parse(&email)?,
            password: SecretBox::new(Box::new(parse(&password)?)),
            is_superuser,
        })
        .await
        .map(|user| Json(user.into()))
        .map_err(AsError::into_error)
}

/// Handles the `GET /api/users/me` request.
pub async fn me(ctx: Context) -> Json<User> {
    Json(ctx.user().clone().into())
}

/// Handles the `GET /api/users/:id` request.
pub async fn by_id(
    ctx: Context,
    Path(id): Path<domain::user::Id>,
) -> Result<Json<User>, Error> {
    ctx.service()
        .execute(query::user::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .map(|user| Json(user.into()))
        .ok_or_else(|| NotFoundError::User.into())
}

/// Handles the `GET /api/users` request.
pub async fn list(
    ctx: Context,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<User>>, Error> {
    ctx.service()
        .execute(query::user::List::by(page.arguments()?))
        .await
        .map(|users| Json(users.into_iter().map(Into::into).collect()))
        .map_err(AsError::into_error)
}

/// Request body of the `PUT /api/users/:id` handler.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// New first name, if supplied.
    pub first_name: Option<String>,

    /// New last name, if supplied.
    pub last_name: Option<String>,

    /// New email, if supplied.
    pub email: Option<String>,

    /// New password, if supplied.
    pub password: Option<String>,

    /// New activity indicator, if supplied.
    pub is_active: Option<bool>,

    /// New superuser indicator, if supplied.
    pub is_superuser: Option<bool>,
}

/// Handles the `PUT /api/users/:id` request.
pub async fn update(
    ctx: Context,
    Path(id): Path<domain::user::Id>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<User>, Error> {
    let UpdateRequest {
        first_name,
        last_name,
        email,
        password,
        is_active,
        is_superuser,
    } = req;

    ctx.service()
        .execute(command::UpdateUser {
            user_id: id,
            first_name: first_name.as_deref().map(parse).transpose()?,
            last_name: last_name.as_deref().map(parse).transpose()?,
            email: email.as_deref().map(parse).transpose()?,
            password: password
                .as_deref()
                .map(parse)
                .transpose()?
                .map(|p| SecretBox::new(Box::new(p))),
            is_active,
            is_superuser,
        })
        .await
        .map(|user| Json(user.into()))
        .map_err(AsError::into_error)
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(Error {
                code: "EMAIL_OCCUPIED",
                status_code: http::StatusCode::BAD_REQUEST,
                backtrace: None,
                message: self.to_string(),
            }),
        }
    }
}

impl AsError for command::update_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => Some(NotFoundError::User.into()),
            Self::EmailOccupied(_) => Some(Error {
                code: "EMAIL_OCCUPIED",
                status_code: http::StatusCode::BAD_REQUEST,
                backtrace: None,
                message: self.to_string(),
            }),
        }
    }
}
