//! Session-related handlers and representations.

use axum::{Extension, Json};
use common::DateTime;
use secrecy::SecretBox;
use serde::{Deserialize, Serialize};
use service::command::{self, Command as _};

use crate::{AsError, Error, Service};

use super::{parse, user::User};

/// Request body of the `POST /api/login` handler.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email of the [`User`] to log in as.
    pub email: String,

    /// Password of the [`User`] to log in as.
    pub password: String,
}

/// Response body of the `POST /api/login` handler.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Issued bearer token.
    pub token: String,

    /// [`User`] the token was issued for.
    pub user: User,

    /// [`DateTime`] when the token expires.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub expires_at: DateTime,
}

/// Handles the `POST /api/login` request.
pub async fn login(
    Extension(service): Extension<Service>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Error> {
    let LoginRequest { email, password } = req;

    service
        .execute(command::CreateUserSession {
            email: parse(&email)?,
            password: SecretBox::new(Box::new(parse(&password)?)),
        })
        .await
        .map(|out| {
            Json(LoginResponse {
                token: out.token.to_string(),
                user: out.user.into(),
                expires_at: out.expires_at.coerce(),
            })
        })
        .map_err(AsError::into_error)
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::UserInactive(_) | Self::WrongCredentials => Some(Error {
                code: "WRONG_CREDENTIALS",
                status_code: http::StatusCode::UNAUTHORIZED,
                backtrace: None,
                message: "Wrong `User` credentials".to_owned(),
            }),
        }
    }
}
