//! REST API definitions.

pub mod address;
pub mod agent;
pub mod client;
pub mod contract;
pub mod geo;
pub mod image;
pub mod invoice;
pub mod payment;
pub mod property;
pub mod session;
pub mod user;

use std::{fmt, str::FromStr};

use axum::{
    routing::{get, post},
    Router,
};
use common::pagination;
use serde::Deserialize;

use crate::{define_error, Error};

/// Assembles the [`Router`] of the whole API.
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/api/login", post(session::login))
        .route("/api/users", post(user::create).get(user::list))
        .route("/api/users/me", get(user::me))
        .route("/api/users/:id", get(user::by_id).put(user::update))
        .route("/api/clients", post(client::create).get(client::list))
        .route("/api/clients/:id", get(client::by_id).put(client::update))
        .route("/api/agents", post(agent::create).get(agent::list))
        .route("/api/agents/:id", get(agent::by_id).put(agent::update))
        .route("/api/addresses", post(address::create))
        .route("/api/addresses/:id", get(address::by_id))
        .route("/api/geo/countries", get(geo::countries))
        .route("/api/geo/countries/:id/provinces", get(geo::provinces))
        .route("/api/geo/provinces/:id/localities", get(geo::localities))
        .route("/api/properties", post(property::create).get(property::list))
        .route(
            "/api/properties/:id",
            get(property::by_id).put(property::update),
        )
        .route("/api/properties/:id/cover", post(property::set_cover))
        .route("/api/images", post(image::upload).get(image::by_owner))
        .route("/api/images/:id", get(image::by_id).delete(image::delete))
        .route("/api/contracts", post(contract::create).get(contract::list))
        .route(
            "/api/contracts/:id",
            get(contract::by_id).put(contract::update),
        )
        .route(
            "/api/contracts/by-property/:id",
            get(contract::by_property),
        )
        .route("/api/contracts/by-tenant/:id", get(contract::by_tenant))
        .route(
            "/api/contracts/pending-notification",
            get(contract::pending_notification),
        )
        .route("/api/invoices", post(invoice::create).get(invoice::list))
        .route(
            "/api/invoices/:id",
            get(invoice::by_id).put(invoice::update),
        )
        .route("/api/invoices/by-client/:id", get(invoice::by_client))
        .route("/api/payments", post(payment::register))
        .route("/api/payments/by-invoice/:id", get(payment::by_invoice))
}

/// Parses the provided request value into a `T`, rendering the failure as an
/// `INVALID_INPUT` [`Error`].
fn parse<T>(value: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse().map_err(|e| Error::invalid_input(&e))
}

/// Pagination query parameters of a list request.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PageQuery {
    /// Number of leading items to skip.
    pub skip: Option<u64>,

    /// Maximum number of items to return.
    pub limit: Option<u64>,
}

impl PageQuery {
    /// Converts this [`PageQuery`] into pagination [`Arguments`].
    ///
    /// [`Arguments`]: pagination::Arguments
    fn arguments(self) -> Result<pagination::Arguments, Error> {
        pagination::Arguments::new(self.skip, self.limit)
            .ok_or_else(|| PaginationError::Limit.into())
    }
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "Pagination `limit` must be within 1-200"]
        Limit,
    }
}

define_error! {
    enum NotFoundError {
        #[code = "USER_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`User` not found"]
        User,

        #[code = "CLIENT_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Client` not found"]
        Client,

        #[code = "AGENT_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Agent` not found"]
        Agent,

        #[code = "ADDRESS_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Address` not found"]
        Address,

        #[code = "PROPERTY_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Property` not found"]
        Property,

        #[code = "IMAGE_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Image` not found"]
        Image,

        #[code = "CONTRACT_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Contract` not found"]
        Contract,

        #[code = "INVOICE_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Invoice` not found"]
        Invoice,
    }
}
