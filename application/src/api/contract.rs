//! [`Contract`]-related handlers and representations.
//!
//! [`Contract`]: domain::Contract

use axum::{
    extract::{Path, Query},
    Json,
};
use common::{Amount, Date, DateTime};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, contract},
    query, read,
    Query as _,
};

use crate::{define_error, AsError, Context, Error};

use super::{NotFoundError, PageQuery};

/// Representation of a [`domain::Contract`].
#[derive(Debug, Serialize)]
pub struct Contract {
    /// ID of the [`domain::Contract`].
    pub id: contract::Id,

    /// ID of the rented [`domain::Property`].
    pub property_id: domain::property::Id,

    /// ID of the tenant [`domain::Client`].
    pub tenant_id: domain::client::Id,

    /// [`Date`] the [`domain::Contract`] commences on.
    pub started_on: Date,

    /// [`Date`] the [`domain::Contract`] expires on.
    pub ends_on: Date,

    /// Day of month the rent is due on.
    pub payment_day: contract::PaymentDay,

    /// Monthly rent the [`domain::Contract`] commenced with.
    pub initial_rent: Amount,

    /// Current monthly rent.
    pub current_rent: Amount,

    /// Interval between rent renegotiations, in whole calendar months.
    pub increase_interval: contract::IncreaseInterval,

    /// [`Date`] the next rent increase is due on.
    pub next_increase_on: Date,

    /// [`DateTime`] the tenant was last notified of an upcoming increase.
    pub last_notified_at: Option<String>,

    /// Status of the [`domain::Contract`].
    pub status: contract::Status,

    /// [`DateTime`] when the [`domain::Contract`] was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,

    /// [`DateTime`] when the [`domain::Contract`] was last modified.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub modified_at: DateTime,
}

impl From<domain::Contract> for Contract {
    fn from(contract: domain::Contract) -> Self {
        Self {
            id: contract.id,
            property_id: contract.property_id,
            tenant_id: contract.tenant_id,
            started_on: contract.started_on.coerce(),
            ends_on: contract.ends_on.coerce(),
            payment_day: contract.payment_day,
            initial_rent: contract.initial_rent,
            current_rent: contract.current_rent,
            increase_interval: contract.increase_interval,
            next_increase_on: contract.next_increase_on.coerce(),
            last_notified_at: contract
                .last_notified_at
                .map(|t| t.to_rfc3339()),
            status: contract.status,
            created_at: contract.created_at.coerce(),
            modified_at: contract.modified_at.coerce(),
        }
    }
}

/// Request body of the `POST /api/contracts` handler.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// ID of the rented [`domain::Property`].
    pub property_id: domain::property::Id,

    /// ID of the tenant [`domain::Client`].
    pub tenant_id: domain::client::Id,

    /// [`Date`] the new [`Contract`] commences on.
    pub started_on: contract::CommencementDate,

    /// [`Date`] the new [`Contract`] expires on.
    pub ends_on: contract::ExpirationDate,

    /// Day of month the rent is due on.
    pub payment_day: contract::PaymentDay,

    /// Monthly rent the new [`Contract`] commences with.
    pub initial_rent: Amount,

    /// Interval between rent renegotiations, in whole calendar months.
    pub increase_interval: contract::IncreaseInterval,

    /// Explicit first increase [`Date`], derived from `started_on` and
    /// `increase_interval` when omitted.
    pub next_increase_on: Option<contract::IncreaseDate>,
}

/// Handles the `POST /api/contracts` request.
pub async fn create(
    ctx: Context,
    Json(req): Json<CreateRequest>,
) -> Result<Json<Contract>, Error> {
    let CreateRequest {
        property_id,
        tenant_id,
        started_on,
        ends_on,
        payment_day,
        initial_rent,
        increase_interval,
        next_increase_on,
    } = req;

    ctx.service()
        .execute(command::CreateRentContract {
            property_id,
            tenant_id,
            started_on,
            ends_on,
            payment_day,
            initial_rent,
            increase_interval,
            next_increase_on,
        })
        .await
        .map(|contract| Json(contract.into()))
        .map_err(AsError::into_error)
}

/// Handles the `GET /api/contracts/:id` request.
pub async fn by_id(
    ctx: Context,
    Path(id): Path<contract::Id>,
) -> Result<Json<Contract>, Error> {
    ctx.service()
        .execute(query::contract::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .map(|contract| Json(contract.into()))
        .ok_or_else(|| NotFoundError::Contract.into())
}

/// Query parameters of the `GET /api/contracts` handler.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ListQuery {
    /// ID of the rented [`domain::Property`] to filter by.
    pub property_id: Option<domain::property::Id>,

    /// ID of the tenant [`domain::Client`] to filter by.
    pub tenant_id: Option<domain::client::Id>,

    /// [`contract::Status`] to filter by.
    pub status: Option<contract::Status>,

    /// Number of leading items to skip.
    pub skip: Option<u64>,

    /// Maximum number of items to return.
    pub limit: Option<u64>,
}

/// Handles the `GET /api/contracts` request.
pub async fn list(
    ctx: Context,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Contract>>, Error> {
    let ListQuery {
        property_id,
        tenant_id,
        status,
        skip,
        limit,
    } = q;

    let selector = read::contract::list::Selector {
        arguments: PageQuery { skip, limit }.arguments()?,
        filter: read::contract::list::Filter {
            property_id,
            tenant_id,
            status,
        },
    };

    execute_list(&ctx, selector).await
}

/// Handles the `GET /api/contracts/by-property/:id` request.
pub async fn by_property(
    ctx: Context,
    Path(id): Path<domain::property::Id>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Contract>>, Error> {
    let selector = read::contract::list::Selector {
        arguments: page.arguments()?,
        filter: read::contract::list::Filter {
            property_id: Some(id),
            ..read::contract::list::Filter::default()
        },
    };

    execute_list(&ctx, selector).await
}

/// Handles the `GET /api/contracts/by-tenant/:id` request.
pub async fn by_tenant(
    ctx: Context,
    Path(id): Path<domain::client::Id>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Contract>>, Error> {
    let selector = read::contract::list::Selector {
        arguments: page.arguments()?,
        filter: read::contract::list::Filter {
            tenant_id: Some(id),
            ..read::contract::list::Filter::default()
        },
    };

    execute_list(&ctx, selector).await
}

/// Executes the provided [`Contract`]s list `selector`.
async fn execute_list(
    ctx: &Context,
    selector: read::contract::list::Selector,
) -> Result<Json<Vec<Contract>>, Error> {
    ctx.service()
        .execute(query::contract::List::by(selector))
        .await
        .map(|contracts| Json(contracts.into_iter().map(Into::into).collect()))
        .map_err(AsError::into_error)
}

/// Query parameters of the `GET /api/contracts/pending-notification` handler.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PendingQuery {
    /// Look-ahead window, in days.
    pub window_days: Option<u16>,
}

/// Handles the `GET /api/contracts/pending-notification` request.
pub async fn pending_notification(
    ctx: Context,
    Query(q): Query<PendingQuery>,
) -> Result<Json<Vec<Contract>>, Error> {
    let window = match q.window_days {
        Some(days) => {
            contract::WindowDays::new(days).ok_or(WindowError::Days)?
        }
        None => contract::WindowDays::default(),
    };

    ctx.service()
        .execute(query::contract::PendingIncreases::by(
            read::contract::PendingIncreases {
                today: Date::today(),
                window,
            },
        ))
        .await
        .map(|contracts| Json(contracts.into_iter().map(Into::into).collect()))
        .map_err(AsError::into_error)
}

/// Request body of the `PUT /api/contracts/:id` handler.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// New expiration [`Date`], if supplied.
    pub ends_on: Option<contract::ExpirationDate>,

    /// New rent payment day, if supplied.
    pub payment_day: Option<contract::PaymentDay>,

    /// New monthly rent, if supplied. Advances the next increase date by one
    /// interval.
    pub current_rent: Option<Amount>,

    /// New increase interval, if supplied.
    pub increase_interval: Option<contract::IncreaseInterval>,

    /// Explicit next increase [`Date`], if supplied.
    pub next_increase_on: Option<contract::IncreaseDate>,

    /// [`DateTime`] the tenant was notified at, if supplied (RFC 3339).
    pub last_notified_at: Option<String>,

    /// New status, if supplied.
    pub status: Option<contract::Status>,
}

/// Handles the `PUT /api/contracts/:id` request.
pub async fn update(
    ctx: Context,
    Path(id): Path<contract::Id>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<Contract>, Error> {
    let UpdateRequest {
        ends_on,
        payment_day,
        current_rent,
        increase_interval,
        next_increase_on,
        last_notified_at,
        status,
    } = req;

    let last_notified_at = last_notified_at
        .as_deref()
        .map(|s| {
            DateTime::from_rfc3339(s)
                .map(DateTime::coerce)
                .map_err(|e| Error::invalid_input(&e))
        })
        .transpose()?;

    ctx.service()
        .execute(command::UpdateRentContract {
            contract_id: id,
            patch: contract::Patch {
                ends_on,
                payment_day,
                current_rent,
                increase_interval,
                next_increase_on,
                last_notified_at,
                status,
            },
        })
        .await
        .map(|contract| Json(contract.into()))
        .map_err(AsError::into_error)
}

impl AsError for command::create_rent_contract::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EndsBeforeStart | Self::MonthAdd(_) => Some(Error {
                code: "INVALID_CONTRACT_DATES",
                status_code: http::StatusCode::BAD_REQUEST,
                backtrace: None,
                message: self.to_string(),
            }),
            Self::PropertyNotExists(_) => Some(NotFoundError::Property.into()),
            Self::TenantNotExists(_) => Some(NotFoundError::Client.into()),
        }
    }
}

impl AsError for command::update_rent_contract::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ContractNotExists(_) => Some(NotFoundError::Contract.into()),
            Self::Patch(_) => Some(Error {
                code: "INVALID_CONTRACT_PATCH",
                status_code: http::StatusCode::BAD_REQUEST,
                backtrace: None,
                message: self.to_string(),
            }),
        }
    }
}

define_error! {
    enum WindowError {
        #[code = "INVALID_WINDOW"]
        #[status = BAD_REQUEST]
        #[message = "`window_days` must be within 1-90"]
        Days,
    }
}
