//! [`Invoice`]-related handlers and representations.
//!
//! [`Invoice`]: domain::Invoice

use axum::{
    extract::{Path, Query},
    Json,
};
use common::{Date, DateTime, Sum};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, invoice},
    query, read,
    Query as _,
};

use crate::{AsError, Context, Error};

use super::{parse, NotFoundError, PageQuery};

/// Representation of a [`domain::Invoice`].
#[derive(Debug, Serialize)]
pub struct Invoice {
    /// ID of the [`domain::Invoice`].
    pub id: invoice::Id,

    /// ID of the billed [`domain::Client`].
    pub client_id: domain::client::Id,

    /// ID of the [`domain::Contract`] the invoice bills.
    pub contract_id: Option<domain::contract::Id>,

    /// ID of the [`domain::Property`] the invoice relates to.
    pub property_id: Option<domain::property::Id>,

    /// Fiscal kind of the [`domain::Invoice`].
    pub kind: invoice::Kind,

    /// Series of the [`domain::Invoice`].
    pub series: String,

    /// Sequential number within the series.
    pub number: invoice::Number,

    /// [`Date`] the [`domain::Invoice`] was issued on.
    pub issued_on: Date,

    /// [`Date`] the [`domain::Invoice`] is due on.
    pub due_on: Date,

    /// Taxable base [`Sum`].
    pub base: Sum,

    /// Tax [`Sum`].
    pub tax: Sum,

    /// Total [`Sum`].
    pub total: Sum,

    /// Outstanding [`Sum`].
    pub amount_due: Sum,

    /// Payment status of the [`domain::Invoice`].
    pub payment_status: invoice::PaymentStatus,

    /// Description of the billed item.
    pub description: Option<String>,

    /// [`DateTime`] when the [`domain::Invoice`] was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,

    /// [`DateTime`] when the [`domain::Invoice`] was last modified.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub modified_at: DateTime,
}

impl From<domain::Invoice> for Invoice {
    fn from(invoice: domain::Invoice) -> Self {
        Self {
            id: invoice.id,
            client_id: invoice.client_id,
            contract_id: invoice.contract_id,
            property_id: invoice.property_id,
            kind: invoice.kind,
            series: invoice.series.to_string(),
            number: invoice.number,
            issued_on: invoice.issued_on.coerce(),
            due_on: invoice.due_on.coerce(),
            base: invoice.base,
            tax: invoice.tax,
            total: invoice.total,
            amount_due: invoice.amount_due,
            payment_status: invoice.payment_status,
            description: invoice.description.map(|d| d.to_string()),
            created_at: invoice.created_at.coerce(),
            modified_at: invoice.modified_at.coerce(),
        }
    }
}

/// Request body of the `POST /api/invoices` handler.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// ID of the billed [`domain::Client`].
    pub client_id: domain::client::Id,

    /// ID of the [`domain::Contract`] the invoice bills.
    pub contract_id: Option<domain::contract::Id>,

    /// ID of the [`domain::Property`] the invoice relates to.
    pub property_id: Option<domain::property::Id>,

    /// Fiscal kind of the new [`Invoice`].
    pub kind: invoice::Kind,

    /// Series of the new [`Invoice`].
    pub series: String,

    /// Sequential number within the series.
    pub number: invoice::Number,

    /// [`Date`] the new [`Invoice`] is issued on.
    pub issued_on: invoice::IssueDate,

    /// [`Date`] the new [`Invoice`] is due on.
    pub due_on: invoice::DueDate,

    /// Taxable base [`Sum`].
    pub base: Sum,

    /// Tax [`Sum`].
    pub tax: Sum,

    /// Description of the billed item.
    pub description: Option<String>,
}

/// Handles the `POST /api/invoices` request.
pub async fn create(
    ctx: Context,
    Json(req): Json<CreateRequest>,
) -> Result<Json<Invoice>, Error> {
    let CreateRequest {
        client_id,
        contract_id,
        property_id,
        kind,
        series,
        number,
        issued_on,
        due_on,
        base,
        tax,
        description,
    } = req;

    ctx.service()
        .execute(command::CreateInvoice {
            client_id,
            contract_id,
            property_id,
            kind,
            series: parse(&series)?,
            number,
            issued_on,
            due_on,
            base,
            tax,
            description: description.as_deref().map(parse).transpose()?,
        })
        .await
        .map(|invoice| Json(invoice.into()))
        .map_err(AsError::into_error)
}

/// Handles the `GET /api/invoices/:id` request.
pub async fn by_id(
    ctx: Context,
    Path(id): Path<invoice::Id>,
) -> Result<Json<Invoice>, Error> {
    ctx.service()
        .execute(query::invoice::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .map(|invoice| Json(invoice.into()))
        .ok_or_else(|| NotFoundError::Invoice.into())
}

/// Query parameters of the `GET /api/invoices` handler.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ListQuery {
    /// ID of the billed [`domain::Client`] to filter by.
    pub client_id: Option<domain::client::Id>,

    /// Number of leading items to skip.
    pub skip: Option<u64>,

    /// Maximum number of items to return.
    pub limit: Option<u64>,
}

/// Handles the `GET /api/invoices` request.
pub async fn list(
    ctx: Context,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Invoice>>, Error> {
    let ListQuery {
        client_id,
        skip,
        limit,
    } = q;

    let selector = read::invoice::list::Selector {
        arguments: PageQuery { skip, limit }.arguments()?,
        filter: read::invoice::list::Filter { client_id },
    };

    execute_list(&ctx, selector).await
}

/// Handles the `GET /api/invoices/by-client/:id` request.
pub async fn by_client(
    ctx: Context,
    Path(id): Path<domain::client::Id>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Invoice>>, Error> {
    let selector = read::invoice::list::Selector {
        arguments: page.arguments()?,
        filter: read::invoice::list::Filter {
            client_id: Some(id),
        },
    };

    execute_list(&ctx, selector).await
}

/// Executes the provided [`Invoice`]s list `selector`.
async fn execute_list(
    ctx: &Context,
    selector: read::invoice::list::Selector,
) -> Result<Json<Vec<Invoice>>, Error> {
    ctx.service()
        .execute(query::invoice::List::by(selector))
        .await
        .map(|invoices| Json(invoices.into_iter().map(Into::into).collect()))
        .map_err(AsError::into_error)
}

/// Request body of the `PUT /api/invoices/:id` handler.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// New fiscal kind, if supplied.
    pub kind: Option<invoice::Kind>,

    /// New series, if supplied.
    pub series: Option<String>,

    /// New sequential number, if supplied.
    pub number: Option<invoice::Number>,

    /// New issue [`Date`], if supplied.
    pub issued_on: Option<invoice::IssueDate>,

    /// New due [`Date`], if supplied.
    pub due_on: Option<invoice::DueDate>,

    /// New taxable base [`Sum`], if supplied.
    pub base: Option<Sum>,

    /// New tax [`Sum`], if supplied.
    pub tax: Option<Sum>,

    /// New description, if supplied.
    pub description: Option<String>,

    /// Indicator whether the [`Invoice`] should be voided.
    #[serde(default)]
    pub void: bool,
}

/// Handles the `PUT /api/invoices/:id` request.
pub async fn update(
    ctx: Context,
    Path(id): Path<invoice::Id>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<Invoice>, Error> {
    let UpdateRequest {
        kind,
        series,
        number,
        issued_on,
        due_on,
        base,
        tax,
        description,
        void,
    } = req;

    ctx.service()
        .execute(command::UpdateInvoice {
            invoice_id: id,
            kind,
            series: series.as_deref().map(parse).transpose()?,
            number,
            issued_on,
            due_on,
            base,
            tax,
            description: description.as_deref().map(parse).transpose()?,
            void,
        })
        .await
        .map(|invoice| Json(invoice.into()))
        .map_err(AsError::into_error)
}

impl AsError for command::create_invoice::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ClientNotExists(_) => Some(NotFoundError::Client.into()),
            Self::ContractNotExists(_) => Some(NotFoundError::Contract.into()),
            Self::PropertyNotExists(_) => Some(NotFoundError::Property.into()),
        }
    }
}

impl AsError for command::update_invoice::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvoiceNotExists(_) => Some(NotFoundError::Invoice.into()),
            Self::InvoiceVoided(_) => Some(Error {
                code: "INVOICE_VOIDED",
                status_code: http::StatusCode::BAD_REQUEST,
                backtrace: None,
                message: self.to_string(),
            }),
        }
    }
}
