//! [`Payment`]-related handlers and representations.
//!
//! [`Payment`]: domain::Payment

use axum::{extract::Path, Json};
use common::{Date, DateTime, Sum};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, invoice, payment},
    query,
    Query as _,
};

use crate::{AsError, Context, Error};

use super::{invoice::Invoice, parse, NotFoundError};

/// Representation of a [`domain::Payment`].
#[derive(Debug, Serialize)]
pub struct Payment {
    /// ID of the [`domain::Payment`].
    pub id: payment::Id,

    /// ID of the [`domain::Invoice`] the payment covers.
    pub invoice_id: invoice::Id,

    /// [`Date`] the [`domain::Payment`] was made on.
    pub paid_on: Date,

    /// Paid [`Sum`].
    pub amount: Sum,

    /// Method the [`domain::Payment`] was made with.
    pub method: payment::Method,

    /// External reference of the [`domain::Payment`].
    pub reference: Option<String>,

    /// [`DateTime`] when the [`domain::Payment`] was registered.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,
}

impl From<domain::Payment> for Payment {
    fn from(payment: domain::Payment) -> Self {
        Self {
            id: payment.id,
            invoice_id: payment.invoice_id,
            paid_on: payment.paid_on.coerce(),
            amount: payment.amount,
            method: payment.method,
            reference: payment.reference.map(|r| r.to_string()),
            created_at: payment.created_at.coerce(),
        }
    }
}

/// Request body of the `POST /api/payments` handler.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// ID of the [`domain::Invoice`] the payment covers.
    pub invoice_id: invoice::Id,

    /// [`Date`] the payment was made on.
    pub paid_on: payment::PaymentDate,

    /// Paid [`Sum`].
    pub amount: Sum,

    /// Method the payment was made with.
    pub method: payment::Method,

    /// External reference of the payment.
    pub reference: Option<String>,
}

/// Response body of the `POST /api/payments` handler.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Registered [`Payment`].
    pub payment: Payment,

    /// [`Invoice`] re-settled after the registration.
    pub invoice: Invoice,
}

/// Handles the `POST /api/payments` request.
pub async fn register(
    ctx: Context,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, Error> {
    let RegisterRequest {
        invoice_id,
        paid_on,
        amount,
        method,
        reference,
    } = req;

    ctx.service()
        .execute(command::RegisterPayment {
            invoice_id,
            paid_on,
            amount,
            method,
            reference: reference.as_deref().map(parse).transpose()?,
        })
        .await
        .map(|out| {
            Json(RegisterResponse {
                payment: out.payment.into(),
                invoice: out.invoice.into(),
            })
        })
        .map_err(AsError::into_error)
}

/// Handles the `GET /api/payments/by-invoice/:id` request.
pub async fn by_invoice(
    ctx: Context,
    Path(id): Path<invoice::Id>,
) -> Result<Json<Vec<Payment>>, Error> {
    ctx.service()
        .execute(query::payment::ByInvoice::by(id))
        .await
        .map(|payments| Json(payments.into_iter().map(Into::into).collect()))
        .map_err(AsError::into_error)
}

impl AsError for command::register_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvoiceNotExists(_) => Some(NotFoundError::Invoice.into()),
            Self::InvoiceNotPayable { .. } | Self::ZeroAmount => Some(Error {
                code: "PAYMENT_REJECTED",
                status_code: http::StatusCode::BAD_REQUEST,
                backtrace: None,
                message: self.to_string(),
            }),
        }
    }
}
