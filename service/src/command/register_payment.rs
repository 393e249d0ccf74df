//! [`Command`] for registering a [`Payment`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted, Update},
    DateTime, Sum,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::payment::{Method, Reference};
use crate::{
    domain::{invoice, payment, Invoice, Payment},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for registering a [`Payment`] against an [`Invoice`].
///
/// The [`Invoice`] row is locked for the whole settlement, so its
/// outstanding amount is always recomputed from the complete set of its
/// [`Payment`]s.
#[derive(Clone, Debug)]
pub struct RegisterPayment {
    /// ID of the [`Invoice`] the [`Payment`] covers.
    pub invoice_id: invoice::Id,

    /// Date the [`Payment`] was made.
    pub paid_on: payment::PaymentDate,

    /// Paid [`Sum`].
    pub amount: Sum,

    /// [`Method`] the [`Payment`] was made with.
    pub method: payment::Method,

    /// External [`Reference`] of the [`Payment`].
    pub reference: Option<payment::Reference>,
}

/// Output of [`RegisterPayment`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Registered [`Payment`].
    pub payment: Payment,

    /// [`Invoice`] re-settled after the registration.
    pub invoice: Invoice,
}

impl<Db> Command<RegisterPayment> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Option<Invoice>, invoice::Id>>,
            Ok = Option<Invoice>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Sum, invoice::Id>>,
            Ok = Sum,
            Err = Traced<database::Error>,
        > + Database<Insert<Payment>, Err = Traced<database::Error>>
        + Database<Update<Invoice>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RegisterPayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RegisterPayment {
            invoice_id,
            paid_on,
            amount,
            method,
            reference,
        } = cmd;

        if amount == Sum::ZERO {
            return Err(tracerr::new!(E::ZeroAmount));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent settlements upon the same `Invoice`.
        let mut invoice = tx
            .execute(Lock(By::<Option<Invoice>, _>::new(invoice_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::InvoiceNotExists(invoice_id))
            .map_err(tracerr::wrap!())?;
        if !invoice.accepts_payments() {
            return Err(tracerr::new!(E::InvoiceNotPayable {
                id: invoice_id,
                status: invoice.payment_status,
            }));
        }

        let payment = Payment {
            id: payment::Id::new(),
            invoice_id,
            paid_on,
            amount,
            method,
            reference,
            created_at: DateTime::now().coerce(),
        };
        tx.execute(Insert(payment.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let paid_total = tx
            .execute(Select(By::<Sum, _>::new(invoice_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        invoice.settle(paid_total);
        invoice.modified_at = DateTime::now().coerce();
        tx.execute(Update(invoice.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(Output { payment, invoice })
    }
}

/// Error of [`RegisterPayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Invoice`] with the provided ID does not exist.
    #[display("`Invoice(id: {_0})` does not exist")]
    InvoiceNotExists(#[error(not(source))] invoice::Id),

    /// [`Invoice`] does not accept further [`Payment`]s.
    #[display("`Invoice(id: {id})` is {status} and accepts no payments")]
    #[from(ignore)]
    InvoiceNotPayable {
        /// ID of the [`Invoice`].
        id: invoice::Id,

        /// Current [`invoice::PaymentStatus`].
        status: invoice::PaymentStatus,
    },

    /// [`Payment`] of a zero [`Sum`] makes no sense.
    #[display("`Payment` amount cannot be zero")]
    ZeroAmount,
}
