//! [`Command`] for updating an [`Invoice`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime, Sum,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::invoice::{Description, Kind, Number, Series};
use crate::{
    domain::{invoice, Invoice},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an [`Invoice`].
///
/// Fields left as [`None`] are untouched. Changing `base` or `tax`
/// recomputes the total and re-settles the outstanding amount from the
/// registered payments. Voided [`Invoice`]s reject any further updates.
#[derive(Clone, Debug)]
pub struct UpdateInvoice {
    /// ID of the [`Invoice`] to update.
    pub invoice_id: invoice::Id,

    /// New fiscal [`Kind`], if supplied.
    pub kind: Option<invoice::Kind>,

    /// New [`Series`], if supplied.
    pub series: Option<invoice::Series>,

    /// New [`Number`], if supplied.
    pub number: Option<invoice::Number>,

    /// New issue date, if supplied.
    pub issued_on: Option<invoice::IssueDate>,

    /// New due date, if supplied.
    pub due_on: Option<invoice::DueDate>,

    /// New base [`Sum`], if supplied.
    pub base: Option<Sum>,

    /// New tax [`Sum`], if supplied.
    pub tax: Option<Sum>,

    /// New [`Description`], if supplied.
    pub description: Option<invoice::Description>,

    /// Indicator whether the [`Invoice`] should be voided.
    pub void: bool,
}

impl<Db> Command<UpdateInvoice> for Service<Db>
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
        > + Database<Update<Invoice>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Invoice;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateInvoice,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateInvoice {
            invoice_id,
            kind,
            series,
            number,
            issued_on,
            due_on,
            base,
            tax,
            description,
            void,
        } = cmd;

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
        if invoice.payment_status == invoice::PaymentStatus::Voided {
            return Err(tracerr::new!(E::InvoiceVoided(invoice_id)));
        }

        if let Some(kind) = kind {
            invoice.kind = kind;
        }
        if let Some(series) = series {
            invoice.series = series;
        }
        if let Some(number) = number {
            invoice.number = number;
        }
        if let Some(issued_on) = issued_on {
            invoice.issued_on = issued_on;
        }
        if let Some(due_on) = due_on {
            invoice.due_on = due_on;
        }
        if let Some(base) = base {
            invoice.base = base;
        }
        if let Some(tax) = tax {
            invoice.tax = tax;
        }
        if let Some(description) = description {
            invoice.description = Some(description);
        }

        if void {
            invoice.recompute_total();
            invoice.void();
        } else {
            invoice.recompute_total();
            let paid_total = tx
                .execute(Select(By::<Sum, _>::new(invoice_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            invoice.settle(paid_total);
        }
        invoice.modified_at = DateTime::now().coerce();

        tx.execute(Update(invoice.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(invoice)
    }
}

/// Error of [`UpdateInvoice`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Invoice`] with the provided ID does not exist.
    #[display("`Invoice(id: {_0})` does not exist")]
    InvoiceNotExists(#[error(not(source))] invoice::Id),

    /// [`Invoice`] is voided and rejects updates.
    #[display("`Invoice(id: {_0})` is voided")]
    InvoiceVoided(#[error(not(source))] invoice::Id),
}
