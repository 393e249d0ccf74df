//! [`Command`] for creating a new [`Invoice`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime, Sum,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::invoice::{Description, Kind, Number, Series};
use crate::{
    domain::{
        client, contract, invoice, property, Client, Contract, Invoice,
        Property,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Invoice`].
#[derive(Clone, Debug)]
pub struct CreateInvoice {
    /// ID of the [`Client`] a new [`Invoice`] is issued to.
    pub client_id: client::Id,

    /// ID of the [`Contract`] a new [`Invoice`] bills.
    pub contract_id: Option<contract::Id>,

    /// ID of the [`Property`] a new [`Invoice`] relates to.
    pub property_id: Option<property::Id>,

    /// Fiscal [`Kind`] of a new [`Invoice`].
    pub kind: invoice::Kind,

    /// [`Series`] of a new [`Invoice`].
    pub series: invoice::Series,

    /// [`Number`] of a new [`Invoice`].
    pub number: invoice::Number,

    /// Issue date of a new [`Invoice`].
    pub issued_on: invoice::IssueDate,

    /// Due date of a new [`Invoice`].
    pub due_on: invoice::DueDate,

    /// Base [`Sum`] of a new [`Invoice`].
    pub base: Sum,

    /// Tax [`Sum`] of a new [`Invoice`].
    pub tax: Sum,

    /// [`Description`] of the billed item.
    pub description: Option<invoice::Description>,
}

impl<Db> Command<CreateInvoice> for Service<Db>
where
    Db: Database<
            Select<By<Option<Client>, client::Id>>,
            Ok = Option<Client>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Invoice>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Invoice;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateInvoice,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateInvoice {
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
        } = cmd;

        self.database()
            .execute(Select(By::<Option<Client>, _>::new(client_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ClientNotExists(client_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        if let Some(contract_id) = contract_id {
            self.database()
                .execute(Select(By::<Option<Contract>, _>::new(contract_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::ContractNotExists(contract_id))
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }

        if let Some(property_id) = property_id {
            self.database()
                .execute(Select(By::<Option<Property>, _>::new(property_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::PropertyNotExists(property_id))
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }

        let now = DateTime::now();
        let total = base + tax;
        let invoice = Invoice {
            id: invoice::Id::new(),
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
            total,
            amount_due: total,
            payment_status: invoice::PaymentStatus::Pending,
            description,
            created_at: now.coerce(),
            modified_at: now.coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(invoice.clone()))
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

/// Error of [`CreateInvoice`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Client`] with the provided ID does not exist.
    #[display("`Client(id: {_0})` does not exist")]
    ClientNotExists(#[error(not(source))] client::Id),

    /// [`Contract`] with the provided ID does not exist.
    #[display("`Contract(id: {_0})` does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),
}
