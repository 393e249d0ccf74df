//! [`Command`] for creating a new [`Contract`].

use common::{
    datetime::MonthAddError,
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    Amount, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::contract::{IncreaseInterval, PaymentDay};
use crate::{
    domain::{client, contract, property, Client, Contract, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Contract`].
#[derive(Clone, Debug)]
pub struct CreateRentContract {
    /// ID of the rented [`Property`].
    pub property_id: property::Id,

    /// ID of the tenant [`Client`].
    pub tenant_id: client::Id,

    /// Commencement date of a new [`Contract`].
    pub started_on: contract::CommencementDate,

    /// Expiration date of a new [`Contract`].
    pub ends_on: contract::ExpirationDate,

    /// [`PaymentDay`] of a new [`Contract`].
    pub payment_day: contract::PaymentDay,

    /// Initial monthly rent [`Amount`] of a new [`Contract`].
    pub initial_rent: Amount,

    /// [`IncreaseInterval`] of a new [`Contract`].
    pub increase_interval: contract::IncreaseInterval,

    /// Date of the first rent increase.
    ///
    /// When omitted, it is derived as the commencement date advanced by one
    /// [`IncreaseInterval`] (or the commencement date itself if the interval
    /// is zero).
    pub next_increase_on: Option<contract::IncreaseDate>,
}

impl<Db> Command<CreateRentContract> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Client>, client::Id>>,
            Ok = Option<Client>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Contract>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Contract;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateRentContract,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateRentContract {
            property_id,
            tenant_id,
            started_on,
            ends_on,
            payment_day,
            initial_rent,
            increase_interval,
            next_increase_on,
        } = cmd;

        if ends_on.coerce::<()>() <= started_on.coerce::<()>() {
            return Err(tracerr::new!(E::EndsBeforeStart));
        }

        self.database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.database()
            .execute(Select(By::<Option<Client>, _>::new(tenant_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TenantNotExists(tenant_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let next_increase_on = match next_increase_on {
            Some(date) => date,
            None => {
                contract::derive_next_increase_on(started_on, increase_interval)
                    .map_err(tracerr::from_and_wrap!(=> E))?
            }
        };

        let now = DateTime::now();
        let contract = Contract {
            id: contract::Id::new(),
            property_id,
            tenant_id,
            started_on,
            ends_on,
            payment_day,
            initial_rent,
            current_rent: initial_rent,
            increase_interval,
            next_increase_on,
            last_notified_at: None,
            status: contract::Status::Active,
            created_at: now.coerce(),
            modified_at: now.coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(contract.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(contract)
    }
}

/// Error of [`CreateRentContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Expiration date is not after the commencement date.
    #[display("`Contract` must end after it starts")]
    EndsBeforeStart,

    /// Deriving the first increase date failed.
    #[display("Failed to derive the first increase date: {_0}")]
    MonthAdd(MonthAddError),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// Tenant [`Client`] with the provided ID does not exist.
    #[display("`Client(id: {_0})` does not exist")]
    #[from(ignore)]
    TenantNotExists(#[error(not(source))] client::Id),
}
