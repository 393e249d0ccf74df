//! [`Command`] for updating a [`Client`].

use common::operations::{By, Commit, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{
    person::{Email, FiscalStatus, Gender, Phone},
};
use crate::{
    domain::{address, client, person, Address, Client},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Client`].
///
/// Fields left as [`None`] are untouched; the identity document is
/// immutable once recorded.
#[derive(Clone, Debug)]
pub struct UpdateClient {
    /// ID of the [`Client`] to update.
    pub client_id: client::Id,

    /// New first name, if supplied.
    pub first_name: Option<person::FirstName>,

    /// New last name, if supplied.
    pub last_name: Option<person::LastName>,

    /// New [`Email`], if supplied.
    pub email: Option<person::Email>,

    /// New landline [`Phone`], if supplied.
    pub phone: Option<person::Phone>,

    /// New mobile [`Phone`], if supplied.
    pub mobile: Option<person::Phone>,

    /// New birth date, if supplied.
    pub born_on: Option<client::BirthDate>,

    /// New [`Gender`], if supplied.
    pub gender: Option<person::Gender>,

    /// New [`FiscalStatus`], if supplied.
    pub fiscal_status: Option<person::FiscalStatus>,

    /// New [`Address`] reference, if supplied.
    pub address_id: Option<address::Id>,
}

impl<Db> Command<UpdateClient> for Service<Db>
where
    Db: Database<
            Select<By<Option<Client>, client::Id>>,
            Ok = Option<Client>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Address>, address::Id>>,
            Ok = Option<Address>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Update<Client>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Client;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateClient) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateClient {
            client_id,
            first_name,
            last_name,
            email,
            phone,
            mobile,
            born_on,
            gender,
            fiscal_status,
            address_id,
        } = cmd;

        let mut client = self
            .database()
            .execute(Select(By::<Option<Client>, _>::new(client_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ClientNotExists(client_id))
            .map_err(tracerr::wrap!())?;

        if let Some(address_id) = address_id {
            self.database()
                .execute(Select(By::<Option<Address>, _>::new(address_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::AddressNotExists(address_id))
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }

        if let Some(first_name) = first_name {
            client.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            client.last_name = last_name;
        }
        if let Some(email) = email {
            client.email = Some(email);
        }
        if let Some(phone) = phone {
            client.phone = Some(phone);
        }
        if let Some(mobile) = mobile {
            client.mobile = Some(mobile);
        }
        if let Some(born_on) = born_on {
            client.born_on = Some(born_on);
        }
        if let Some(gender) = gender {
            client.gender = Some(gender);
        }
        if let Some(fiscal_status) = fiscal_status {
            client.fiscal_status = Some(fiscal_status);
        }
        if let Some(address_id) = address_id {
            client.address_id = Some(address_id);
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Update(client.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(client)
    }
}

/// Error of [`UpdateClient`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Address`] with the provided ID does not exist.
    #[display("`Address(id: {_0})` does not exist")]
    AddressNotExists(#[error(not(source))] address::Id),

    /// [`Client`] with the provided ID does not exist.
    #[display("`Client(id: {_0})` does not exist")]
    ClientNotExists(#[error(not(source))] client::Id),
}
