//! [`Command`] for creating a new [`Client`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::person::{
    DocumentKind, DocumentNumber, Email, FiscalStatus, FirstName, Gender,
    LastName, Phone,
};
use crate::{
    domain::{address, client, person, Address, Client},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Client`].
#[derive(Clone, Debug)]
pub struct CreateClient {
    /// [`FirstName`] of a new [`Client`].
    pub first_name: person::FirstName,

    /// [`LastName`] of a new [`Client`].
    pub last_name: person::LastName,

    /// [`DocumentKind`] of a new [`Client`]'s identity document.
    pub document_kind: person::DocumentKind,

    /// [`DocumentNumber`] of a new [`Client`]'s identity document.
    pub document_number: person::DocumentNumber,

    /// [`Email`] of a new [`Client`].
    pub email: Option<person::Email>,

    /// Landline [`Phone`] of a new [`Client`].
    pub phone: Option<person::Phone>,

    /// Mobile [`Phone`] of a new [`Client`].
    pub mobile: Option<person::Phone>,

    /// Birth date of a new [`Client`].
    pub born_on: Option<client::BirthDate>,

    /// [`Gender`] of a new [`Client`].
    pub gender: Option<person::Gender>,

    /// [`FiscalStatus`] of a new [`Client`].
    pub fiscal_status: Option<person::FiscalStatus>,

    /// ID of the [`Address`] of a new [`Client`].
    pub address_id: Option<address::Id>,
}

impl<Db> Command<CreateClient> for Service<Db>
where
    Db: for<'n> Database<
            Select<By<Option<Client>, &'n person::DocumentNumber>>,
            Ok = Option<Client>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Address>, address::Id>>,
            Ok = Option<Address>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Client>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Client;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateClient) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateClient {
            first_name,
            last_name,
            document_kind,
            document_number,
            email,
            phone,
            mobile,
            born_on,
            gender,
            fiscal_status,
            address_id,
        } = cmd;

        let c = self
            .database()
            .execute(Select(By::new(&document_number)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if c.is_some() {
            return Err(tracerr::new!(E::DocumentOccupied(document_number)));
        }

        if let Some(address_id) = address_id {
            self.database()
                .execute(Select(By::<Option<Address>, _>::new(address_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::AddressNotExists(address_id))
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }

        let client = Client {
            id: client::Id::new(),
            first_name,
            last_name,
            document_kind,
            document_number,
            email,
            phone,
            mobile,
            born_on,
            gender,
            fiscal_status,
            address_id,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(client.clone()))
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

/// Error of [`CreateClient`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Address`] with the provided ID does not exist.
    #[display("`Address(id: {_0})` does not exist")]
    AddressNotExists(#[error(not(source))] address::Id),

    /// [`person::DocumentNumber`] is already taken by another [`Client`].
    #[display("`{_0}` document number is occupied")]
    DocumentOccupied(#[error(not(source))] person::DocumentNumber),
}
