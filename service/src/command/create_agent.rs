//! [`Command`] for creating a new [`Agent`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{
    agent::Licence,
    person::{DocumentKind, DocumentNumber, Phone},
};
use crate::{
    domain::{address, agent, person, user, Address, Agent, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Agent`].
#[derive(Clone, Debug)]
pub struct CreateAgent {
    /// ID of the [`User`] account of a new [`Agent`].
    pub user_id: user::Id,

    /// [`DocumentKind`] of a new [`Agent`]'s identity document.
    pub document_kind: person::DocumentKind,

    /// [`DocumentNumber`] of a new [`Agent`]'s identity document.
    pub document_number: person::DocumentNumber,

    /// [`Phone`] of a new [`Agent`].
    pub phone: Option<person::Phone>,

    /// Birth date of a new [`Agent`].
    pub born_on: Option<agent::BirthDate>,

    /// Professional [`Licence`] of a new [`Agent`].
    pub licence: Option<agent::Licence>,

    /// ID of the [`Address`] of a new [`Agent`].
    pub address_id: Option<address::Id>,
}

impl<Db> Command<CreateAgent> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Agent>, user::Id>>,
            Ok = Option<Agent>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Address>, address::Id>>,
            Ok = Option<Address>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Agent>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Agent;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateAgent) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateAgent {
            user_id,
            document_kind,
            document_number,
            phone,
            born_on,
            licence,
            address_id,
        } = cmd;

        self.database()
            .execute(Select(By::<Option<User>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let a = self
            .database()
            .execute(Select(By::<Option<Agent>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if a.is_some() {
            return Err(tracerr::new!(E::UserOccupied(user_id)));
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

        let now = DateTime::now();
        let agent = Agent {
            id: agent::Id::new(),
            user_id,
            document_kind,
            document_number,
            phone,
            born_on,
            licence,
            is_active: true,
            address_id,
            created_at: now.coerce(),
            modified_at: now.coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(agent.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(agent)
    }
}

/// Error of [`CreateAgent`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Address`] with the provided ID does not exist.
    #[display("`Address(id: {_0})` does not exist")]
    AddressNotExists(#[error(not(source))] address::Id),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),

    /// [`User`] with the provided ID already backs another [`Agent`].
    #[display("`User(id: {_0})` already backs an `Agent`")]
    #[from(ignore)]
    UserOccupied(#[error(not(source))] user::Id),
}
