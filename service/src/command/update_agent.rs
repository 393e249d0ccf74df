//! [`Command`] for updating an [`Agent`].

use common::{
    operations::{By, Commit, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{agent::Licence, person::Phone};
use crate::{
    domain::{address, agent, person, Address, Agent},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an [`Agent`].
///
/// Fields left as [`None`] are untouched; the backing [`User`] account and
/// the identity document are immutable once recorded.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct UpdateAgent {
    /// ID of the [`Agent`] to update.
    pub agent_id: agent::Id,

    /// New [`Phone`], if supplied.
    pub phone: Option<person::Phone>,

    /// New birth date, if supplied.
    pub born_on: Option<agent::BirthDate>,

    /// New [`Licence`], if supplied.
    pub licence: Option<agent::Licence>,

    /// New employment indicator, if supplied.
    pub is_active: Option<bool>,

    /// New [`Address`] reference, if supplied.
    pub address_id: Option<address::Id>,
}

impl<Db> Command<UpdateAgent> for Service<Db>
where
    Db: Database<
            Select<By<Option<Agent>, agent::Id>>,
            Ok = Option<Agent>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Address>, address::Id>>,
            Ok = Option<Address>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Update<Agent>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Agent;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateAgent) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateAgent {
            agent_id,
            phone,
            born_on,
            licence,
            is_active,
            address_id,
        } = cmd;

        let mut agent = self
            .database()
            .execute(Select(By::<Option<Agent>, _>::new(agent_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::AgentNotExists(agent_id))
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

        if let Some(phone) = phone {
            agent.phone = Some(phone);
        }
        if let Some(born_on) = born_on {
            agent.born_on = Some(born_on);
        }
        if let Some(licence) = licence {
            agent.licence = Some(licence);
        }
        if let Some(is_active) = is_active {
            agent.is_active = is_active;
        }
        if let Some(address_id) = address_id {
            agent.address_id = Some(address_id);
        }
        agent.modified_at = DateTime::now().coerce();

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Update(agent.clone()))
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

/// Error of [`UpdateAgent`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Address`] with the provided ID does not exist.
    #[display("`Address(id: {_0})` does not exist")]
    AddressNotExists(#[error(not(source))] address::Id),

    /// [`Agent`] with the provided ID does not exist.
    #[display("`Agent(id: {_0})` does not exist")]
    AgentNotExists(#[error(not(source))] agent::Id),
}
