//! [`Command`] for creating a new [`Property`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    Amount, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::property::{
    Description, Features, Kind, Name, Operation, Status,
};
use crate::{
    domain::{address, agent, client, property, Address, Agent, Client, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Property`].
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// [`Name`] of a new [`Property`].
    pub name: property::Name,

    /// [`Kind`] of a new [`Property`].
    pub kind: property::Kind,

    /// [`Operation`] a new [`Property`] is offered for.
    pub operation: property::Operation,

    /// Initial [`Status`] of a new [`Property`].
    pub status: property::Status,

    /// Sale price of a new [`Property`].
    pub sale_price: Option<Amount>,

    /// Monthly rent price of a new [`Property`].
    pub rent_price: Option<Amount>,

    /// ID of the owner [`Client`] of a new [`Property`].
    pub owner_id: client::Id,

    /// ID of the [`Agent`] in charge of a new [`Property`].
    pub agent_id: Option<agent::Id>,

    /// ID of the [`Address`] of a new [`Property`].
    pub address_id: Option<address::Id>,

    /// [`Description`] of a new [`Property`].
    pub description: Option<property::Description>,

    /// [`Features`] of a new [`Property`].
    pub features: property::Features,
}

impl<Db> Command<CreateProperty> for Service<Db>
where
    Db: Database<
            Select<By<Option<Client>, client::Id>>,
            Ok = Option<Client>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Agent>, agent::Id>>,
            Ok = Option<Agent>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Address>, address::Id>>,
            Ok = Option<Address>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Property>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProperty {
            name,
            kind,
            operation,
            status,
            sale_price,
            rent_price,
            owner_id,
            agent_id,
            address_id,
            description,
            features,
        } = cmd;

        self.database()
            .execute(Select(By::<Option<Client>, _>::new(owner_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OwnerNotExists(owner_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        if let Some(agent_id) = agent_id {
            self.database()
                .execute(Select(By::<Option<Agent>, _>::new(agent_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::AgentNotExists(agent_id))
                .map_err(tracerr::wrap!())
                .map(drop)?;
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
        let property = Property {
            id: property::Id::new(),
            name,
            kind,
            operation,
            status,
            sale_price,
            rent_price,
            owner_id,
            agent_id,
            address_id,
            cover_image_id: None,
            description,
            features,
            created_at: now.coerce(),
            modified_at: now.coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(property)
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
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

    /// Owner [`Client`] with the provided ID does not exist.
    #[display("`Client(id: {_0})` does not exist")]
    OwnerNotExists(#[error(not(source))] client::Id),
}
