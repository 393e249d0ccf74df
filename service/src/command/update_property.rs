//! [`Command`] for updating a [`Property`].

use common::{
    operations::{By, Commit, Select, Transact, Transacted, Update},
    Amount, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::property::{
    Description, Features, Kind, Name, Operation, Status,
};
use crate::{
    domain::{address, agent, property, Address, Agent, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Property`].
///
/// Fields left as [`None`] are untouched; the owner [`Client`] is immutable
/// once recorded.
///
/// [`Client`]: crate::domain::Client
#[derive(Clone, Debug)]
pub struct UpdateProperty {
    /// ID of the [`Property`] to update.
    pub property_id: property::Id,

    /// New [`Name`], if supplied.
    pub name: Option<property::Name>,

    /// New [`Kind`], if supplied.
    pub kind: Option<property::Kind>,

    /// New [`Operation`], if supplied.
    pub operation: Option<property::Operation>,

    /// New [`Status`], if supplied.
    pub status: Option<property::Status>,

    /// New sale price, if supplied.
    pub sale_price: Option<Amount>,

    /// New monthly rent price, if supplied.
    pub rent_price: Option<Amount>,

    /// New [`Agent`] reference, if supplied.
    pub agent_id: Option<agent::Id>,

    /// New [`Address`] reference, if supplied.
    pub address_id: Option<address::Id>,

    /// New [`Description`], if supplied.
    pub description: Option<property::Description>,

    /// New [`Features`], if supplied. Replaces the whole set.
    pub features: Option<property::Features>,
}

impl<Db> Command<UpdateProperty> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
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
    Transacted<Db>: Database<Update<Property>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProperty {
            property_id,
            name,
            kind,
            operation,
            status,
            sale_price,
            rent_price,
            agent_id,
            address_id,
            description,
            features,
        } = cmd;

        let mut property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

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

        if let Some(name) = name {
            property.name = name;
        }
        if let Some(kind) = kind {
            property.kind = kind;
        }
        if let Some(operation) = operation {
            property.operation = operation;
        }
        if let Some(status) = status {
            property.status = status;
        }
        if let Some(sale_price) = sale_price {
            property.sale_price = Some(sale_price);
        }
        if let Some(rent_price) = rent_price {
            property.rent_price = Some(rent_price);
        }
        if let Some(agent_id) = agent_id {
            property.agent_id = Some(agent_id);
        }
        if let Some(address_id) = address_id {
            property.address_id = Some(address_id);
        }
        if let Some(description) = description {
            property.description = Some(description);
        }
        if let Some(features) = features {
            property.features = features;
        }
        property.modified_at = DateTime::now().coerce();

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Update(property.clone()))
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

/// Error of [`UpdateProperty`] [`Command`] execution.
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

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),
}
