//! [`Command`] for creating a new [`Address`].

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::address::{Neighborhood, PostalCode, Street, StreetNumber};
#[cfg(doc)]
use crate::domain::geo::Locality;
use crate::{
    domain::{address, geo, Address},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Address`].
///
/// [`Address`]es are create-only: correcting one means creating another and
/// repointing its referrers.
#[derive(Clone, Debug)]
pub struct CreateAddress {
    /// [`Street`] of a new [`Address`].
    pub street: address::Street,

    /// [`StreetNumber`] of a new [`Address`].
    pub street_number: address::StreetNumber,

    /// [`PostalCode`] of a new [`Address`].
    pub postal_code: Option<address::PostalCode>,

    /// [`Neighborhood`] of a new [`Address`].
    pub neighborhood: Option<address::Neighborhood>,

    /// ID of the [`Locality`] a new [`Address`] belongs to.
    pub locality_id: geo::locality::Id,
}

impl<Db> Command<CreateAddress> for Service<Db>
where
    Db: Database<
            Select<By<Option<geo::Locality>, geo::locality::Id>>,
            Ok = Option<geo::Locality>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Address>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Address;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateAddress,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateAddress {
            street,
            street_number,
            postal_code,
            neighborhood,
            locality_id,
        } = cmd;

        self.database()
            .execute(Select(By::<Option<geo::Locality>, _>::new(locality_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LocalityNotExists(locality_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let address = Address {
            id: address::Id::new(),
            street,
            street_number,
            postal_code,
            neighborhood,
            locality_id,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(address.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(address)
    }
}

/// Error of [`CreateAddress`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Locality`] with the provided ID does not exist.
    #[display("`Locality(id: {_0})` does not exist")]
    LocalityNotExists(#[error(not(source))] geo::locality::Id),
}
