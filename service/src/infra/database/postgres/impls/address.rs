//! [`Address`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{address, Address},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Address>, address::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Address>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Address>, address::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, street, street_number, \
                   postal_code, neighborhood, locality_id \
            FROM addresses \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Address {
                id: row.get("id"),
                street: row.get("street"),
                street_number: row.get("street_number"),
                postal_code: row.get("postal_code"),
                neighborhood: row.get("neighborhood"),
                locality_id: row.get("locality_id"),
            }))
    }
}

impl<C> Database<Insert<Address>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(address): Insert<Address>,
    ) -> Result<Self::Ok, Self::Err> {
        let Address {
            id,
            street,
            street_number,
            postal_code,
            neighborhood,
            locality_id,
        } = address;

        const SQL: &str = "\
            INSERT INTO addresses (\
                id, street, street_number, \
                postal_code, neighborhood, locality_id\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, \
                $4::VARCHAR, $5::VARCHAR, $6::UUID\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &street,
                &street_number,
                &postal_code,
                &neighborhood,
                &locality_id,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
