//! Geographic catalog [`Database`] implementations.
//!
//! The catalog is read-only: it is seeded by migrations and never written by
//! the application.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::geo,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Vec<geo::Country>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<geo::Country>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<geo::Country>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name \
            FROM countries \
            ORDER BY name";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| geo::Country {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<Vec<geo::Province>, geo::country::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<geo::Province>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<geo::Province>, geo::country::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let country_id = by.into_inner();

        const SQL: &str = "\
            SELECT id, country_id, name \
            FROM provinces \
            WHERE country_id = $1::UUID \
            ORDER BY name";
        Ok(self
            .query(SQL, &[&country_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| geo::Province {
                id: row.get("id"),
                country_id: row.get("country_id"),
                name: row.get("name"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<geo::Locality>, geo::locality::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<geo::Locality>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<geo::Locality>, geo::locality::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, province_id, name \
            FROM localities \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| geo::Locality {
                id: row.get("id"),
                province_id: row.get("province_id"),
                name: row.get("name"),
            }))
    }
}

impl<C> Database<Select<By<Vec<geo::Locality>, geo::province::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<geo::Locality>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<geo::Locality>, geo::province::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let province_id = by.into_inner();

        const SQL: &str = "\
            SELECT id, province_id, name \
            FROM localities \
            WHERE province_id = $1::UUID \
            ORDER BY name";
        Ok(self
            .query(SQL, &[&province_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| geo::Locality {
                id: row.get("id"),
                province_id: row.get("province_id"),
                name: row.get("name"),
            })
            .collect())
    }
}
