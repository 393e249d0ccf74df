//! [`Agent`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select, Update},
    pagination,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{agent, user, Agent},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Reads an [`Agent`] out of a fully selected [`Row`].
fn from_row(row: &Row) -> Agent {
    Agent {
        id: row.get("id"),
        user_id: row.get("user_id"),
        document_kind: row.get("document_kind"),
        document_number: row.get("document_number"),
        phone: row.get("phone"),
        born_on: row.get("born_on"),
        licence: row.get("licence"),
        is_active: row.get("is_active"),
        address_id: row.get("address_id"),
        created_at: row.get("created_at"),
        modified_at: row.get("modified_at"),
    }
}

impl<C> Database<Select<By<Option<Agent>, agent::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Agent>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Agent>, agent::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, user_id, \
                   document_kind, document_number, \
                   phone, born_on, licence, is_active, \
                   address_id, created_at, modified_at \
            FROM agents \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Select<By<Option<Agent>, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Agent>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Agent>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();

        const SQL: &str = "\
            SELECT id, user_id, \
                   document_kind, document_number, \
                   phone, born_on, licence, is_active, \
                   address_id, created_at, modified_at \
            FROM agents \
            WHERE user_id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&user_id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Select<By<Vec<Agent>, pagination::Arguments>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Agent>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Agent>, pagination::Arguments>>,
    ) -> Result<Self::Ok, Self::Err> {
        let arguments = by.into_inner();

        const SQL: &str = "\
            SELECT id, user_id, \
                   document_kind, document_number, \
                   phone, born_on, licence, is_active, \
                   address_id, created_at, modified_at \
            FROM agents \
            ORDER BY id \
            OFFSET $1::INT8 \
            LIMIT $2::INT8";
        Ok(self
            .query(SQL, &[&arguments.sql_offset(), &arguments.sql_limit()])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Agent>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Agent>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(agent): Insert<Agent>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(agent)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Agent>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(agent): Update<Agent>,
    ) -> Result<Self::Ok, Self::Err> {
        let Agent {
            id,
            user_id,
            document_kind,
            document_number,
            phone,
            born_on,
            licence,
            is_active,
            address_id,
            created_at,
            modified_at,
        } = agent;

        const SQL: &str = "\
            INSERT INTO agents (\
                id, user_id, \
                document_kind, document_number, \
                phone, born_on, licence, is_active, \
                address_id, created_at, modified_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, \
                $3::INT2, $4::VARCHAR, \
                $5::VARCHAR, $6::DATE, $7::VARCHAR, $8::BOOL, \
                $9::UUID, $10::TIMESTAMPTZ, $11::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET document_kind = EXCLUDED.document_kind, \
                document_number = EXCLUDED.document_number, \
                phone = EXCLUDED.phone, \
                born_on = EXCLUDED.born_on, \
                licence = EXCLUDED.licence, \
                is_active = EXCLUDED.is_active, \
                address_id = EXCLUDED.address_id, \
                modified_at = EXCLUDED.modified_at";
        self.exec(
            SQL,
            &[
                &id,
                &user_id,
                &document_kind,
                &document_number,
                &phone,
                &born_on,
                &licence,
                &is_active,
                &address_id,
                &created_at,
                &modified_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
