//! [`Client`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select, Update},
    pagination,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{client, person, Client},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Reads a [`Client`] out of a fully selected [`Row`].
fn from_row(row: &Row) -> Client {
    Client {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        document_kind: row.get("document_kind"),
        document_number: row.get("document_number"),
        email: row.get("email"),
        phone: row.get("phone"),
        mobile: row.get("mobile"),
        born_on: row.get("born_on"),
        gender: row.get("gender"),
        fiscal_status: row.get("fiscal_status"),
        address_id: row.get("address_id"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Client>, client::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Client>, client::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, first_name, last_name, \
                   document_kind, document_number, \
                   email, phone, mobile, \
                   born_on, gender, fiscal_status, \
                   address_id, created_at \
            FROM clients \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<'n, C> Database<Select<By<Option<Client>, &'n person::DocumentNumber>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Client>, &'n person::DocumentNumber>>,
    ) -> Result<Self::Ok, Self::Err> {
        let number = by.into_inner();

        const SQL: &str = "\
            SELECT id, first_name, last_name, \
                   document_kind, document_number, \
                   email, phone, mobile, \
                   born_on, gender, fiscal_status, \
                   address_id, created_at \
            FROM clients \
            WHERE document_number = $1::VARCHAR \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&number])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Select<By<Vec<Client>, pagination::Arguments>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Client>, pagination::Arguments>>,
    ) -> Result<Self::Ok, Self::Err> {
        let arguments = by.into_inner();

        const SQL: &str = "\
            SELECT id, first_name, last_name, \
                   document_kind, document_number, \
                   email, phone, mobile, \
                   born_on, gender, fiscal_status, \
                   address_id, created_at \
            FROM clients \
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

impl<C> Database<Insert<Client>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Client>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(client): Insert<Client>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(client)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Client>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(client): Update<Client>,
    ) -> Result<Self::Ok, Self::Err> {
        let Client {
            id,
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
            created_at,
        } = client;

        const SQL: &str = "\
            INSERT INTO clients (\
                id, first_name, last_name, \
                document_kind, document_number, \
                email, phone, mobile, \
                born_on, gender, fiscal_status, \
                address_id, created_at\
            ) \
            VALUES (\
                $1::UUID, \
                $2::VARCHAR, $3::VARCHAR, \
                $4::INT2, $5::VARCHAR, \
                $6::VARCHAR, $7::VARCHAR, $8::VARCHAR, \
                $9::DATE, $10::INT2, $11::INT2, \
                $12::UUID, $13::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET first_name = EXCLUDED.first_name, \
                last_name = EXCLUDED.last_name, \
                document_kind = EXCLUDED.document_kind, \
                document_number = EXCLUDED.document_number, \
                email = EXCLUDED.email, \
                phone = EXCLUDED.phone, \
                mobile = EXCLUDED.mobile, \
                born_on = EXCLUDED.born_on, \
                gender = EXCLUDED.gender, \
                fiscal_status = EXCLUDED.fiscal_status, \
                address_id = EXCLUDED.address_id";
        self.exec(
            SQL,
            &[
                &id,
                &first_name,
                &last_name,
                &document_kind,
                &document_number,
                &email,
                &phone,
                &mobile,
                &born_on,
                &gender,
                &fiscal_status,
                &address_id,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
