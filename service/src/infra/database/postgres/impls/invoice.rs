//! [`Invoice`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{invoice, Invoice},
    infra::{
        database::{
            self,
            postgres::{Connection, Tx},
            Postgres,
        },
        Database,
    },
    read,
};

/// Reads an [`Invoice`] out of a fully selected [`Row`].
fn from_row(row: &Row) -> Invoice {
    Invoice {
        id: row.get("id"),
        client_id: row.get("client_id"),
        contract_id: row.get("contract_id"),
        property_id: row.get("property_id"),
        kind: row.get("kind"),
        series: row.get("series"),
        number: row.get("number"),
        issued_on: row.get("issued_on"),
        due_on: row.get("due_on"),
        base: row.get("base"),
        tax: row.get("tax"),
        total: row.get("total"),
        amount_due: row.get("amount_due"),
        payment_status: row.get("payment_status"),
        description: row.get("description"),
        created_at: row.get("created_at"),
        modified_at: row.get("modified_at"),
    }
}

/// Columns selected for reading an [`Invoice`] with [`from_row`].
const SELECT_COLUMNS: &str = "\
    id, client_id, contract_id, property_id, \
    kind, series, number, \
    issued_on, due_on, \
    base, tax, total, amount_due, payment_status, \
    description, created_at, modified_at";

impl<C> Database<Select<By<Option<Invoice>, invoice::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Invoice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Invoice>, invoice::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {SELECT_COLUMNS} \
             FROM invoices \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl Database<Lock<By<Option<Invoice>, invoice::Id>>> for Postgres<Tx> {
    type Ok = Option<Invoice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Option<Invoice>, invoice::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {SELECT_COLUMNS} \
             FROM invoices \
             WHERE id = $1::UUID \
             LIMIT 1 \
             FOR UPDATE",
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Select<By<Vec<Invoice>, read::invoice::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Invoice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Invoice>, read::invoice::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::invoice::list::Selector {
            arguments,
            filter: read::invoice::list::Filter { client_id },
        } = by.into_inner();

        let offset = arguments.sql_offset();
        let limit = arguments.sql_limit();
        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&offset, &limit];

        let client_idx = client_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });

        let sql = format!(
            "SELECT {SELECT_COLUMNS} \
             FROM invoices \
             WHERE TRUE \
                   {client_filtering} \
             ORDER BY issued_on DESC, id \
             OFFSET $1::INT8 \
             LIMIT $2::INT8",
            client_filtering = client_idx
                .map(|idx| format!("AND client_id = ${idx}::UUID"))
                .unwrap_or_default(),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Invoice>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Invoice>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(invoice): Insert<Invoice>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(invoice))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Invoice>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(invoice): Update<Invoice>,
    ) -> Result<Self::Ok, Self::Err> {
        let Invoice {
            id,
            client_id,
            contract_id,
            property_id,
            kind,
            series,
            number,
            issued_on,
            due_on,
            base,
            tax,
            total,
            amount_due,
            payment_status,
            description,
            created_at,
            modified_at,
        } = invoice;

        const SQL: &str = "\
            INSERT INTO invoices (\
                id, client_id, contract_id, property_id, \
                kind, series, number, \
                issued_on, due_on, \
                base, tax, total, amount_due, payment_status, \
                description, created_at, modified_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::UUID, \
                $5::INT2, $6::VARCHAR, $7::INT4, \
                $8::DATE, $9::DATE, \
                $10::NUMERIC, $11::NUMERIC, $12::NUMERIC, $13::NUMERIC, \
                $14::INT2, \
                $15::VARCHAR, $16::TIMESTAMPTZ, $17::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET kind = EXCLUDED.kind, \
                series = EXCLUDED.series, \
                number = EXCLUDED.number, \
                issued_on = EXCLUDED.issued_on, \
                due_on = EXCLUDED.due_on, \
                base = EXCLUDED.base, \
                tax = EXCLUDED.tax, \
                total = EXCLUDED.total, \
                amount_due = EXCLUDED.amount_due, \
                payment_status = EXCLUDED.payment_status, \
                description = EXCLUDED.description, \
                modified_at = EXCLUDED.modified_at";
        self.exec(
            SQL,
            &[
                &id,
                &client_id,
                &contract_id,
                &property_id,
                &kind,
                &series,
                &number,
                &issued_on,
                &due_on,
                &base,
                &tax,
                &total,
                &amount_due,
                &payment_status,
                &description,
                &created_at,
                &modified_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
