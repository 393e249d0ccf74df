//! [`Payment`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select},
    Sum,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{invoice, payment, Payment},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Reads a [`Payment`] out of a fully selected [`Row`].
fn from_row(row: &Row) -> Payment {
    Payment {
        id: row.get("id"),
        invoice_id: row.get("invoice_id"),
        paid_on: row.get("paid_on"),
        amount: row.get("amount"),
        method: row.get("method"),
        reference: row.get("reference"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Payment>, payment::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Payment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Payment>, payment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, invoice_id, paid_on, \
                   amount, method, reference, created_at \
            FROM payments \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Select<By<Vec<Payment>, invoice::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Payment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payment>, invoice::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let invoice_id = by.into_inner();

        const SQL: &str = "\
            SELECT id, invoice_id, paid_on, \
                   amount, method, reference, created_at \
            FROM payments \
            WHERE invoice_id = $1::UUID \
            ORDER BY paid_on DESC, id";
        Ok(self
            .query(SQL, &[&invoice_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Sum, invoice::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Sum;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Sum, invoice::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let invoice_id = by.into_inner();

        const SQL: &str = "\
            SELECT COALESCE(SUM(amount), 0)::NUMERIC AS total \
            FROM payments \
            WHERE invoice_id = $1::UUID";
        self.query_opt(SQL, &[&invoice_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.map_or(Sum::ZERO, |row| row.get("total")))
    }
}

impl<C> Database<Insert<Payment>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(payment): Insert<Payment>,
    ) -> Result<Self::Ok, Self::Err> {
        let Payment {
            id,
            invoice_id,
            paid_on,
            amount,
            method,
            reference,
            created_at,
        } = payment;

        const SQL: &str = "\
            INSERT INTO payments (\
                id, invoice_id, paid_on, \
                amount, method, reference, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::DATE, \
                $4::NUMERIC, $5::INT2, $6::VARCHAR, $7::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &invoice_id,
                &paid_on,
                &amount,
                &method,
                &reference,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
