//! [`Contract`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{contract, Contract},
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

/// Reads a [`Contract`] out of a fully selected [`Row`].
fn from_row(row: &Row) -> Contract {
    Contract {
        id: row.get("id"),
        property_id: row.get("property_id"),
        tenant_id: row.get("tenant_id"),
        started_on: row.get("started_on"),
        ends_on: row.get("ends_on"),
        payment_day: row.get("payment_day"),
        initial_rent: row.get("initial_rent"),
        current_rent: row.get("current_rent"),
        increase_interval: row.get("increase_interval"),
        next_increase_on: row.get("next_increase_on"),
        last_notified_at: row.get("last_notified_at"),
        status: row.get("status"),
        created_at: row.get("created_at"),
        modified_at: row.get("modified_at"),
    }
}

/// Columns selected for reading a [`Contract`] with [`from_row`].
const SELECT_COLUMNS: &str = "\
    id, property_id, tenant_id, \
    started_on, ends_on, payment_day, \
    initial_rent, current_rent, \
    increase_interval, next_increase_on, last_notified_at, \
    status, created_at, modified_at";

impl<C> Database<Select<By<Option<Contract>, contract::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Contract>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {SELECT_COLUMNS} \
             FROM contracts \
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

impl Database<Lock<By<Option<Contract>, contract::Id>>> for Postgres<Tx> {
    type Ok = Option<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Option<Contract>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {SELECT_COLUMNS} \
             FROM contracts \
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

impl<C> Database<Select<By<Vec<Contract>, read::contract::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Contract>, read::contract::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::contract::list::Selector {
            arguments,
            filter:
                read::contract::list::Filter {
                    property_id,
                    tenant_id,
                    status,
                },
        } = by.into_inner();

        let offset = arguments.sql_offset();
        let limit = arguments.sql_limit();
        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&offset, &limit];

        let property_idx = property_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });
        let tenant_idx = tenant_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });
        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });

        let sql = format!(
            "SELECT {SELECT_COLUMNS} \
             FROM contracts \
             WHERE TRUE \
                   {property_filtering} \
                   {tenant_filtering} \
                   {status_filtering} \
             ORDER BY id \
             OFFSET $1::INT8 \
             LIMIT $2::INT8",
            property_filtering = property_idx
                .map(|idx| format!("AND property_id = ${idx}::UUID"))
                .unwrap_or_default(),
            tenant_filtering = tenant_idx
                .map(|idx| format!("AND tenant_id = ${idx}::UUID"))
                .unwrap_or_default(),
            status_filtering = status_idx
                .map(|idx| format!("AND status = ${idx}::INT2"))
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

impl<C> Database<Select<By<Vec<Contract>, read::contract::PendingIncreases>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Contract>, read::contract::PendingIncreases>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::contract::PendingIncreases { today, window } =
            by.into_inner();

        let Some(horizon) = today.advanced_by_days(window.days()) else {
            return Ok(Vec::new());
        };

        // The SQL narrows the candidate set by status and date window, while
        // the notification recency rule is decided by
        // `Contract::needs_increase_notification`, keeping a single source
        // of truth for it.
        let active = contract::Status::Active;
        let sql = format!(
            "SELECT {SELECT_COLUMNS} \
             FROM contracts \
             WHERE status = $1::INT2 \
               AND next_increase_on >= $2::DATE \
               AND next_increase_on <= $3::DATE \
             ORDER BY next_increase_on, id",
        );
        Ok(self
            .query(&sql, &[&active, &today, &horizon])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .filter(|c| c.needs_increase_notification(today, window))
            .collect())
    }
}

impl<C> Database<Insert<Contract>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Contract>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(contract): Insert<Contract>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(contract))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Contract>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(contract): Update<Contract>,
    ) -> Result<Self::Ok, Self::Err> {
        let Contract {
            id,
            property_id,
            tenant_id,
            started_on,
            ends_on,
            payment_day,
            initial_rent,
            current_rent,
            increase_interval,
            next_increase_on,
            last_notified_at,
            status,
            created_at,
            modified_at,
        } = contract;

        const SQL: &str = "\
            INSERT INTO contracts (\
                id, property_id, tenant_id, \
                started_on, ends_on, payment_day, \
                initial_rent, current_rent, \
                increase_interval, next_increase_on, last_notified_at, \
                status, created_at, modified_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, \
                $4::DATE, $5::DATE, $6::INT2, \
                $7::INT8, $8::INT8, \
                $9::INT4, $10::DATE, $11::TIMESTAMPTZ, \
                $12::INT2, $13::TIMESTAMPTZ, $14::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET ends_on = EXCLUDED.ends_on, \
                payment_day = EXCLUDED.payment_day, \
                current_rent = EXCLUDED.current_rent, \
                increase_interval = EXCLUDED.increase_interval, \
                next_increase_on = EXCLUDED.next_increase_on, \
                last_notified_at = EXCLUDED.last_notified_at, \
                status = EXCLUDED.status, \
                modified_at = EXCLUDED.modified_at";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &tenant_id,
                &started_on,
                &ends_on,
                &payment_day,
                &initial_rent,
                &current_rent,
                &increase_interval,
                &next_increase_on,
                &last_notified_at,
                &status,
                &created_at,
                &modified_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
