//! [`Property`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Reads a [`Property`] out of a fully selected [`Row`].
fn from_row(row: &Row) -> Property {
    Property {
        id: row.get("id"),
        name: row.get("name"),
        kind: row.get("kind"),
        operation: row.get("operation"),
        status: row.get("status"),
        sale_price: row.get("sale_price"),
        rent_price: row.get("rent_price"),
        owner_id: row.get("owner_id"),
        agent_id: row.get("agent_id"),
        address_id: row.get("address_id"),
        cover_image_id: row.get("cover_image_id"),
        description: row.get("description"),
        features: property::Features {
            year_built: row
                .get::<_, Option<i32>>("year_built")
                .map(u16::try_from)
                .transpose()
                .expect("`year_built` overflow"),
            bathrooms: row
                .get::<_, Option<i32>>("bathrooms")
                .map(u16::try_from)
                .transpose()
                .expect("`bathrooms` overflow"),
            bedrooms: row
                .get::<_, Option<i32>>("bedrooms")
                .map(u16::try_from)
                .transpose()
                .expect("`bedrooms` overflow"),
            rooms: row
                .get::<_, Option<i32>>("rooms")
                .map(u16::try_from)
                .transpose()
                .expect("`rooms` overflow"),
            garages: row
                .get::<_, Option<i32>>("garages")
                .map(u16::try_from)
                .transpose()
                .expect("`garages` overflow"),
            furnished: row.get("furnished"),
            covered_surface: row
                .get::<_, Option<i64>>("covered_surface")
                .map(u32::try_from)
                .transpose()
                .expect("`covered_surface` overflow"),
            uncovered_surface: row
                .get::<_, Option<i64>>("uncovered_surface")
                .map(u32::try_from)
                .transpose()
                .expect("`uncovered_surface` overflow"),
            total_surface: row
                .get::<_, Option<i64>>("total_surface")
                .map(u32::try_from)
                .transpose()
                .expect("`total_surface` overflow"),
        },
        created_at: row.get("created_at"),
        modified_at: row.get("modified_at"),
    }
}

/// Columns selected for reading a [`Property`] with [`from_row`].
const SELECT_COLUMNS: &str = "\
    id, name, kind, operation, status, \
    sale_price, rent_price, \
    owner_id, agent_id, address_id, cover_image_id, \
    description, \
    year_built, bathrooms, bedrooms, rooms, garages, furnished, \
    covered_surface, uncovered_surface, total_surface, \
    created_at, modified_at";

impl<C> Database<Select<By<Option<Property>, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {SELECT_COLUMNS} \
             FROM properties \
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

impl<C> Database<Select<By<Vec<Property>, read::property::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, read::property::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::property::list::Selector {
            arguments,
            filter: read::property::list::Filter { status, operation },
        } = by.into_inner();

        let offset = arguments.sql_offset();
        let limit = arguments.sql_limit();
        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&offset, &limit];

        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });
        let operation_idx = operation.as_ref().map(|o| {
            ps.push(o);
            ps.len()
        });

        let sql = format!(
            "SELECT {SELECT_COLUMNS} \
             FROM properties \
             WHERE TRUE \
                   {status_filtering} \
                   {operation_filtering} \
             ORDER BY id \
             OFFSET $1::INT8 \
             LIMIT $2::INT8",
            status_filtering = status_idx
                .map(|idx| format!("AND status = ${idx}::INT2"))
                .unwrap_or_default(),
            operation_filtering = operation_idx
                .map(|idx| format!("AND operation = ${idx}::INT2"))
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

impl<C> Database<Insert<Property>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Property>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(property))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Property>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let Property {
            id,
            name,
            kind,
            operation,
            status,
            sale_price,
            rent_price,
            owner_id,
            agent_id,
            address_id,
            cover_image_id,
            description,
            features,
            created_at,
            modified_at,
        } = property;

        let year_built = features.year_built.map(i32::from);
        let bathrooms = features.bathrooms.map(i32::from);
        let bedrooms = features.bedrooms.map(i32::from);
        let rooms = features.rooms.map(i32::from);
        let garages = features.garages.map(i32::from);
        let covered_surface = features.covered_surface.map(i64::from);
        let uncovered_surface = features.uncovered_surface.map(i64::from);
        let total_surface = features.total_surface.map(i64::from);

        const SQL: &str = "\
            INSERT INTO properties (\
                id, name, kind, operation, status, \
                sale_price, rent_price, \
                owner_id, agent_id, address_id, cover_image_id, \
                description, \
                year_built, bathrooms, bedrooms, rooms, garages, furnished, \
                covered_surface, uncovered_surface, total_surface, \
                created_at, modified_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::INT2, $4::INT2, $5::INT2, \
                $6::INT8, $7::INT8, \
                $8::UUID, $9::UUID, $10::UUID, $11::UUID, \
                $12::VARCHAR, \
                $13::INT4, $14::INT4, $15::INT4, $16::INT4, $17::INT4, \
                $18::BOOL, \
                $19::INT8, $20::INT8, $21::INT8, \
                $22::TIMESTAMPTZ, $23::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                kind = EXCLUDED.kind, \
                operation = EXCLUDED.operation, \
                status = EXCLUDED.status, \
                sale_price = EXCLUDED.sale_price, \
                rent_price = EXCLUDED.rent_price, \
                owner_id = EXCLUDED.owner_id, \
                agent_id = EXCLUDED.agent_id, \
                address_id = EXCLUDED.address_id, \
                cover_image_id = EXCLUDED.cover_image_id, \
                description = EXCLUDED.description, \
                year_built = EXCLUDED.year_built, \
                bathrooms = EXCLUDED.bathrooms, \
                bedrooms = EXCLUDED.bedrooms, \
                rooms = EXCLUDED.rooms, \
                garages = EXCLUDED.garages, \
                furnished = EXCLUDED.furnished, \
                covered_surface = EXCLUDED.covered_surface, \
                uncovered_surface = EXCLUDED.uncovered_surface, \
                total_surface = EXCLUDED.total_surface, \
                modified_at = EXCLUDED.modified_at";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &kind,
                &operation,
                &status,
                &sale_price,
                &rent_price,
                &owner_id,
                &agent_id,
                &address_id,
                &cover_image_id,
                &description,
                &year_built,
                &bathrooms,
                &bedrooms,
                &rooms,
                &garages,
                &features.furnished,
                &covered_surface,
                &uncovered_surface,
                &total_surface,
                &created_at,
                &modified_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
