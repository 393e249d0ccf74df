//! [`Image`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use tokio_postgres::Row;
use tracerr::Traced;
use uuid::Uuid;

use crate::{
    domain::{image, Image},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Reads an [`Image`] out of a fully selected [`Row`].
fn from_row(row: &Row) -> Image {
    Image {
        id: row.get("id"),
        owner: image::Owner::from_parts(
            row.get("owner_kind"),
            row.get::<_, Uuid>("owner_id"),
        ),
        role: row.get("role"),
        path: row.get("path"),
        content_type: row.get("content_type"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Image>, image::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Image>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Image>, image::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, owner_kind, owner_id, role, \
                   path, content_type, created_at \
            FROM images \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Select<By<Vec<Image>, image::Owner>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Image>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Image>, image::Owner>>,
    ) -> Result<Self::Ok, Self::Err> {
        let owner = by.into_inner();
        let owner_kind = owner.kind();
        let owner_id = owner.uuid();

        const SQL: &str = "\
            SELECT id, owner_kind, owner_id, role, \
                   path, content_type, created_at \
            FROM images \
            WHERE owner_kind = $1::INT2 \
              AND owner_id = $2::UUID \
            ORDER BY created_at DESC, id";
        Ok(self
            .query(SQL, &[&owner_kind, &owner_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Image>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(image): Insert<Image>,
    ) -> Result<Self::Ok, Self::Err> {
        let Image {
            id,
            owner,
            role,
            path,
            content_type,
            created_at,
        } = image;
        let owner_kind = owner.kind();
        let owner_id = owner.uuid();

        const SQL: &str = "\
            INSERT INTO images (\
                id, owner_kind, owner_id, role, \
                path, content_type, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::INT2, $3::UUID, $4::INT2, \
                $5::VARCHAR, $6::VARCHAR, $7::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &owner_kind,
                &owner_id,
                &role,
                &path,
                &content_type,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<image::Id>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(id): Delete<image::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            DELETE FROM images \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
