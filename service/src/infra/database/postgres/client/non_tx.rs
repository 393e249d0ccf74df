//! [`NonTx`] client definitions.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

/// Non-transactional Postgres database client.
///
/// Checks a [`connection::NonTx`] out of the [`connection::Pool`] on first
/// use and keeps it until [taken].
///
/// [taken]: NonTx::take_connection
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`connection::Pool`] to check [`connection::NonTx`]s out of.
    pub(crate) pool: connection::Pool,

    /// Checked out [`connection::NonTx`], if any.
    conn: Arc<RwLock<Option<connection::NonTx>>>,
}

impl NonTx {
    /// Creates a new [`NonTx`] client on top of the provided
    /// [`connection::Pool`].
    #[must_use]
    pub(crate) fn from_pool(pool: connection::Pool) -> Self {
        Self {
            pool,
            conn: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the [`connection::NonTx`] of this client, checking one out of
    /// the [`connection::Pool`] if none is held yet.
    pub(crate) async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::NonTx>, Traced<database::Error>>
    {
        {
            let held = self.conn.read().await;
            if held.is_some() {
                return Ok(RwLockReadGuard::map(held, |c| {
                    c.as_ref().expect("checked above")
                }));
            }
        }

        let mut slot = self.conn.write().await;
        if slot.is_none() {
            *slot = Some(
                self.pool
                    .get()
                    .await
                    .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                    .map_err(tracerr::map_from)?,
            );
        }

        Ok(RwLockReadGuard::map(slot.downgrade(), |c| {
            c.as_ref().expect("filled above")
        }))
    }

    /// Releases the held [`connection::NonTx`], handing it over to the
    /// caller.
    ///
    /// The next operation on this client checks a fresh one out of the
    /// [`connection::Pool`].
    #[must_use]
    pub(crate) async fn take_connection(&self) -> Option<connection::NonTx> {
        self.conn.write().await.take()
    }
}

impl Connection for NonTx {
    async fn query<S>(
        &self,
        stmt: &S,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        S: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .query(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn query_opt<S>(
        &self,
        stmt: &S,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        S: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .query_opt(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn exec<S>(
        &self,
        stmt: &S,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>>
    where
        S: ToStatement + ?Sized,
    {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .exec(stmt, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn batch_exec(
        &self,
        sql: &str,
    ) -> Result<(), Traced<database::Error>> {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .batch_exec(sql)
            .await
            .map_err(tracerr::wrap!())
    }
}
