//! [`Tx`] client definitions.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

use super::NonTx;

/// Transactional Postgres database client.
///
/// The transaction is opened lazily by the first operation, inheriting the
/// connection already held by the originating [`NonTx`] client when there is
/// one. Dropping the client without [`commit`]ting rolls the transaction
/// back.
///
/// [`commit`]: Tx::commit
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`connection::Pool`] to check a connection out of, if the originating
    /// [`NonTx`] client holds none.
    pool: connection::Pool,

    /// Shared state of this client.
    inner: Arc<Inner>,
}

/// Shared state of a [`Tx`] client.
#[derive(Debug)]
pub struct Inner {
    /// Originating [`NonTx`] client, consumed on transaction start.
    non_tx: RwLock<Option<NonTx>>,

    /// Open [`connection::Tx`], if any.
    tx: Arc<RwLock<Option<connection::Tx>>>,
}

impl Tx {
    /// Creates a new [`Tx`] client out of the provided [`NonTx`] one.
    #[must_use]
    pub fn from_non_tx(client: NonTx) -> Self {
        Self {
            pool: client.pool.clone(),
            inner: Arc::new(Inner {
                non_tx: RwLock::new(Some(client)),
                tx: Arc::new(RwLock::new(None)),
            }),
        }
    }

    /// Returns the [`connection::Tx`] of this client, starting the
    /// transaction if it's not open yet.
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::Tx>, Traced<database::Error>>
    {
        {
            let held = self.inner.tx.read().await;
            if held.is_some() {
                return Ok(RwLockReadGuard::map(held, |c| {
                    c.as_ref().expect("checked above")
                }));
            }
        }

        let mut slot = self.inner.tx.write().await;
        if slot.is_none() {
            let inherited = match self.inner.non_tx.write().await.take() {
                Some(client) => client.take_connection().await,
                None => None,
            };
            let conn = match inherited {
                Some(conn) => conn,
                None => self
                    .pool
                    .get()
                    .await
                    .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                    .map_err(tracerr::map_from)?,
            };

            *slot = Some(
                connection::Tx::begin(conn)
                    .await
                    .map_err(tracerr::wrap!())?,
            );
        }

        Ok(RwLockReadGuard::map(slot.downgrade(), |c| {
            c.as_ref().expect("filled above")
        }))
    }

    /// Commits the open transaction of this client.
    ///
    /// A no-op when no operation has opened one.
    ///
    /// # Errors
    ///
    /// If the transaction fails to commit.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        match self.inner.tx.write().await.take() {
            Some(tx) => tx.commit().await.map_err(tracerr::wrap!()),
            None => Ok(()),
        }
    }
}

impl Connection for Tx {
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
