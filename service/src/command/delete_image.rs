//! [`Command`] for deleting an [`Image`].

use common::operations::{By, Commit, Delete, Perform, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{image, Image},
    infra::{database, storage, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an [`Image`].
///
/// Removes the [`Image`] row first and the stored file afterwards, so a
/// file-store failure never leaves a row pointing at nothing.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteImage {
    /// ID of the [`Image`] to delete.
    pub image_id: image::Id,
}

impl<Db> Command<DeleteImage> for Service<Db>
where
    Db: Database<
            Select<By<Option<Image>, image::Id>>,
            Ok = Option<Image>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Delete<image::Id>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteImage) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteImage { image_id } = cmd;

        let image = self
            .database()
            .execute(Select(By::<Option<Image>, _>::new(image_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ImageNotExists(image_id))
            .map_err(tracerr::wrap!())?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Delete(image_id))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.storage()
            .execute(Perform(storage::Remove { path: image.path }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(())
    }
}

/// Error of [`DeleteImage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// File store error.
    #[display("`FileStore` operation failed: {_0}")]
    Storage(storage::Error),

    /// [`Image`] with the provided ID does not exist.
    #[display("`Image(id: {_0})` does not exist")]
    #[from(ignore)]
    ImageNotExists(#[error(not(source))] image::Id),
}
