//! [`Command`] for setting the cover [`Image`] of a [`Property`].

use common::{
    operations::{By, Commit, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{image, property, Image, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for setting the cover [`Image`] of a [`Property`].
///
/// The [`Image`] must already belong to the [`Property`].
#[derive(Clone, Copy, Debug)]
pub struct SetCoverImage {
    /// ID of the [`Property`] to set the cover of.
    pub property_id: property::Id,

    /// ID of the [`Image`] to use as the cover.
    pub image_id: image::Id,
}

impl<Db> Command<SetCoverImage> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Image>, image::Id>>,
            Ok = Option<Image>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Update<Property>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SetCoverImage,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SetCoverImage {
            property_id,
            image_id,
        } = cmd;

        let mut property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        let image = self
            .database()
            .execute(Select(By::<Option<Image>, _>::new(image_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ImageNotExists(image_id))
            .map_err(tracerr::wrap!())?;
        if image.owner != image::Owner::Property(property_id) {
            return Err(tracerr::new!(E::ImageNotOfProperty(image_id)));
        }

        property.cover_image_id = Some(image_id);
        property.modified_at = DateTime::now().coerce();

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(property)
    }
}

/// Error of [`SetCoverImage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Image`] with the provided ID does not exist.
    #[display("`Image(id: {_0})` does not exist")]
    ImageNotExists(#[error(not(source))] image::Id),

    /// [`Image`] does not belong to the [`Property`].
    #[display("`Image(id: {_0})` does not belong to the `Property`")]
    #[from(ignore)]
    ImageNotOfProperty(#[error(not(source))] image::Id),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),
}
