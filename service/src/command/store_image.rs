//! [`Command`] for storing a new [`Image`].

use common::{
    operations::{By, Commit, Insert, Perform, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::image::{ContentType, Owner, Role};
use crate::{
    domain::{agent, image, property, Agent, Image, Property},
    infra::{database, storage, Database},
    Service,
};

use super::Command;

/// [`Command`] for storing a new [`Image`].
///
/// Writes the content to the file store and records the [`Image`] row.
#[derive(Clone, Debug)]
pub struct StoreImage {
    /// [`Owner`] the new [`Image`] is attached to.
    pub owner: image::Owner,

    /// [`Role`] of the new [`Image`].
    pub role: image::Role,

    /// [`ContentType`] of the new [`Image`].
    pub content_type: image::ContentType,

    /// Binary content of the new [`Image`].
    pub content: Vec<u8>,
}

impl StoreImage {
    /// Returns the file extension matching the provided [`ContentType`].
    fn extension(content_type: &image::ContentType) -> &'static str {
        match AsRef::<str>::as_ref(content_type) {
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "jpg",
        }
    }
}

impl<Db> Command<StoreImage> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Agent>, agent::Id>>,
            Ok = Option<Agent>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Image>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Image;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: StoreImage) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let StoreImage {
            owner,
            role,
            content_type,
            content,
        } = cmd;

        let prefix = match owner {
            image::Owner::Property(property_id) => {
                if role == image::Role::Portrait {
                    return Err(tracerr::new!(E::RoleMismatch(role)));
                }
                self.database()
                    .execute(Select(By::<Option<Property>, _>::new(
                        property_id,
                    )))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or(E::PropertyNotExists(property_id))
                    .map_err(tracerr::wrap!())
                    .map(drop)?;
                "properties"
            }
            image::Owner::Agent(agent_id) => {
                if role != image::Role::Portrait {
                    return Err(tracerr::new!(E::RoleMismatch(role)));
                }
                self.database()
                    .execute(Select(By::<Option<Agent>, _>::new(agent_id)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or(E::AgentNotExists(agent_id))
                    .map_err(tracerr::wrap!())
                    .map(drop)?;
                "agents"
            }
        };

        let id = image::Id::new();
        // SAFETY: The generated path is relative and contains no traversal.
        #[expect(unsafe_code, reason = "invariants are preserved")]
        let path = unsafe {
            image::Path::new_unchecked(format!(
                "{prefix}/{owner_id}/{id}.{ext}",
                owner_id = owner.uuid(),
                ext = StoreImage::extension(&content_type),
            ))
        };

        self.storage()
            .execute(Perform(storage::Store {
                path: path.clone(),
                content,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let image = Image {
            id,
            owner,
            role,
            path,
            content_type,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(image.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(image)
    }
}

/// Error of [`StoreImage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// File store error.
    #[display("`FileStore` operation failed: {_0}")]
    Storage(storage::Error),

    /// [`Agent`] with the provided ID does not exist.
    #[display("`Agent(id: {_0})` does not exist")]
    #[from(ignore)]
    AgentNotExists(#[error(not(source))] agent::Id),

    /// [`Property`] with the provided ID does not exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),

    /// [`Role`] does not fit the [`Owner`] kind.
    #[display("`{_0}` role does not fit the owner")]
    #[from(ignore)]
    RoleMismatch(#[error(not(source))] image::Role),
}
