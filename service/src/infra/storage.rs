//! Filesystem storage of uploaded images.

use std::{io, path::PathBuf};

use common::operations::Perform;
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use crate::domain::image;
#[cfg(doc)]
use crate::domain::Image;

/// Storage keeping [`Image`] contents on the local filesystem.
///
/// Rows in the database keep [`image::Path`]s relative to the configured
/// root directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    /// Root directory all the stored files live under.
    root: PathBuf,
}

impl FileStore {
    /// Creates a new [`FileStore`] rooted at the provided directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the provided [`image::Path`] against the root directory.
    fn resolve(&self, path: &image::Path) -> PathBuf {
        self.root.join(AsRef::<str>::as_ref(path))
    }
}

/// Operation of storing a file in a [`FileStore`].
#[derive(Clone, Debug)]
pub struct Store {
    /// [`image::Path`] to store the file under.
    pub path: image::Path,

    /// Content of the file.
    pub content: Vec<u8>,
}

/// Operation of removing a file from a [`FileStore`].
#[derive(Clone, Debug)]
pub struct Remove {
    /// [`image::Path`] of the file to remove.
    pub path: image::Path,
}

impl common::Handler<Perform<Store>> for FileStore {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Perform(store): Perform<Store>,
    ) -> Result<Self::Ok, Self::Err> {
        let target = self.resolve(&store.path);
        if let Some(dir) = target.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(tracerr::from_and_wrap!(=> Error))?;
        }
        tokio::fs::write(&target, &store.content)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

impl common::Handler<Perform<Remove>> for FileStore {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Perform(remove): Perform<Remove>,
    ) -> Result<Self::Ok, Self::Err> {
        match tokio::fs::remove_file(self.resolve(&remove.path)).await {
            Ok(()) => Ok(()),
            // Removing a file that is gone already is not an error: the
            // database row is the source of truth.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(tracerr::new!(Error::from(e))),
        }
    }
}

/// Error of a [`FileStore`] operation.
#[derive(Debug, Display, StdError, From)]
pub enum Error {
    /// Filesystem I/O failure.
    #[display("Filesystem operation failed: {_0}")]
    Io(io::Error),
}
