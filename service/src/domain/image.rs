//! [`Image`] definitions.

use std::str::FromStr as _;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Agent, Property};
use crate::domain::{agent, property};

/// Image attached to a [`Property`] or an [`Agent`].
///
/// The binary content lives in the file store, while this record keeps the
/// relative [`Path`] it was stored under.
#[derive(Clone, Debug)]
pub struct Image {
    /// ID of this [`Image`].
    pub id: Id,

    /// [`Owner`] this [`Image`] is attached to.
    pub owner: Owner,

    /// [`Role`] of this [`Image`].
    pub role: Role,

    /// [`Path`] of this [`Image`] in the file store.
    pub path: Path,

    /// [`ContentType`] of this [`Image`].
    pub content_type: ContentType,

    /// [`DateTime`] when this [`Image`] was created.
    pub created_at: CreationDateTime,
}

/// ID of an [`Image`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Owner an [`Image`] is attached to.
#[derive(Clone, Copy, Debug, Eq, From, PartialEq)]
pub enum Owner {
    /// [`Image`] of a [`Property`].
    Property(property::Id),

    /// [`Image`] of an [`Agent`].
    Agent(agent::Id),
}

impl Owner {
    /// Returns [`OwnerKind`] of this [`Owner`].
    #[must_use]
    pub fn kind(&self) -> OwnerKind {
        match self {
            Self::Property(_) => OwnerKind::Property,
            Self::Agent(_) => OwnerKind::Agent,
        }
    }

    /// Returns the owner ID as a raw [`Uuid`].
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        match self {
            Self::Property(id) => (*id).into(),
            Self::Agent(id) => (*id).into(),
        }
    }

    /// Reassembles an [`Owner`] from its [`OwnerKind`] and raw [`Uuid`].
    #[must_use]
    pub fn from_parts(kind: OwnerKind, id: Uuid) -> Self {
        match kind {
            OwnerKind::Property => Self::Property(id.into()),
            OwnerKind::Agent => Self::Agent(id.into()),
        }
    }
}

define_kind! {
    #[doc = "Kind of an [`Image`]'s [`Owner`]."]
    enum OwnerKind {
        #[doc = "Owned by a [`Property`]."]
        Property = 1,

        #[doc = "Owned by an [`Agent`]."]
        Agent = 2,
    }
}

define_kind! {
    #[doc = "Role of an [`Image`] within its [`Owner`]'s gallery."]
    enum Role {
        #[doc = "Cover image of a [`Property`]."]
        Cover = 1,

        #[doc = "Regular gallery image."]
        Gallery = 2,

        #[doc = "Portrait of an [`Agent`]."]
        Portrait = 3,
    }
}

/// Relative path of an [`Image`] in the file store.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Path(String);

impl Path {
    /// Creates a new [`Path`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `path` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Creates a new [`Path`] if the given `path` is valid.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Option<Self> {
        let path = path.into();
        Self::check(&path).then_some(Self(path))
    }

    /// Checks whether the given `path` is a valid [`Path`]:
    /// - Must be relative;
    /// - Must not traverse upwards;
    /// - Must not contain a NUL byte.
    fn check(path: impl AsRef<str>) -> bool {
        let path = path.as_ref();
        !path.is_empty()
            && path.len() <= 512
            && !path.starts_with('/')
            && !path.contains('\0')
            && !std::path::Path::new(path)
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
    }
}

impl FromStr for Path {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Path`")
    }
}

/// Media type of an [`Image`]'s content.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct ContentType(String);

impl ContentType {
    /// Creates a new [`ContentType`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `mime` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(mime: impl Into<String>) -> Self {
        Self(mime.into())
    }

    /// Creates a new [`ContentType`] if the given `mime` is a supported image
    /// media type.
    #[must_use]
    pub fn new(mime: impl Into<String>) -> Option<Self> {
        let mime = mime.into();
        Self::check(&mime).then_some(Self(mime))
    }

    /// Checks whether the given `mime` is a supported image media type.
    fn check(mime: impl AsRef<str>) -> bool {
        matches!(
            mime.as_ref(),
            "image/jpeg" | "image/png" | "image/webp" | "image/gif",
        )
    }
}

impl FromStr for ContentType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ContentType`")
    }
}

/// [`DateTime`] when an [`Image`] was created.
pub type CreationDateTime = DateTimeOf<(Image, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{ContentType, Path};

    #[test]
    fn path_rejects_traversal() {
        assert!(Path::new("properties/42/cover.jpg").is_some());
        assert!(Path::new("/etc/passwd").is_none());
        assert!(Path::new("../secrets.jpg").is_none());
        assert!(Path::new("a/../../b.jpg").is_none());
    }

    #[test]
    fn content_type_allows_images_only() {
        assert!(ContentType::new("image/jpeg").is_some());
        assert!(ContentType::new("image/png").is_some());
        assert!(ContentType::new("text/html").is_none());
        assert!(ContentType::new("application/pdf").is_none());
    }
}
