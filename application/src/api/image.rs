//! [`Image`]-related handlers and representations.
//!
//! [`Image`]: domain::Image

use axum::{
    extract::{Multipart, Path, Query},
    http::StatusCode,
    Json,
};
use common::DateTime;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, image},
    query,
    Query as _,
};
use uuid::Uuid;

use crate::{define_error, AsError, Context, Error};

use super::{parse, NotFoundError};

/// Representation of a [`domain::Image`].
///
/// The binary content is served statically under `/media/{path}`.
#[derive(Debug, Serialize)]
pub struct Image {
    /// ID of the [`domain::Image`].
    pub id: image::Id,

    /// Kind of the owner the [`domain::Image`] is attached to.
    pub owner_kind: image::OwnerKind,

    /// ID of the owner the [`domain::Image`] is attached to.
    pub owner_id: Uuid,

    /// Role of the [`domain::Image`] within its owner's gallery.
    pub role: image::Role,

    /// Relative path of the [`domain::Image`] in the file store.
    pub path: String,

    /// Media type of the [`domain::Image`]'s content.
    pub content_type: String,

    /// [`DateTime`] when the [`domain::Image`] was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,
}

impl From<domain::Image> for Image {
    fn from(img: domain::Image) -> Self {
        Self {
            id: img.id,
            owner_kind: img.owner.kind(),
            owner_id: img.owner.uuid(),
            role: img.role,
            path: img.path.to_string(),
            content_type: img.content_type.to_string(),
            created_at: img.created_at.coerce(),
        }
    }
}

/// Handles the `POST /api/images` request.
///
/// Expects a `multipart/form-data` body carrying `owner_kind`, `owner_id`,
/// `role` and `file` fields.
pub async fn upload(
    ctx: Context,
    mut multipart: Multipart,
) -> Result<Json<Image>, Error> {
    let mut owner_kind = None;
    let mut owner_id = None;
    let mut role = None;
    let mut content_type = None;
    let mut content = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(AsError::into_error)?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("owner_kind") => {
                let text =
                    field.text().await.map_err(AsError::into_error)?;
                owner_kind = Some(parse::<image::OwnerKind>(&text)?);
            }
            Some("owner_id") => {
                let text =
                    field.text().await.map_err(AsError::into_error)?;
                owner_id = Some(parse::<Uuid>(&text)?);
            }
            Some("role") => {
                let text =
                    field.text().await.map_err(AsError::into_error)?;
                role = Some(parse::<image::Role>(&text)?);
            }
            Some("file") => {
                content_type = Some(
                    field
                        .content_type()
                        .ok_or(UploadError::MissingField)
                        .and_then(|mime| {
                            mime.parse::<image::ContentType>()
                                .map_err(|_| UploadError::UnsupportedMedia)
                        })?,
                );
                content = Some(
                    field.bytes().await.map_err(AsError::into_error)?.to_vec(),
                );
            }
            Some(_) | None => {}
        }
    }

    let (Some(owner_kind), Some(owner_id), Some(role)) =
        (owner_kind, owner_id, role)
    else {
        return Err(UploadError::MissingField.into());
    };
    let (Some(content_type), Some(content)) = (content_type, content) else {
        return Err(UploadError::MissingField.into());
    };

    ctx.service()
        .execute(command::StoreImage {
            owner: image::Owner::from_parts(owner_kind, owner_id),
            role,
            content_type,
            content,
        })
        .await
        .map(|img| Json(img.into()))
        .map_err(AsError::into_error)
}

/// Handles the `GET /api/images/:id` request.
pub async fn by_id(
    ctx: Context,
    Path(id): Path<image::Id>,
) -> Result<Json<Image>, Error> {
    ctx.service()
        .execute(query::image::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .map(|img| Json(img.into()))
        .ok_or_else(|| NotFoundError::Image.into())
}

/// Query parameters of the `GET /api/images` handler.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct OwnerQuery {
    /// Kind of the owner to list the [`Image`]s of.
    pub owner_kind: image::OwnerKind,

    /// ID of the owner to list the [`Image`]s of.
    pub owner_id: Uuid,
}

/// Handles the `GET /api/images` request.
pub async fn by_owner(
    ctx: Context,
    Query(q): Query<OwnerQuery>,
) -> Result<Json<Vec<Image>>, Error> {
    let owner = image::Owner::from_parts(q.owner_kind, q.owner_id);

    ctx.service()
        .execute(query::image::ByOwner::by(owner))
        .await
        .map(|images| Json(images.into_iter().map(Into::into).collect()))
        .map_err(AsError::into_error)
}

/// Handles the `DELETE /api/images/:id` request.
pub async fn delete(
    ctx: Context,
    Path(id): Path<image::Id>,
) -> Result<StatusCode, Error> {
    ctx.service()
        .execute(command::DeleteImage { image_id: id })
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(AsError::into_error)
}

impl AsError for command::store_image::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Storage(_) => None,
            Self::AgentNotExists(_) => Some(NotFoundError::Agent.into()),
            Self::PropertyNotExists(_) => Some(NotFoundError::Property.into()),
            Self::RoleMismatch(_) => Some(Error {
                code: "ROLE_MISMATCH",
                status_code: http::StatusCode::BAD_REQUEST,
                backtrace: None,
                message: self.to_string(),
            }),
        }
    }
}

impl AsError for command::delete_image::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Storage(_) => None,
            Self::ImageNotExists(_) => Some(NotFoundError::Image.into()),
        }
    }
}

define_error! {
    enum UploadError {
        #[code = "MISSING_UPLOAD_FIELD"]
        #[status = BAD_REQUEST]
        #[message = "Upload must carry `owner_kind`, `owner_id`, `role` and \
                     `file` fields"]
        MissingField,

        #[code = "UNSUPPORTED_MEDIA_TYPE"]
        #[status = UNSUPPORTED_MEDIA_TYPE]
        #[message = "Only JPEG, PNG, WebP and GIF images are accepted"]
        UnsupportedMedia,
    }
}
