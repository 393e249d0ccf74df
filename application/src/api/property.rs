//! [`Property`]-related handlers and representations.
//!
//! [`Property`]: domain::Property

use axum::{
    extract::{Path, Query},
    Json,
};
use common::{Amount, DateTime};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain, query, read,
    Query as _,
};

use crate::{AsError, Context, Error};

use super::{parse, NotFoundError, PageQuery};

/// Representation of a [`domain::Property`].
#[derive(Debug, Serialize)]
pub struct Property {
    /// ID of the [`domain::Property`].
    pub id: domain::property::Id,

    /// Name of the [`domain::Property`].
    pub name: String,

    /// Kind of the [`domain::Property`].
    pub kind: domain::property::Kind,

    /// Commercial operation of the [`domain::Property`].
    pub operation: domain::property::Operation,

    /// Status of the [`domain::Property`].
    pub status: domain::property::Status,

    /// Sale price of the [`domain::Property`].
    pub sale_price: Option<Amount>,

    /// Monthly rent price of the [`domain::Property`].
    pub rent_price: Option<Amount>,

    /// ID of the owning [`domain::Client`].
    pub owner_id: domain::client::Id,

    /// ID of the managing [`domain::Agent`].
    pub agent_id: Option<domain::agent::Id>,

    /// ID of the [`domain::Address`].
    pub address_id: Option<domain::address::Id>,

    /// ID of the cover [`domain::Image`].
    pub cover_image_id: Option<domain::image::Id>,

    /// Description of the [`domain::Property`].
    pub description: Option<String>,

    /// Physical features of the [`domain::Property`].
    pub features: Features,

    /// [`DateTime`] when the [`domain::Property`] was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,

    /// [`DateTime`] when the [`domain::Property`] was last modified.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub modified_at: DateTime,
}

impl From<domain::Property> for Property {
    fn from(property: domain::Property) -> Self {
        Self {
            id: property.id,
            name: property.name.to_string(),
            kind: property.kind,
            operation: property.operation,
            status: property.status,
            sale_price: property.sale_price,
            rent_price: property.rent_price,
            owner_id: property.owner_id,
            agent_id: property.agent_id,
            address_id: property.address_id,
            cover_image_id: property.cover_image_id,
            description: property.description.map(|d| d.to_string()),
            features: property.features.into(),
            created_at: property.created_at.coerce(),
            modified_at: property.modified_at.coerce(),
        }
    }
}

/// Physical features of a [`Property`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Features {
    /// Year the [`Property`] was built in.
    pub year_built: Option<u16>,

    /// Number of bathrooms.
    pub bathrooms: Option<u16>,

    /// Number of bedrooms.
    pub bedrooms: Option<u16>,

    /// Total number of rooms.
    pub rooms: Option<u16>,

    /// Number of garages.
    pub garages: Option<u16>,

    /// Indicator whether the [`Property`] is furnished.
    pub furnished: Option<bool>,

    /// Covered surface, in square meters.
    pub covered_surface: Option<u32>,

    /// Uncovered surface, in square meters.
    pub uncovered_surface: Option<u32>,

    /// Total surface, in square meters.
    pub total_surface: Option<u32>,
}

impl From<domain::property::Features> for Features {
    fn from(features: domain::property::Features) -> Self {
        Self {
            year_built: features.year_built,
            bathrooms: features.bathrooms,
            bedrooms: features.bedrooms,
            rooms: features.rooms,
            garages: features.garages,
            furnished: features.furnished,
            covered_surface: features.covered_surface,
            uncovered_surface: features.uncovered_surface,
            total_surface: features.total_surface,
        }
    }
}

impl From<Features> for domain::property::Features {
    fn from(features: Features) -> Self {
        Self {
            year_built: features.year_built,
            bathrooms: features.bathrooms,
            bedrooms: features.bedrooms,
            rooms: features.rooms,
            garages: features.garages,
            furnished: features.furnished,
            covered_surface: features.covered_surface,
            uncovered_surface: features.uncovered_surface,
            total_surface: features.total_surface,
        }
    }
}

/// Request body of the `POST /api/properties` handler.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// Name of the new [`Property`].
    pub name: String,

    /// Kind of the new [`Property`].
    pub kind: domain::property::Kind,

    /// Commercial operation of the new [`Property`].
    pub operation: domain::property::Operation,

    /// Status of the new [`Property`].
    pub status: domain::property::Status,

    /// Sale price of the new [`Property`].
    pub sale_price: Option<Amount>,

    /// Monthly rent price of the new [`Property`].
    pub rent_price: Option<Amount>,

    /// ID of the owning [`domain::Client`].
    pub owner_id: domain::client::Id,

    /// ID of the managing [`domain::Agent`].
    pub agent_id: Option<domain::agent::Id>,

    /// ID of the [`domain::Address`].
    pub address_id: Option<domain::address::Id>,

    /// Description of the new [`Property`].
    pub description: Option<String>,

    /// Physical features of the new [`Property`].
    #[serde(default)]
    pub features: Features,
}

/// Handles the `POST /api/properties` request.
pub async fn create(
    ctx: Context,
    Json(req): Json<CreateRequest>,
) -> Result<Json<Property>, Error> {
    let CreateRequest {
        name,
        kind,
        operation,
        status,
        sale_price,
        rent_price,
        owner_id,
        agent_id,
        address_id,
        description,
        features,
    } = req;

    ctx.service()
        .execute(command::CreateProperty {
            name: parse(&name)?,
            kind,
            operation,
            status,
            sale_price,
            rent_price,
            owner_id,
            agent_id,
            address_id,
            description: description.as_deref().map(parse).transpose()?,
            features: features.into(),
        })
        .await
        .map(|property| Json(property.into()))
        .map_err(AsError::into_error)
}

/// Handles the `GET /api/properties/:id` request.
pub async fn by_id(
    ctx: Context,
    Path(id): Path<domain::property::Id>,
) -> Result<Json<Property>, Error> {
    ctx.service()
        .execute(query::property::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .map(|property| Json(property.into()))
        .ok_or_else(|| NotFoundError::Property.into())
}

/// Query parameters of the `GET /api/properties` handler.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ListQuery {
    /// [`domain::property::Status`] to filter by.
    pub status: Option<domain::property::Status>,

    /// [`domain::property::Operation`] to filter by.
    pub operation: Option<domain::property::Operation>,

    /// Number of leading items to skip.
    pub skip: Option<u64>,

    /// Maximum number of items to return.
    pub limit: Option<u64>,
}

/// Handles the `GET /api/properties` request.
pub async fn list(
    ctx: Context,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Property>>, Error> {
    let ListQuery {
        status,
        operation,
        skip,
        limit,
    } = q;

    let selector = read::property::list::Selector {
        arguments: PageQuery { skip, limit }.arguments()?,
        filter: read::property::list::Filter { status, operation },
    };

    ctx.service()
        .execute(query::property::List::by(selector))
        .await
        .map(|properties| {
            Json(properties.into_iter().map(Into::into).collect())
        })
        .map_err(AsError::into_error)
}

/// Request body of the `PUT /api/properties/:id` handler.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// New name, if supplied.
    pub name: Option<String>,

    /// New kind, if supplied.
    pub kind: Option<domain::property::Kind>,

    /// New commercial operation, if supplied.
    pub operation: Option<domain::property::Operation>,

    /// New status, if supplied.
    pub status: Option<domain::property::Status>,

    /// New sale price, if supplied.
    pub sale_price: Option<Amount>,

    /// New monthly rent price, if supplied.
    pub rent_price: Option<Amount>,

    /// New managing [`domain::Agent`] ID, if supplied.
    pub agent_id: Option<domain::agent::Id>,

    /// New [`domain::Address`] ID, if supplied.
    pub address_id: Option<domain::address::Id>,

    /// New description, if supplied.
    pub description: Option<String>,

    /// New physical features, if supplied. Replaces the whole set.
    pub features: Option<Features>,
}

/// Handles the `PUT /api/properties/:id` request.
pub async fn update(
    ctx: Context,
    Path(id): Path<domain::property::Id>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<Property>, Error> {
    let UpdateRequest {
        name,
        kind,
        operation,
        status,
        sale_price,
        rent_price,
        agent_id,
        address_id,
        description,
        features,
    } = req;

    ctx.service()
        .execute(command::UpdateProperty {
            property_id: id,
            name: name.as_deref().map(parse).transpose()?,
            kind,
            operation,
            status,
            sale_price,
            rent_price,
            agent_id,
            address_id,
            description: description.as_deref().map(parse).transpose()?,
            features: features.map(Into::into),
        })
        .await
        .map(|property| Json(property.into()))
        .map_err(AsError::into_error)
}

/// Request body of the `POST /api/properties/:id/cover` handler.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct SetCoverRequest {
    /// ID of the [`domain::Image`] to use as the cover.
    pub image_id: domain::image::Id,
}

/// Handles the `POST /api/properties/:id/cover` request.
pub async fn set_cover(
    ctx: Context,
    Path(id): Path<domain::property::Id>,
    Json(req): Json<SetCoverRequest>,
) -> Result<Json<Property>, Error> {
    ctx.service()
        .execute(command::SetCoverImage {
            property_id: id,
            image_id: req.image_id,
        })
        .await
        .map(|property| Json(property.into()))
        .map_err(AsError::into_error)
}

impl AsError for command::create_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::AddressNotExists(_) => Some(NotFoundError::Address.into()),
            Self::AgentNotExists(_) => Some(NotFoundError::Agent.into()),
            Self::OwnerNotExists(_) => Some(NotFoundError::Client.into()),
        }
    }
}

impl AsError for command::update_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::AddressNotExists(_) => Some(NotFoundError::Address.into()),
            Self::AgentNotExists(_) => Some(NotFoundError::Agent.into()),
            Self::PropertyNotExists(_) => Some(NotFoundError::Property.into()),
        }
    }
}

impl AsError for command::set_cover_image::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ImageNotExists(_) => Some(NotFoundError::Image.into()),
            Self::ImageNotOfProperty(_) => Some(Error {
                code: "IMAGE_NOT_OF_PROPERTY",
                status_code: http::StatusCode::BAD_REQUEST,
                backtrace: None,
                message: self.to_string(),
            }),
            Self::PropertyNotExists(_) => Some(NotFoundError::Property.into()),
        }
    }
}
