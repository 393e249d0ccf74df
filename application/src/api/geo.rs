//! Geographic catalog handlers and representations.

use axum::{extract::Path, Json};
use serde::Serialize;
use service::{domain, query, Query as _};

use crate::{AsError, Context, Error};

/// Representation of a [`domain::geo::Country`].
#[derive(Debug, Serialize)]
pub struct Country {
    /// ID of the [`domain::geo::Country`].
    pub id: domain::geo::country::Id,

    /// Name of the [`domain::geo::Country`].
    pub name: String,
}

impl From<domain::geo::Country> for Country {
    fn from(country: domain::geo::Country) -> Self {
        Self {
            id: country.id,
            name: country.name.to_string(),
        }
    }
}

/// Representation of a [`domain::geo::Province`].
#[derive(Debug, Serialize)]
pub struct Province {
    /// ID of the [`domain::geo::Province`].
    pub id: domain::geo::province::Id,

    /// ID of the [`domain::geo::Country`] the province belongs to.
    pub country_id: domain::geo::country::Id,

    /// Name of the [`domain::geo::Province`].
    pub name: String,
}

impl From<domain::geo::Province> for Province {
    fn from(province: domain::geo::Province) -> Self {
        Self {
            id: province.id,
            country_id: province.country_id,
            name: province.name.to_string(),
        }
    }
}

/// Representation of a [`domain::geo::Locality`].
#[derive(Debug, Serialize)]
pub struct Locality {
    /// ID of the [`domain::geo::Locality`].
    pub id: domain::geo::locality::Id,

    /// ID of the [`domain::geo::Province`] the locality belongs to.
    pub province_id: domain::geo::province::Id,

    /// Name of the [`domain::geo::Locality`].
    pub name: String,
}

impl From<domain::geo::Locality> for Locality {
    fn from(locality: domain::geo::Locality) -> Self {
        Self {
            id: locality.id,
            province_id: locality.province_id,
            name: locality.name.to_string(),
        }
    }
}

/// Handles the `GET /api/geo/countries` request.
pub async fn countries(ctx: Context) -> Result<Json<Vec<Country>>, Error> {
    ctx.service()
        .execute(query::geo::Countries::by(()))
        .await
        .map(|countries| Json(countries.into_iter().map(Into::into).collect()))
        .map_err(AsError::into_error)
}

/// Handles the `GET /api/geo/countries/:id/provinces` request.
pub async fn provinces(
    ctx: Context,
    Path(id): Path<domain::geo::country::Id>,
) -> Result<Json<Vec<Province>>, Error> {
    ctx.service()
        .execute(query::geo::Provinces::by(id))
        .await
        .map(|provinces| Json(provinces.into_iter().map(Into::into).collect()))
        .map_err(AsError::into_error)
}

/// Handles the `GET /api/geo/provinces/:id/localities` request.
pub async fn localities(
    ctx: Context,
    Path(id): Path<domain::geo::province::Id>,
) -> Result<Json<Vec<Locality>>, Error> {
    ctx.service()
        .execute(query::geo::Localities::by(id))
        .await
        .map(|localities| {
            Json(localities.into_iter().map(Into::into).collect())
        })
        .map_err(AsError::into_error)
}
