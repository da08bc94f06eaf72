//! The typed seam over the backend's CRUD endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use pgs_model::{LayerId, RemoteError};

/// Result type alias for remote calls.
pub type ApiResult<T> = Result<T, RemoteError>;

/// Body of `POST /polygon/create`. The server assigns the id, so the
/// request carries none; the geometry field is named `geojson` by the
/// backend even though it carries WKT text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePolygonRequest {
    pub title: String,
    pub description: String,
    pub geojson: String,
    pub layer_id: u64,
}

/// Body of `POST /polygon/update`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatePolygonRequest {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub geom: String,
    pub layer_id: u64,
}

/// One record of the list endpoints; `geom` is well-known-text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PolygonRecord {
    pub id: u64,
    pub geom: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub layer_id: Option<u64>,
}

/// One entry of `GET /layers`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayerRecord {
    pub id: u64,
    pub title: String,
    pub editable: bool,
}

/// The backend's CRUD surface.
///
/// The engine only ever talks to this trait; [`crate::HttpApi`] is the
/// production implementation and tests substitute recording fakes. No
/// call is retried and none can be cancelled once dispatched.
#[async_trait]
pub trait PolygonApi: Send + Sync {
    async fn create_polygon(&self, request: CreatePolygonRequest) -> ApiResult<PolygonRecord>;

    async fn update_polygon(&self, request: UpdatePolygonRequest) -> ApiResult<PolygonRecord>;

    /// Delete by server id; the response carries status only.
    async fn delete_polygon(&self, id: u64) -> ApiResult<()>;

    /// Every persisted feature, for the general editable-data view.
    async fn list_polygons(&self) -> ApiResult<Vec<PolygonRecord>>;

    async fn polygons_by_layer(&self, layer_id: LayerId) -> ApiResult<Vec<PolygonRecord>>;

    async fn layer_catalog(&self) -> ApiResult<Vec<LayerRecord>>;

    /// Raw GeoJSON text of the static display-only dataset.
    async fn read_only_dataset(&self) -> ApiResult<String>;
}
