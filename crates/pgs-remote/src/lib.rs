//! Remote persistence layer for Polygon Studio.
//!
//! Talks JSON over HTTP to the polygon backend and bridges it to the
//! editor's update channel:
//!
//! - [`PolygonApi`]: the typed seam over the backend's CRUD endpoints,
//!   implemented for production by [`HttpApi`] and by recording fakes in
//!   tests
//! - [`loader`]: fetch completions (features per layer, the full editable
//!   dataset, the layer catalog, the display-only read-only dataset)
//! - [`sync`]: the fan-out/join-all save cycle
//! - [`Session`]: the serialized driver that owns the editor and feeds
//!   effect completions back through one channel

pub mod api;
pub mod config;
pub mod http;
pub mod loader;
pub mod session;
pub mod sync;

pub use api::{
    ApiResult, CreatePolygonRequest, LayerRecord, PolygonApi, PolygonRecord,
    UpdatePolygonRequest,
};
pub use config::RemoteConfig;
pub use http::HttpApi;
pub use loader::ReadOnlyDataset;
pub use session::Session;
