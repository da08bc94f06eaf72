//! Data model for Polygon Studio.
//!
//! This crate defines the domain vocabulary shared by the editor engine
//! and the remote synchronization layer:
//!
//! - [`FeatureId`]: explicit draft/persisted identity for a feature
//! - [`Feature`]: an editable polygon with optional custom properties
//! - [`Layer`]: a named feature grouping with an editable flag
//! - [`wkt`]: the well-known-text codec used on the wire
//! - [`RemoteError`]: the failure taxonomy for all remote calls

pub mod error;
pub mod feature;
pub mod layer;
pub mod wkt;

pub use error::{ModelError, RemoteError, Result};
pub use feature::{Feature, FeatureId, FeatureProperties, Tooltip};
pub use layer::{Layer, LayerId};
