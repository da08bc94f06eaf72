//! Messages and effects of the update channel.
//!
//! All collaborator interactions reach the editor as [`Message`] values:
//! user intents (draw, select, edit, delete, save) and completions of
//! network work. The editor answers with [`Effect`] values describing the
//! network work it wants performed; the remote layer executes them and
//! feeds the corresponding completion messages back in.

use std::collections::BTreeSet;
use std::sync::Arc;

use geo_types::Point;
use thiserror::Error;

use pgs_model::{Feature, FeatureId, Layer, LayerId, RemoteError};

use crate::state::FeatureList;

/// A dispatched intent or completion.
#[derive(Debug, Clone)]
pub enum Message {
    // -------------------------------------------------------------------
    // User intents
    // -------------------------------------------------------------------
    /// The drawing collaborator finished a polygon.
    DrawCompleted(Feature),

    /// The user chose which editable layers to work on.
    SetEditableLayers(BTreeSet<LayerId>),

    /// Title/description/layer assignment for one feature.
    UpdateFeature {
        id: FeatureId,
        title: String,
        description: String,
        layer_id: LayerId,
    },

    /// Mark one feature for deletion.
    DeleteFeature(FeatureId),

    /// Move pointer focus, or clear it with `None`.
    SelectFeature(Option<FeatureId>),

    /// A click on the map surface, in world and screen coordinates.
    MapClicked {
        point: Point<f64>,
        screen_position: (f64, f64),
    },

    /// Load every persisted feature (general editable-data view).
    LoadAllFeatures,

    /// Load the layer catalog.
    LoadLayerCatalog,

    /// Persist all local edits to the remote service.
    SaveRequested,

    // -------------------------------------------------------------------
    // Completions fed back by the remote layer
    // -------------------------------------------------------------------
    LayerFeaturesFetched {
        layer_id: LayerId,
        result: Result<Vec<Feature>, RemoteError>,
    },
    AllFeaturesFetched(Result<Vec<Feature>, RemoteError>),
    LayerCatalogFetched(Result<Vec<Layer>, RemoteError>),
    SaveCompleted(Result<SaveReport, SaveFailure>),
}

impl Message {
    /// Stable action name for structured logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DrawCompleted(_) => "draw_completed",
            Self::SetEditableLayers(_) => "set_editable_layers",
            Self::UpdateFeature { .. } => "update_feature",
            Self::DeleteFeature(_) => "delete_feature",
            Self::SelectFeature(_) => "select_feature",
            Self::MapClicked { .. } => "map_clicked",
            Self::LoadAllFeatures => "load_all_features",
            Self::LoadLayerCatalog => "load_layer_catalog",
            Self::SaveRequested => "save_requested",
            Self::LayerFeaturesFetched { .. } => "layer_features_fetched",
            Self::AllFeaturesFetched(_) => "all_features_fetched",
            Self::LayerCatalogFetched(_) => "layer_catalog_fetched",
            Self::SaveCompleted(_) => "save_completed",
        }
    }
}

/// Network work requested by the editor.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Fetch one layer's features; emitted only for layers not yet loaded.
    FetchLayerFeatures(LayerId),
    FetchAllFeatures,
    FetchLayerCatalog,
    /// Run one save cycle over the captured snapshot.
    Save {
        features: FeatureList,
        deleted_ids: Arc<BTreeSet<FeatureId>>,
    },
}

/// Call counts of a fully successful save cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveReport {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl SaveReport {
    /// Total number of calls the cycle dispatched.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.created + self.updated + self.deleted
    }
}

/// Aggregated failures of a save cycle.
///
/// Failures are not attributed to individual features; the cycle either
/// confirms as a whole or reports how many of its calls failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} of {attempted} save calls failed", .failures.len())]
pub struct SaveFailure {
    /// Number of calls the cycle dispatched.
    pub attempted: usize,
    pub failures: Vec<RemoteError>,
}
