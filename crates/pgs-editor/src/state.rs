//! The editor state tree.
//!
//! `EditorState` is a cheaply clonable snapshot: every collection hangs
//! off an `Arc`, and mutations go through `Arc::make_mut` so only the
//! touched branch is copied. A snapshot handed to a collaborator is never
//! mutated afterwards.

use std::collections::BTreeSet;
use std::sync::Arc;

use pgs_model::{Feature, FeatureId, Layer, LayerId, RemoteError, Tooltip};

use crate::message::{SaveFailure, SaveReport};

/// Shared, ordered feature sequence.
pub type FeatureList = Arc<Vec<Arc<Feature>>>;

/// The feature currently under pointer focus, referenced weakly by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub feature_id: FeatureId,
    /// Contextual editor popup, set by click containment tracking.
    pub tooltip: Option<Tooltip>,
}

impl Selection {
    #[must_use]
    pub fn new(feature_id: FeatureId) -> Self {
        Self {
            feature_id,
            tooltip: None,
        }
    }
}

/// Outcome of the most recent save cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SyncStatus {
    #[default]
    Idle,
    /// A save cycle has been dispatched and not yet settled.
    Saving,
    /// Every call of the last cycle succeeded.
    Saved(SaveReport),
    /// At least one call of the last cycle failed; local edits retained.
    Failed(SaveFailure),
}

/// Root of the editable-feature state.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    /// Every feature ever fetched or drawn, in fetch/draw order.
    /// Append-only except at save reconciliation.
    pub loaded_features: FeatureList,
    /// Layers whose features have been fetched; the only fetch
    /// de-duplication guarantee.
    pub loaded_layers: Arc<BTreeSet<LayerId>>,
    /// The active subset visible for editing, recomputed by the
    /// visibility filter.
    pub features: FeatureList,
    /// Currently selected editable layers.
    pub selected_layers: Arc<BTreeSet<LayerId>>,
    /// Layer catalog, replaced wholesale by metadata fetches.
    pub layers: Arc<Vec<Layer>>,
    /// Ids marked for deletion, purged when a save cycle completes.
    pub deleted_ids: Arc<BTreeSet<FeatureId>>,
    pub selection: Option<Selection>,
    /// True while a freshly drawn feature awaits its first property save.
    pub new_feature_modal: bool,
    /// A fetch is in flight.
    pub loading: bool,
    /// Most recent fetch failure, for collaborator display.
    pub last_error: Option<RemoteError>,
    pub sync: SyncStatus,
}

impl EditorState {
    /// Resolve a weak by-id reference against the loaded set.
    #[must_use]
    pub fn find_feature(&self, id: FeatureId) -> Option<&Arc<Feature>> {
        self.loaded_features.iter().find(|f| f.id == id)
    }

    /// The feature currently under pointer focus, if any.
    #[must_use]
    pub fn selected_feature(&self) -> Option<&Arc<Feature>> {
        self.selection
            .as_ref()
            .and_then(|s| self.find_feature(s.feature_id))
    }

    /// Editable entries of the layer catalog.
    pub fn editable_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|l| l.editable)
    }
}
