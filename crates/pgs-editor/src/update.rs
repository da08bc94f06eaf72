//! Message dispatch: the serialized update channel.

use std::sync::Arc;

use tracing::{debug, warn};

use pgs_model::RemoteError;

use crate::message::{Effect, Message};
use crate::state::{EditorState, SyncStatus};
use crate::{selection, store};

/// One applied message: the next snapshot plus requested network work.
#[derive(Debug)]
pub struct Transition {
    pub state: EditorState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn state(state: EditorState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

/// Apply one message to a snapshot.
///
/// Pure with respect to the input: the given snapshot is never mutated,
/// the returned one shares every untouched branch with it.
pub fn update(state: &EditorState, message: Message) -> Transition {
    debug!(action = message.kind(), "applying message");
    match message {
        Message::DrawCompleted(feature) => Transition::state(store::record_drawn(state, feature)),

        Message::SetEditableLayers(layer_ids) => {
            let (next, effects) = store::set_editable_layers(state, layer_ids);
            Transition {
                state: next,
                effects,
            }
        }

        Message::UpdateFeature {
            id,
            title,
            description,
            layer_id,
        } => Transition::state(store::update_feature(state, id, &title, &description, layer_id)),

        Message::DeleteFeature(id) => Transition::state(store::delete_feature(state, id)),

        Message::SelectFeature(id) => Transition::state(store::select_feature(state, id)),

        Message::MapClicked {
            point,
            screen_position,
        } => Transition::state(selection::track_click(state, point, screen_position)),

        Message::LoadAllFeatures => {
            let mut next = state.clone();
            next.loading = true;
            Transition {
                state: next,
                effects: vec![Effect::FetchAllFeatures],
            }
        }

        Message::LoadLayerCatalog => {
            let mut next = state.clone();
            next.loading = true;
            Transition {
                state: next,
                effects: vec![Effect::FetchLayerCatalog],
            }
        }

        Message::SaveRequested => {
            let mut next = state.clone();
            next.sync = SyncStatus::Saving;
            Transition {
                state: next,
                effects: vec![Effect::Save {
                    features: Arc::clone(&state.features),
                    deleted_ids: Arc::clone(&state.deleted_ids),
                }],
            }
        }

        Message::LayerFeaturesFetched { layer_id, result } => match result {
            Ok(features) => {
                Transition::state(store::merge_layer_features(state, layer_id, features))
            }
            Err(error) => Transition::state(record_fetch_error(state, error)),
        },

        Message::AllFeaturesFetched(result) => match result {
            Ok(features) => Transition::state(store::merge_all_features(state, features)),
            Err(error) => Transition::state(record_fetch_error(state, error)),
        },

        Message::LayerCatalogFetched(result) => match result {
            Ok(layers) => Transition::state(store::replace_layer_catalog(state, layers)),
            Err(error) => Transition::state(record_fetch_error(state, error)),
        },

        Message::SaveCompleted(result) => Transition::state(store::finish_save(state, result)),
    }
}

fn record_fetch_error(state: &EditorState, error: RemoteError) -> EditorState {
    warn!(status = error.status, message = %error.message, "fetch failed");
    let mut next = state.clone();
    next.loading = false;
    next.last_error = Some(error);
    next
}

/// Single owner of the current snapshot.
///
/// `apply` replaces the snapshot atomically; `state` hands out a
/// read-only projection that stays valid (and immutable) forever.
#[derive(Debug, Default)]
pub struct Editor {
    state: Arc<EditorState>,
}

impl Editor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, as a read-only projection.
    #[must_use]
    pub fn state(&self) -> Arc<EditorState> {
        Arc::clone(&self.state)
    }

    /// Apply one message and return the network work it requested.
    pub fn apply(&mut self, message: Message) -> Vec<Effect> {
        let transition = update(&self.state, message);
        self.state = Arc::new(transition.state);
        transition.effects
    }
}
