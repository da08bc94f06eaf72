//! Feature store mutations.
//!
//! Every function takes the current snapshot and returns the next one;
//! only the touched path is copied. Unknown-id updates and deletes fail
//! silently, as callers must not assume feedback.

use std::collections::BTreeSet;
use std::sync::Arc;

use pgs_model::{Feature, FeatureId, FeatureProperties, Layer, LayerId};
use tracing::{debug, error, info, trace};

use crate::message::{Effect, SaveFailure, SaveReport};
use crate::state::{EditorState, Selection, SyncStatus};
use crate::visibility::active_features;

/// Append a freshly drawn feature, idempotent against duplicate
/// draw-complete events. Opens the new-feature modal when the feature was
/// not previously known.
pub(crate) fn record_drawn(state: &EditorState, feature: Feature) -> EditorState {
    if state.loaded_features.iter().any(|f| f.id == feature.id) {
        trace!(id = %feature.id, "duplicate draw-complete event ignored");
        return state.clone();
    }
    let mut next = state.clone();
    Arc::make_mut(&mut next.loaded_features).push(Arc::new(feature));
    next.new_feature_modal = true;
    next
}

/// Store the selected layer set, recompute the active subset and request
/// a fetch for every selected layer that has not been loaded yet.
/// Re-selecting an already-loaded layer performs zero network calls.
pub(crate) fn set_editable_layers(
    state: &EditorState,
    layer_ids: BTreeSet<LayerId>,
) -> (EditorState, Vec<Effect>) {
    let effects: Vec<Effect> = layer_ids
        .iter()
        .filter(|id| !state.loaded_layers.contains(id))
        .map(|id| Effect::FetchLayerFeatures(*id))
        .collect();
    let mut next = state.clone();
    next.selected_layers = Arc::new(layer_ids);
    next.features = active_features(&next.loaded_features, &next.selected_layers, &next.deleted_ids);
    if !effects.is_empty() {
        next.loading = true;
    }
    (next, effects)
}

/// Overwrite one feature's title, description and layer assignment.
///
/// The first property save of a drawn feature closes the new-feature
/// modal. If the new layer is not currently selected the feature leaves
/// the active set and the selection is cleared; otherwise it becomes the
/// selection.
pub(crate) fn update_feature(
    state: &EditorState,
    id: FeatureId,
    title: &str,
    description: &str,
    layer_id: LayerId,
) -> EditorState {
    let Some(index) = state.loaded_features.iter().position(|f| f.id == id) else {
        debug!(%id, "update for unknown feature ignored");
        return state.clone();
    };
    let mut next = state.clone();
    {
        let list = Arc::make_mut(&mut next.loaded_features);
        let feature = Arc::make_mut(&mut list[index]);
        if feature.properties.is_none() {
            next.new_feature_modal = false;
        }
        feature.properties = Some(FeatureProperties {
            title: title.to_string(),
            description: description.to_string(),
            layer_id,
        });
    }
    next.features = active_features(&next.loaded_features, &next.selected_layers, &next.deleted_ids);
    next.selection = if next.selected_layers.contains(&layer_id) {
        Some(Selection::new(id))
    } else {
        None
    };
    next
}

/// Mark a feature for deletion and drop it from the active set.
/// Set semantics: a second call with the same id is a no-op.
pub(crate) fn delete_feature(state: &EditorState, id: FeatureId) -> EditorState {
    let mut next = state.clone();
    Arc::make_mut(&mut next.deleted_ids).insert(id);
    next.features = active_features(&next.loaded_features, &next.selected_layers, &next.deleted_ids);
    next.selection = None;
    next
}

/// Move pointer focus. Selecting an id that is not loaded clears focus.
pub(crate) fn select_feature(state: &EditorState, id: Option<FeatureId>) -> EditorState {
    let mut next = state.clone();
    next.selection = id
        .filter(|id| state.find_feature(*id).is_some())
        .map(Selection::new);
    next
}

/// Merge one layer's fetched features.
///
/// A completion for an already-loaded layer is dropped whole, so a
/// duplicate fetch result can never double-insert.
pub(crate) fn merge_layer_features(
    state: &EditorState,
    layer_id: LayerId,
    features: Vec<Feature>,
) -> EditorState {
    let mut next = state.clone();
    next.loading = false;
    next.last_error = None;
    if state.loaded_layers.contains(&layer_id) {
        trace!(%layer_id, "layer already loaded, dropping fetch result");
        return next;
    }
    merge_features(&mut next, features);
    Arc::make_mut(&mut next.loaded_layers).insert(layer_id);
    next.features = active_features(&next.loaded_features, &next.selected_layers, &next.deleted_ids);
    next
}

/// Merge an all-features fetch, skipping ids already present.
pub(crate) fn merge_all_features(state: &EditorState, features: Vec<Feature>) -> EditorState {
    let mut next = state.clone();
    next.loading = false;
    next.last_error = None;
    merge_features(&mut next, features);
    next.features = active_features(&next.loaded_features, &next.selected_layers, &next.deleted_ids);
    next
}

fn merge_features(next: &mut EditorState, features: Vec<Feature>) {
    let list = Arc::make_mut(&mut next.loaded_features);
    for feature in features {
        if list.iter().all(|f| f.id != feature.id) {
            list.push(Arc::new(feature));
        }
    }
}

/// Replace the layer catalog wholesale.
pub(crate) fn replace_layer_catalog(state: &EditorState, layers: Vec<Layer>) -> EditorState {
    let mut next = state.clone();
    next.loading = false;
    next.last_error = None;
    next.layers = Arc::new(layers);
    next
}

/// Reconcile a settled save cycle.
///
/// Success purges pending deletions from the loaded set and clears
/// `deleted_ids`; server-assigned ids are not merged back, a reload is
/// required to obtain them. Failure keeps every local edit and every
/// pending deletion so the next cycle re-issues them.
pub(crate) fn finish_save(
    state: &EditorState,
    result: Result<SaveReport, SaveFailure>,
) -> EditorState {
    let mut next = state.clone();
    match result {
        Ok(report) => {
            info!(
                created = report.created,
                updated = report.updated,
                deleted = report.deleted,
                "save cycle completed"
            );
            if !state.deleted_ids.is_empty() {
                let deleted = Arc::clone(&state.deleted_ids);
                Arc::make_mut(&mut next.loaded_features).retain(|f| !deleted.contains(&f.id));
                next.deleted_ids = Arc::new(BTreeSet::new());
                next.features =
                    active_features(&next.loaded_features, &next.selected_layers, &next.deleted_ids);
            }
            next.sync = SyncStatus::Saved(report);
        }
        Err(failure) => {
            error!(
                failed = failure.failures.len(),
                attempted = failure.attempted,
                "save cycle failed; local edits retained"
            );
            next.sync = SyncStatus::Failed(failure);
        }
    }
    next
}
