//! Selection and tooltip tracking.
//!
//! Runs synchronously inside the update step that processes a map click,
//! so it cannot race a concurrent selection change.

use geo::Contains;
use geo_types::Point;
use pgs_model::Tooltip;

use crate::state::{EditorState, Selection};

/// Containment-test a click against the selected feature's geometry.
///
/// Inside: attach a visible tooltip at the click's screen position.
/// Outside: clear any tooltip. No selection: no-op.
pub(crate) fn track_click(
    state: &EditorState,
    point: Point<f64>,
    screen_position: (f64, f64),
) -> EditorState {
    let Some(selection) = state.selection.clone() else {
        return state.clone();
    };
    let mut next = state.clone();
    let Some(feature) = state.find_feature(selection.feature_id) else {
        // Stale by-id reference: the feature left the loaded set.
        next.selection = None;
        return next;
    };
    let tooltip = feature.geometry.contains(&point).then_some(Tooltip {
        visible: true,
        screen_position,
    });
    next.selection = Some(Selection {
        feature_id: selection.feature_id,
        tooltip,
    });
    next
}
