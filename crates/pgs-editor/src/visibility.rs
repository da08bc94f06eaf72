//! Layer visibility filter.

use std::collections::BTreeSet;
use std::sync::Arc;

use pgs_model::{Feature, FeatureId, LayerId};

use crate::state::FeatureList;

/// Project the loaded set onto the active (visible-for-editing) subset.
///
/// Returns the ordered subsequence of `loaded` whose owning layer is in
/// `selected`, preserving load order. Features without a layer assignment
/// (drawn, not yet saved) and features pending deletion are excluded; a
/// feature pending deletion must not resurface before reconciliation.
#[must_use]
pub fn active_features(
    loaded: &[Arc<Feature>],
    selected: &BTreeSet<LayerId>,
    deleted: &BTreeSet<FeatureId>,
) -> FeatureList {
    Arc::new(
        loaded
            .iter()
            .filter(|f| !deleted.contains(&f.id))
            .filter(|f| f.layer_id().is_some_and(|l| selected.contains(&l)))
            .cloned()
            .collect(),
    )
}
