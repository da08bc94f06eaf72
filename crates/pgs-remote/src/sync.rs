//! The save cycle: fan-out, join-all.
//!
//! Every create/update/delete call of one cycle is dispatched without
//! waiting for the others; nothing orders a feature's create against
//! another feature's delete. The cycle settles only when every call has,
//! and either confirms as a whole or aggregates its failures without
//! attributing them to individual features. There is no rollback: local
//! edits stay applied whatever the outcome.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, join_all};
use tracing::warn;

use pgs_editor::{SaveFailure, SaveReport};
use pgs_model::{Feature, FeatureId, RemoteError, wkt};

use crate::api::{CreatePolygonRequest, PolygonApi, UpdatePolygonRequest};

enum CallKind {
    Created,
    Updated,
    Deleted,
}

/// Run one save cycle over a captured snapshot.
///
/// Persisted features are updated, drafts are created (the server assigns
/// their ids), and every persisted id pending deletion is deleted. Draft
/// entries in `deleted_ids` have nothing remote to delete and are simply
/// dropped with the rest at reconciliation.
pub async fn save(
    api: &dyn PolygonApi,
    features: &[Arc<Feature>],
    deleted_ids: &BTreeSet<FeatureId>,
) -> Result<SaveReport, SaveFailure> {
    let mut calls: Vec<BoxFuture<'_, Result<CallKind, RemoteError>>> = Vec::new();

    for feature in features {
        let Some(properties) = feature.properties.as_ref() else {
            // The active set only holds layer-assigned features; an
            // unassigned one cannot be addressed to a layer.
            warn!(id = %feature.id, "unassigned feature skipped by save cycle");
            continue;
        };
        let geometry = wkt::polygon_to_wkt(&feature.geometry);
        match feature.id {
            FeatureId::Persisted(id) => {
                let request = UpdatePolygonRequest {
                    id,
                    title: properties.title.clone(),
                    description: properties.description.clone(),
                    geom: geometry,
                    layer_id: properties.layer_id.get(),
                };
                calls.push(
                    async move { api.update_polygon(request).await.map(|_| CallKind::Updated) }
                        .boxed(),
                );
            }
            FeatureId::Draft(_) => {
                let request = CreatePolygonRequest {
                    title: properties.title.clone(),
                    description: properties.description.clone(),
                    geojson: geometry,
                    layer_id: properties.layer_id.get(),
                };
                calls.push(
                    async move { api.create_polygon(request).await.map(|_| CallKind::Created) }
                        .boxed(),
                );
            }
        }
    }

    for id in deleted_ids {
        if let Some(server_id) = id.persisted() {
            calls.push(
                async move { api.delete_polygon(server_id).await.map(|_| CallKind::Deleted) }
                    .boxed(),
            );
        }
    }

    let attempted = calls.len();
    let mut report = SaveReport::default();
    let mut failures = Vec::new();
    for outcome in join_all(calls).await {
        match outcome {
            Ok(CallKind::Created) => report.created += 1,
            Ok(CallKind::Updated) => report.updated += 1,
            Ok(CallKind::Deleted) => report.deleted += 1,
            Err(error) => failures.push(error),
        }
    }

    if failures.is_empty() {
        Ok(report)
    } else {
        Err(SaveFailure {
            attempted,
            failures,
        })
    }
}
