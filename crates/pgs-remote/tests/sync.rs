//! Save-cycle and session round-trips against a recording fake backend.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use geo_types::polygon;

use pgs_editor::{Message, SyncStatus};
use pgs_model::{Feature, FeatureId, FeatureProperties, LayerId, RemoteError, wkt};
use pgs_remote::{
    ApiResult, CreatePolygonRequest, LayerRecord, PolygonApi, PolygonRecord, Session,
    UpdatePolygonRequest, loader, sync,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(CreatePolygonRequest),
    Update(UpdatePolygonRequest),
    Delete(u64),
    ListAll,
    ListByLayer(u64),
    Layers,
    ReadOnly,
}

/// Fake backend that records every call and serves canned data.
#[derive(Default)]
struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    layer_features: HashMap<u64, Vec<PolygonRecord>>,
    all_features: Vec<PolygonRecord>,
    layers: Vec<LayerRecord>,
    read_only: String,
    fail_deletes: bool,
}

impl RecordingApi {
    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl PolygonApi for RecordingApi {
    async fn create_polygon(&self, request: CreatePolygonRequest) -> ApiResult<PolygonRecord> {
        let record = PolygonRecord {
            id: 1000,
            geom: request.geojson.clone(),
            title: request.title.clone(),
            description: request.description.clone(),
            layer_id: Some(request.layer_id),
        };
        self.record(Call::Create(request));
        Ok(record)
    }

    async fn update_polygon(&self, request: UpdatePolygonRequest) -> ApiResult<PolygonRecord> {
        let record = PolygonRecord {
            id: request.id,
            geom: request.geom.clone(),
            title: request.title.clone(),
            description: request.description.clone(),
            layer_id: Some(request.layer_id),
        };
        self.record(Call::Update(request));
        Ok(record)
    }

    async fn delete_polygon(&self, id: u64) -> ApiResult<()> {
        self.record(Call::Delete(id));
        if self.fail_deletes {
            return Err(RemoteError::http(500, "delete rejected"));
        }
        Ok(())
    }

    async fn list_polygons(&self) -> ApiResult<Vec<PolygonRecord>> {
        self.record(Call::ListAll);
        Ok(self.all_features.clone())
    }

    async fn polygons_by_layer(&self, layer_id: LayerId) -> ApiResult<Vec<PolygonRecord>> {
        self.record(Call::ListByLayer(layer_id.get()));
        Ok(self
            .layer_features
            .get(&layer_id.get())
            .cloned()
            .unwrap_or_default())
    }

    async fn layer_catalog(&self) -> ApiResult<Vec<LayerRecord>> {
        self.record(Call::Layers);
        Ok(self.layers.clone())
    }

    async fn read_only_dataset(&self) -> ApiResult<String> {
        self.record(Call::ReadOnly);
        Ok(self.read_only.clone())
    }
}

fn square() -> geo_types::Polygon<f64> {
    polygon![
        (x: 0.0, y: 0.0),
        (x: 10.0, y: 0.0),
        (x: 10.0, y: 10.0),
        (x: 0.0, y: 10.0),
    ]
}

fn persisted(id: u64, layer: u64, title: &str) -> Arc<Feature> {
    Arc::new(Feature {
        id: FeatureId::Persisted(id),
        geometry: square(),
        properties: Some(FeatureProperties {
            title: title.to_string(),
            description: "D".to_string(),
            layer_id: LayerId::new(layer),
        }),
    })
}

fn draft(layer: u64, title: &str) -> Arc<Feature> {
    Arc::new(Feature {
        id: FeatureId::draft(),
        geometry: square(),
        properties: Some(FeatureProperties {
            title: title.to_string(),
            description: "D".to_string(),
            layer_id: LayerId::new(layer),
        }),
    })
}

fn record(id: u64, layer: u64, title: &str) -> PolygonRecord {
    PolygonRecord {
        id,
        geom: "POLYGON((0 0,10 0,10 10,0 10,0 0))".to_string(),
        title: title.to_string(),
        description: String::new(),
        layer_id: Some(layer),
    }
}

#[tokio::test]
async fn mixed_save_dispatches_one_update_one_create_one_delete() {
    let api = RecordingApi::default();
    let features = vec![persisted(4, 3, "T"), draft(3, "fresh")];
    let deleted = BTreeSet::from([FeatureId::Persisted(9), FeatureId::draft()]);

    let report = sync::save(&api, &features, &deleted).await.expect("save succeeds");
    assert_eq!(report.created, 1);
    assert_eq!(report.updated, 1);
    assert_eq!(report.deleted, 1);
    assert_eq!(report.calls(), 3);

    let calls = api.calls();
    assert_eq!(calls.len(), 3, "draft deletions never reach the backend");

    let updates: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            Call::Update(r) => Some(r),
            _ => None,
        })
        .collect();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].id, 4);
    assert_eq!(updates[0].title, "T");
    assert_eq!(updates[0].description, "D");
    assert_eq!(updates[0].layer_id, 3);
    // Outbound geometry is the same WKT encoding the list endpoints emit.
    assert_eq!(wkt::parse_polygon(&updates[0].geom).expect("wkt"), square());

    let creates: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            Call::Create(r) => Some(r),
            _ => None,
        })
        .collect();
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].title, "fresh");
    assert_eq!(wkt::parse_polygon(&creates[0].geojson).expect("wkt"), square());

    assert!(calls.contains(&Call::Delete(9)));
}

#[tokio::test]
async fn failures_are_aggregated_without_per_feature_attribution() {
    let api = RecordingApi {
        fail_deletes: true,
        ..RecordingApi::default()
    };
    let features = vec![persisted(4, 3, "T"), draft(3, "fresh")];
    let deleted = BTreeSet::from([FeatureId::Persisted(9)]);

    let failure = sync::save(&api, &features, &deleted).await.expect_err("delete fails");
    assert_eq!(failure.attempted, 3);
    assert_eq!(failure.failures.len(), 1);
    assert_eq!(failure.failures[0].status, 500);
    // All three calls were still dispatched: no early abort, no ordering.
    assert_eq!(api.calls().len(), 3);
}

#[tokio::test]
async fn session_round_trip_edit_and_save() {
    let api = Arc::new(RecordingApi {
        layers: vec![
            LayerRecord {
                id: 1,
                title: "Parks".to_string(),
                editable: true,
            },
            LayerRecord {
                id: 2,
                title: "Basemap".to_string(),
                editable: false,
            },
        ],
        layer_features: HashMap::from([(1, vec![record(4, 1, "old park")])]),
        ..RecordingApi::default()
    });
    let mut session = Session::new(Arc::clone(&api) as Arc<dyn PolygonApi>);

    session.process(Message::LoadLayerCatalog).await;
    assert_eq!(session.state().layers.len(), 2);

    session
        .process(Message::SetEditableLayers(BTreeSet::from([LayerId::new(1)])))
        .await;
    assert_eq!(session.state().features.len(), 1);

    // Selecting the same layer again is served from the store.
    session
        .process(Message::SetEditableLayers(BTreeSet::from([LayerId::new(1)])))
        .await;
    let by_layer_fetches = api
        .calls()
        .iter()
        .filter(|c| matches!(c, Call::ListByLayer(1)))
        .count();
    assert_eq!(by_layer_fetches, 1);

    // Draw a polygon, assign it, and drop the fetched one.
    let drawn = Feature::drawn(square());
    let drawn_id = drawn.id;
    session.process(Message::DrawCompleted(drawn)).await;
    session
        .process(Message::UpdateFeature {
            id: drawn_id,
            title: "new park".to_string(),
            description: String::new(),
            layer_id: LayerId::new(1),
        })
        .await;
    session
        .process(Message::DeleteFeature(FeatureId::Persisted(4)))
        .await;

    session.process(Message::SaveRequested).await;

    let state = session.state();
    assert!(matches!(
        state.sync,
        SyncStatus::Saved(report) if report.created == 1 && report.updated == 0 && report.deleted == 1
    ));
    assert!(state.deleted_ids.is_empty());
    assert!(state.find_feature(FeatureId::Persisted(4)).is_none());
    // The created feature keeps its draft id until a reload.
    assert!(state.find_feature(drawn_id).is_some());

    let calls = api.calls();
    assert!(calls.iter().any(|c| matches!(c, Call::Create(r) if r.title == "new park")));
    assert!(calls.contains(&Call::Delete(4)));
    assert!(!calls.iter().any(|c| matches!(c, Call::Update(_))));
}

#[tokio::test]
async fn failed_deletions_are_reissued_by_the_next_cycle() {
    let api = Arc::new(RecordingApi {
        layer_features: HashMap::from([(1, vec![record(4, 1, "park")])]),
        fail_deletes: true,
        ..RecordingApi::default()
    });
    let mut session = Session::new(Arc::clone(&api) as Arc<dyn PolygonApi>);

    session
        .process(Message::SetEditableLayers(BTreeSet::from([LayerId::new(1)])))
        .await;
    session
        .process(Message::DeleteFeature(FeatureId::Persisted(4)))
        .await;
    session.process(Message::SaveRequested).await;

    let state = session.state();
    assert!(matches!(state.sync, SyncStatus::Failed(_)));
    // At-least-once: the pending deletion survives for the next cycle.
    assert!(state.deleted_ids.contains(&FeatureId::Persisted(4)));

    session.process(Message::SaveRequested).await;
    let deletes = api
        .calls()
        .iter()
        .filter(|c| matches!(c, Call::Delete(4)))
        .count();
    assert_eq!(deletes, 2);
}

#[tokio::test]
async fn read_only_dataset_is_a_distinct_display_only_path() {
    let api = RecordingApi {
        read_only: r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {"type": "Point", "coordinates": [5.0, 5.0]}
                }
            ]
        }"#
        .to_string(),
        ..RecordingApi::default()
    };

    let dataset = loader::fetch_read_only_dataset(&api).await.expect("dataset");
    assert_eq!(dataset.geometry_count(), 2);
    assert_eq!(dataset.areal_count(), 1);
}

#[tokio::test]
async fn unparseable_records_do_not_fail_the_batch() {
    let api = RecordingApi {
        all_features: vec![
            record(1, 1, "good"),
            PolygonRecord {
                id: 2,
                geom: "POINT(1 2)".to_string(),
                title: "bad".to_string(),
                description: String::new(),
                layer_id: Some(1),
            },
        ],
        ..RecordingApi::default()
    };

    let message = loader::fetch_all_features(&api).await;
    let Message::AllFeaturesFetched(Ok(features)) = message else {
        panic!("expected successful fetch");
    };
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].id, FeatureId::Persisted(1));
}
