//! Remote loader: fetch completions for the editor, plus the display-only
//! read-only dataset path.

use geo_types::GeometryCollection;
use geojson::{GeoJson, quick_collection};
use tracing::warn;

use pgs_editor::Message;
use pgs_model::{Feature, FeatureId, FeatureProperties, Layer, LayerId, RemoteError, wkt};

use crate::api::{LayerRecord, PolygonApi, PolygonRecord};

/// Convert one wire record into a feature.
///
/// `layer_override` tags records of a by-layer fetch with the requested
/// layer. Records whose geometry does not parse are skipped so one bad
/// row cannot fail a whole batch.
pub fn feature_from_record(record: PolygonRecord, layer_override: Option<LayerId>) -> Option<Feature> {
    let geometry = match wkt::parse_polygon(&record.geom) {
        Ok(geometry) => geometry,
        Err(error) => {
            warn!(id = record.id, %error, "skipping record with unusable geometry");
            return None;
        }
    };
    let layer_id = layer_override.or_else(|| record.layer_id.map(LayerId::new));
    Some(Feature {
        id: FeatureId::Persisted(record.id),
        geometry,
        properties: layer_id.map(|layer_id| FeatureProperties {
            title: record.title,
            description: record.description,
            layer_id,
        }),
    })
}

fn layer_from_record(record: LayerRecord) -> Layer {
    Layer {
        id: LayerId::new(record.id),
        title: record.title,
        editable: record.editable,
    }
}

/// Fetch one layer's features and build the merge completion.
pub async fn fetch_layer_features(api: &dyn PolygonApi, layer_id: LayerId) -> Message {
    let result = api.polygons_by_layer(layer_id).await.map(|records| {
        records
            .into_iter()
            .filter_map(|record| feature_from_record(record, Some(layer_id)))
            .collect()
    });
    Message::LayerFeaturesFetched { layer_id, result }
}

/// Fetch every persisted feature for the general editable-data view.
pub async fn fetch_all_features(api: &dyn PolygonApi) -> Message {
    let result = api.list_polygons().await.map(|records| {
        records
            .into_iter()
            .filter_map(|record| feature_from_record(record, None))
            .collect()
    });
    Message::AllFeaturesFetched(result)
}

/// Fetch the layer catalog.
pub async fn fetch_layer_catalog(api: &dyn PolygonApi) -> Message {
    let result = api
        .layer_catalog()
        .await
        .map(|records| records.into_iter().map(layer_from_record).collect());
    Message::LayerCatalogFetched(result)
}

/// The static display-only dataset.
///
/// This data never enters the editable feature store; it exists solely
/// for a rendering collaborator to paint.
#[derive(Debug, Clone)]
pub struct ReadOnlyDataset {
    pub geometries: GeometryCollection<f64>,
}

impl ReadOnlyDataset {
    #[must_use]
    pub fn geometry_count(&self) -> usize {
        self.geometries.0.len()
    }

    /// How many of the geometries are areal (polygon or multi-polygon).
    #[must_use]
    pub fn areal_count(&self) -> usize {
        self.geometries
            .0
            .iter()
            .filter(|g| {
                matches!(
                    g,
                    geo_types::Geometry::Polygon(_) | geo_types::Geometry::MultiPolygon(_)
                )
            })
            .count()
    }
}

/// Fetch and geometry-process the read-only dataset.
pub async fn fetch_read_only_dataset(api: &dyn PolygonApi) -> Result<ReadOnlyDataset, RemoteError> {
    let raw = api.read_only_dataset().await?;
    let geojson: GeoJson = raw
        .parse()
        .map_err(|e: geojson::Error| RemoteError::transport(format!("invalid GeoJSON: {e}")))?;
    let geometries = quick_collection(&geojson)
        .map_err(|e| RemoteError::transport(format!("unusable GeoJSON geometry: {e}")))?;
    Ok(ReadOnlyDataset { geometries })
}
