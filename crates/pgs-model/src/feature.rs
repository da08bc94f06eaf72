//! Editable features and their identity.

use std::fmt;

use geo_types::Polygon;
use uuid::Uuid;

use crate::layer::LayerId;

/// Identity of a feature, which doubles as its persistence status.
///
/// A feature is persisted if and only if it carries a server-assigned
/// [`FeatureId::Persisted`] id. Freshly drawn features get a
/// [`FeatureId::Draft`] id from the drawing collaborator and keep it until
/// a reload replaces them with their server records; this variant alone
/// decides whether a save issues a create or an update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeatureId {
    /// Client-assigned id for a feature that has never been persisted.
    Draft(Uuid),
    /// Server-assigned id of a persisted feature.
    Persisted(u64),
}

impl FeatureId {
    /// Mint a fresh draft id.
    #[must_use]
    pub fn draft() -> Self {
        Self::Draft(Uuid::new_v4())
    }

    /// True when the id was assigned by the server.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted(_))
    }

    /// The server-assigned id, if persisted.
    #[must_use]
    pub fn persisted(&self) -> Option<u64> {
        match self {
            Self::Persisted(id) => Some(*id),
            Self::Draft(_) => None,
        }
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft(uuid) => write!(f, "draft:{uuid}"),
            Self::Persisted(id) => write!(f, "{id}"),
        }
    }
}

/// Custom properties attached to a feature.
///
/// A freshly drawn feature has none until its first property save assigns
/// them together with its owning layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureProperties {
    pub title: String,
    pub description: String,
    /// Owning layer.
    pub layer_id: LayerId,
}

/// A single editable polygon feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: FeatureId,
    /// Ordered exterior and interior rings.
    pub geometry: Polygon<f64>,
    /// Absent until the first property save of a drawn feature.
    pub properties: Option<FeatureProperties>,
}

impl Feature {
    /// A drawn feature with a fresh draft id and no properties yet.
    #[must_use]
    pub fn drawn(geometry: Polygon<f64>) -> Self {
        Self {
            id: FeatureId::draft(),
            geometry,
            properties: None,
        }
    }

    /// The owning layer, if one has been assigned.
    #[must_use]
    pub fn layer_id(&self) -> Option<LayerId> {
        self.properties.as_ref().map(|p| p.layer_id)
    }

    /// Title for display, empty for unassigned drawn features.
    #[must_use]
    pub fn title(&self) -> &str {
        self.properties.as_ref().map_or("", |p| p.title.as_str())
    }
}

/// Contextual editor popup descriptor attached to the current selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    /// Screen coordinates of the click that opened the popup.
    pub screen_position: (f64, f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{LineString, polygon};

    fn square() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 4.0, y: 4.0),
            (x: 0.0, y: 4.0),
        ]
    }

    #[test]
    fn drawn_features_are_not_persisted() {
        let feature = Feature::drawn(square());
        assert!(!feature.id.is_persisted());
        assert_eq!(feature.id.persisted(), None);
        assert_eq!(feature.layer_id(), None);
        assert_eq!(feature.title(), "");
    }

    #[test]
    fn persisted_id_round_trip() {
        let id = FeatureId::Persisted(7);
        assert!(id.is_persisted());
        assert_eq!(id.persisted(), Some(7));
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn draft_ids_are_unique() {
        assert_ne!(FeatureId::draft(), FeatureId::draft());
    }

    #[test]
    fn feature_with_properties_reports_layer() {
        let feature = Feature {
            id: FeatureId::Persisted(1),
            geometry: Polygon::new(LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]), vec![]),
            properties: Some(FeatureProperties {
                title: "Park".to_string(),
                description: String::new(),
                layer_id: LayerId::new(3),
            }),
        };
        assert_eq!(feature.layer_id(), Some(LayerId::new(3)));
        assert_eq!(feature.title(), "Park");
    }
}
