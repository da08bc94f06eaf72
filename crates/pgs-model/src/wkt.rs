//! Well-known-text codec for polygon geometry.
//!
//! The remote service stores geometry as WKT strings; this module parses
//! inbound `geom` fields into [`Polygon`] values and serializes outbound
//! geometry back to the same encoding.

use std::str::FromStr;

use geo_types::{Geometry, Polygon};
use wkt::{ToWkt, Wkt};

use crate::error::{ModelError, Result};

/// Parse a WKT string into a polygon.
///
/// Only areal `POLYGON` geometry is accepted; any other well-formed WKT
/// type is rejected with [`ModelError::UnsupportedGeometry`].
pub fn parse_polygon(text: &str) -> Result<Polygon<f64>> {
    let parsed = Wkt::<f64>::from_str(text).map_err(|e| ModelError::WktParse(e.to_string()))?;
    let geometry =
        Geometry::try_from(parsed).map_err(|e| ModelError::WktParse(e.to_string()))?;
    match geometry {
        Geometry::Polygon(polygon) => Ok(polygon),
        other => Err(ModelError::UnsupportedGeometry(geometry_kind(&other))),
    }
}

/// Serialize a polygon to the WKT encoding the backend expects.
#[must_use]
pub fn polygon_to_wkt(polygon: &Polygon<f64>) -> String {
    polygon.wkt_string()
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "POINT",
        Geometry::Line(_) => "LINE",
        Geometry::LineString(_) => "LINESTRING",
        Geometry::Polygon(_) => "POLYGON",
        Geometry::MultiPoint(_) => "MULTIPOINT",
        Geometry::MultiLineString(_) => "MULTILINESTRING",
        Geometry::MultiPolygon(_) => "MULTIPOLYGON",
        Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        Geometry::Rect(_) => "RECT",
        Geometry::Triangle(_) => "TRIANGLE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "POLYGON((0 0,4 0,4 4,0 4,0 0))";

    #[test]
    fn parses_polygon() {
        let polygon = parse_polygon(SQUARE).expect("parse");
        assert_eq!(polygon.exterior().coords().count(), 5);
        assert!(polygon.interiors().is_empty());
    }

    #[test]
    fn parses_polygon_with_hole() {
        let polygon =
            parse_polygon("POLYGON((0 0,10 0,10 10,0 10,0 0),(2 2,4 2,4 4,2 4,2 2))")
                .expect("parse");
        assert_eq!(polygon.interiors().len(), 1);
    }

    #[test]
    fn round_trip_preserves_geometry() {
        let polygon = parse_polygon(SQUARE).expect("parse");
        let text = polygon_to_wkt(&polygon);
        let back = parse_polygon(&text).expect("reparse");
        assert_eq!(polygon, back);
    }

    #[test]
    fn rejects_non_areal_geometry() {
        let err = parse_polygon("POINT(1 2)").expect_err("point is not areal");
        assert_eq!(err, ModelError::UnsupportedGeometry("POINT"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_polygon("POLYGON((1 2"),
            Err(ModelError::WktParse(_))
        ));
    }
}
