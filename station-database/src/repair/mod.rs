//! Normalisation des frontières de Voronoï
//!
//! Les stations en périphérie du dataset ont une frontière ouverte
//! (`LineString`). Elle est fermée puis réorientée pour devenir un `Polygon`
//! valide au sens GeoJSON. Un `Polygon` est rendu sans modification.

pub mod ring;

use tracing::info;

use crate::types::{Boundary, Feature, Geometry, Ident};
use crate::DatasetError;

/// Résultat de la normalisation
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Unchanged(Boundary),
    Converted(Boundary),
}

impl Normalized {
    pub fn is_converted(&self) -> bool {
        matches!(self, Normalized::Converted(_))
    }

    pub fn into_inner(self) -> Boundary {
        match self {
            Normalized::Unchanged(boundary) | Normalized::Converted(boundary) => boundary,
        }
    }
}

/// Convertit une frontière `LineString` en `Polygon` fermé et orienté anti-horaire
///
/// # Errors
///
/// `InvalidGeometry` si la ligne compte moins de trois positions distinctes,
/// ou si ses positions sont alignées (anneau d'aire nulle).
pub fn normalize_boundary(station: &Ident, boundary: Boundary) -> Result<Normalized, DatasetError> {
    let Feature {
        kind,
        geometry,
        properties,
    } = boundary;

    let coordinates = match geometry {
        Geometry::LineString { coordinates } => coordinates,
        polygon @ Geometry::Polygon { .. } => {
            return Ok(Normalized::Unchanged(Feature {
                kind,
                geometry: polygon,
                properties,
            }));
        }
    };

    let distinct = ring::distinct_positions(&coordinates);
    if distinct < ring::MIN_DISTINCT_POSITIONS {
        return Err(DatasetError::invalid_geometry(
            format!("station {}", station),
            format!(
                "voronoi LineString has {} distinct coordinates, at least {} required",
                distinct,
                ring::MIN_DISTINCT_POSITIONS
            ),
        ));
    }

    let exterior = ring::make_ccw(ring::close_ring(&coordinates));
    if ring::signed_area(&exterior) <= 0.0 {
        return Err(DatasetError::invalid_geometry(
            format!("station {}", station),
            "voronoi LineString is collinear, ring has zero area",
        ));
    }

    info!(station = %station, "voronoi geometry type changed to Polygon");

    Ok(Normalized::Converted(Feature {
        kind,
        geometry: Geometry::Polygon {
            coordinates: vec![exterior],
        },
        properties,
    }))
}
