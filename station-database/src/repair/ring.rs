//! Fermeture et orientation des anneaux

use std::collections::HashSet;

use geo::{Area, Coord, LineString, Polygon, Winding};

use crate::types::Position;

/// Nombre minimal de positions distinctes pour former un anneau
pub const MIN_DISTINCT_POSITIONS: usize = 3;

/// Compte les positions distinctes (comparaison exacte des coordonnées)
pub fn distinct_positions(coords: &[Position]) -> usize {
    coords
        .iter()
        .map(|[x, y]| (x.to_bits(), y.to_bits()))
        .collect::<HashSet<_>>()
        .len()
}

/// Ferme une ligne ouverte en répétant sa première position
///
/// Une ligne déjà fermée est rendue telle quelle.
pub fn close_ring(coords: &[Position]) -> Vec<Position> {
    let mut ring = coords.to_vec();
    if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
        if first != last {
            ring.push(first);
        }
    }
    ring
}

/// Oriente un anneau extérieur dans le sens anti-horaire (règle de la main droite, RFC 7946)
pub fn make_ccw(ring: Vec<Position>) -> Vec<Position> {
    let mut line = to_line_string(&ring);
    line.make_ccw_winding();
    line.0.into_iter().map(|c| [c.x, c.y]).collect()
}

/// Aire signée d'un anneau fermé (positive si anti-horaire)
pub fn signed_area(ring: &[Position]) -> f64 {
    Polygon::new(to_line_string(ring), vec![]).signed_area()
}

fn to_line_string(coords: &[Position]) -> LineString {
    coords.iter().map(|&[x, y]| Coord { x, y }).collect()
}
