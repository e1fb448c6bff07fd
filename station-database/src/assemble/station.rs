//! Assemblage des stations : voisins de Delaunay + frontière normalisée

use std::collections::HashMap;

use crate::diagnostics::Diagnostics;
use crate::error::Warning;
use crate::repair;
use crate::resolve::{LineIndex, Resolution, StationIndex};
use crate::types::{DelaunayRecord, Ident, Station, StationCode, StationRecord};
use crate::DatasetError;

/// Stations assemblées, dans l'ordre de `station.json`
#[derive(Debug, Default)]
pub struct StationAssembly {
    pub stations: Vec<Station>,
    /// Nombre de frontières converties de LineString en Polygon
    pub converted: usize,
}

/// Assemble chaque station avec son voisinage de Delaunay
///
/// Une station sans enregistrement Delaunay reçoit une liste vide ; un voisin
/// non résolu est retiré. Les deux cas produisent un warning.
pub fn assemble(
    records: Vec<StationRecord>,
    delaunay: &[DelaunayRecord],
    stations: &StationIndex,
    lines: &LineIndex,
    diagnostics: &mut Diagnostics,
) -> Result<StationAssembly, DatasetError> {
    // Premier enregistrement retenu en cas de doublon
    let mut neighbours: HashMap<StationCode, &DelaunayRecord> =
        HashMap::with_capacity(delaunay.len());
    for record in delaunay {
        neighbours.entry(record.code).or_insert(record);
    }

    let mut assembly = StationAssembly {
        stations: Vec::with_capacity(records.len()),
        converted: 0,
    };

    for record in records {
        if record.lines.is_empty() {
            return Err(DatasetError::EmptyStationLines(record.code));
        }

        for &line in &record.lines {
            if !lines.contains(line) {
                diagnostics.warn(Warning::UnknownLineReference {
                    station: record.code,
                    line,
                });
            }
        }

        let neighbour_ids = match neighbours.get(&record.code) {
            Some(entry) => resolve_neighbours(entry, stations, diagnostics),
            None => {
                diagnostics.warn(Warning::MissingDelaunay {
                    station: record.code,
                });
                Vec::new()
            }
        };

        let (station, converted) = into_station(record, neighbour_ids)?;
        if converted {
            assembly.converted += 1;
        }
        assembly.stations.push(station);
    }

    Ok(assembly)
}

/// Résout les codes voisins en identifiants, dans l'ordre d'origine
fn resolve_neighbours(
    entry: &DelaunayRecord,
    stations: &StationIndex,
    diagnostics: &mut Diagnostics,
) -> Vec<Ident> {
    entry
        .next
        .iter()
        .filter_map(|&neighbour| match stations.resolve(neighbour) {
            Resolution::Resolved(id) => Some(id.clone()),
            Resolution::Missing => {
                diagnostics.warn(Warning::UnresolvedNeighbor {
                    station: entry.code,
                    neighbor: neighbour,
                });
                None
            }
        })
        .collect()
}

fn into_station(
    record: StationRecord,
    delaunay: Vec<Ident>,
) -> Result<(Station, bool), DatasetError> {
    let StationRecord {
        code,
        id,
        name,
        original_name,
        name_kana,
        closed,
        lat,
        lng,
        prefecture,
        lines,
        attr,
        postal_code,
        address,
        open_date,
        closed_date,
        voronoi,
        extra,
    } = record;

    let voronoi = repair::normalize_boundary(&id, voronoi)?;
    let converted = voronoi.is_converted();

    let station = Station {
        code,
        id,
        name,
        original_name,
        name_kana,
        closed,
        lat,
        lng,
        prefecture,
        lines,
        attr,
        postal_code,
        address,
        open_date,
        closed_date,
        voronoi: voronoi.into_inner(),
        extra,
        delaunay,
    };

    Ok((station, converted))
}
