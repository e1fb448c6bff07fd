//! Assemblage des lignes : résumé (`line.json`) + détail + polyligne

use tracing::debug;

use crate::diagnostics::Diagnostics;
use crate::error::Warning;
use crate::reader::{line_detail_path, polyline_path, DatasetReader};
use crate::resolve::{Resolution, StationIndex};
use crate::types::{Ident, Line, LineCode, LineDetail, LineStationEntry, LineSummary, Polyline};
use crate::DatasetError;

#[derive(Debug, Default)]
pub struct LineAssembly {
    pub lines: Vec<Line>,
    /// Lignes du résumé sans fichier de détail exploitable
    pub skipped: usize,
    pub polylines_missing: usize,
}

/// Assemble toutes les lignes du résumé
///
/// Un détail absent ou illisible retire la ligne de la sortie ; une polyligne
/// absente ou illisible laisse `polyline_list` à `None`. Une station de la
/// liste qui ne se résout pas est fatale.
pub fn assemble(
    summaries: &[LineSummary],
    reader: &DatasetReader,
    stations: &StationIndex,
    diagnostics: &mut Diagnostics,
) -> Result<LineAssembly, DatasetError> {
    let mut assembly = LineAssembly {
        lines: Vec::with_capacity(summaries.len()),
        ..Default::default()
    };

    for summary in summaries {
        let detail = match reader.read_optional::<LineDetail>(&line_detail_path(summary.code)) {
            Ok(Some(detail)) => detail,
            Ok(None) => {
                diagnostics.warn(Warning::MissingLineDetail {
                    line: summary.code,
                    reason: "file not found".to_string(),
                });
                assembly.skipped += 1;
                continue;
            }
            Err(e) => {
                diagnostics.warn(Warning::MissingLineDetail {
                    line: summary.code,
                    reason: e.to_string(),
                });
                assembly.skipped += 1;
                continue;
            }
        };

        let polyline = match reader.read_optional::<Polyline>(&polyline_path(summary.code)) {
            Ok(Some(polyline)) => Some(polyline),
            Ok(None) => {
                diagnostics.warn(Warning::MissingPolyline {
                    line: summary.code,
                    reason: "file not found".to_string(),
                });
                assembly.polylines_missing += 1;
                None
            }
            Err(e) => {
                diagnostics.warn(Warning::MissingPolyline {
                    line: summary.code,
                    reason: e.to_string(),
                });
                assembly.polylines_missing += 1;
                None
            }
        };

        let line = merge(summary, detail, polyline, stations, diagnostics)?;
        debug!(line = %line.code, stations = line.station_list.len(), "Line assembled");
        assembly.lines.push(line);
    }

    Ok(assembly)
}

/// Fusionne résumé et détail ; le détail prime lorsque les deux définissent un champ
pub fn merge(
    summary: &LineSummary,
    detail: LineDetail,
    polyline: Option<Polyline>,
    stations: &StationIndex,
    diagnostics: &mut Diagnostics,
) -> Result<Line, DatasetError> {
    if detail.id != summary.id {
        diagnostics.warn(Warning::LineIdMismatch {
            line: summary.code,
            summary: summary.id.clone(),
            detail: detail.id.clone(),
        });
    }

    let station_list = rekey_stations(summary.code, &detail.station_list, stations, diagnostics)?;

    if detail.station_size as usize != station_list.len() {
        diagnostics.warn(Warning::StationSizeMismatch {
            line: summary.code,
            declared: detail.station_size,
            actual: station_list.len(),
        });
    }

    Ok(Line {
        code: detail.code,
        id: detail.id,
        name: detail.name,
        name_kana: detail.name_kana,
        name_formal: detail.name_formal.or_else(|| summary.name_formal.clone()),
        station_size: detail.station_size,
        company_code: detail.company_code.or(summary.company_code),
        closed: detail.closed.unwrap_or(summary.closed),
        color: detail.color.or_else(|| summary.color.clone()),
        symbol: detail.symbol.or_else(|| summary.symbol.clone()),
        closed_date: detail.closed_date.or_else(|| summary.closed_date.clone()),
        extra: detail.extra.or(summary.extra),
        station_list,
        polyline_list: polyline,
    })
}

/// Remplace chaque station de la liste par son identifiant (ordre et doublons conservés)
fn rekey_stations(
    line: LineCode,
    entries: &[LineStationEntry],
    stations: &StationIndex,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Ident>, DatasetError> {
    entries
        .iter()
        .map(|entry| match stations.resolve(entry.code) {
            Resolution::Resolved(resolved) => {
                if let Some(embedded) = entry.id.as_ref().filter(|id| *id != resolved) {
                    diagnostics.warn(Warning::LineStationIdMismatch {
                        line,
                        station: entry.code,
                        embedded: embedded.clone(),
                        resolved: resolved.clone(),
                    });
                }
                Ok(resolved.clone())
            }
            Resolution::Missing => Err(DatasetError::UnresolvedLineStation {
                line,
                station: entry.code,
            }),
        })
        .collect()
}
