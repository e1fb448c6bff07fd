//! # station-database
//!
//! Réconciliation d'un dataset de stations et lignes ferroviaires (fichiers JSON)
//! en un document unique, sérialisé en MessagePack.
//!
//! ## Features
//!
//! - Re-keying des références par code (propre à une version du dataset) en
//!   identifiants stables
//! - Frontières de Voronoï normalisées en Polygon (anneau fermé, sens anti-horaire)
//! - Fusion résumé / détail / polyligne pour chaque ligne
//! - Anomalies tolérées collectées en [`Warning`], erreurs fatales en [`DatasetError`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use station_database::{build, encode};
//! use std::path::Path;
//!
//! let output = build(Path::new("./station_database/out/main"))?;
//! println!("Stations: {}", output.stats.stations);
//! for warning in &output.warnings {
//!     println!("{}: {}", warning.entity(), warning);
//! }
//!
//! encode::write_artifact(Path::new("station_database.msgpack"), &output.document)?;
//! ```

pub mod assemble;
pub mod diagnostics;
pub mod encode;
pub mod error;
pub mod reader;
pub mod repair;
pub mod resolve;
pub mod types;
pub mod validate;

pub use error::{DatasetError, Warning};
pub use types::{BuildStats, Document, Ident, Line, LineCode, Station, StationCode, Tree};

use std::path::Path;

use tracing::info;

use diagnostics::Diagnostics;
use error::EntityKind;
use reader::{DatasetReader, DELAUNAY_FILE, LINE_FILE, STATION_FILE, TREE_FILE};
use resolve::{LineIndex, StationIndex};
use types::{DelaunayRecord, LineSummary, StationRecord, TreeSegment};

/// Résultat d'un build réussi
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub document: Document,
    /// Anomalies tolérées, dans l'ordre où elles ont été rencontrées
    pub warnings: Vec<Warning>,
    pub stats: BuildStats,
}

/// Construit le document à partir de la racine d'un dataset.
///
/// # Arguments
///
/// * `root` - Répertoire contenant `station.json`, `line.json`, `delaunay.json`,
///   `tree.json` et les sous-répertoires `line/` et `polyline/`
///
/// # Errors
///
/// Retourne `DatasetError` si la racine ou un fichier obligatoire est absent,
/// si un code est dupliqué, ou si une référence structurelle ne se résout pas.
/// Aucun document partiel n'est produit.
pub fn build(root: &Path) -> Result<BuildOutput, DatasetError> {
    // 1. Lire les fichiers obligatoires
    let reader = DatasetReader::open(root)?;
    let station_records: Vec<StationRecord> = reader.read_required(STATION_FILE)?;
    let line_summaries: Vec<LineSummary> = reader.read_required(LINE_FILE)?;
    let delaunay: Vec<DelaunayRecord> = reader.read_required(DELAUNAY_FILE)?;
    let tree: TreeSegment = reader.read_required(TREE_FILE)?;

    info!(
        root = %root.display(),
        stations = station_records.len(),
        lines = line_summaries.len(),
        "Dataset loaded"
    );

    // 2. Tables code -> identifiant, construites une seule fois
    let stations = StationIndex::build(
        EntityKind::Station,
        station_records.iter().map(|s| (s.code, &s.id)),
    )?;
    let lines = LineIndex::build(
        EntityKind::Line,
        line_summaries.iter().map(|l| (l.code, &l.id)),
    )?;

    let mut diagnostics = Diagnostics::new();

    // 3. Contrôles de qualité (warnings uniquement)
    let validator = validate::Validator::new()?;
    validator.stations(&station_records, &mut diagnostics);
    validator.lines(&line_summaries, &mut diagnostics);

    // 4. Assemblage
    let station_assembly = assemble::station::assemble(
        station_records,
        &delaunay,
        &stations,
        &lines,
        &mut diagnostics,
    )?;
    let line_assembly =
        assemble::line::assemble(&line_summaries, &reader, &stations, &mut diagnostics)?;
    let tree = assemble::tree::reconcile(tree, &stations, &mut diagnostics)?;

    let stats = BuildStats {
        stations: station_assembly.stations.len(),
        voronoi_converted: station_assembly.converted,
        lines: line_assembly.lines.len(),
        lines_skipped: line_assembly.skipped,
        polylines_missing: line_assembly.polylines_missing,
        tree_nodes: tree.node_list.len(),
    };

    info!(
        stations = stats.stations,
        lines = stats.lines,
        tree_nodes = stats.tree_nodes,
        warnings = diagnostics.len(),
        "Document assembled"
    );

    Ok(BuildOutput {
        document: Document {
            station: station_assembly.stations,
            line: line_assembly.lines,
            tree,
        },
        warnings: diagnostics.into_warnings(),
        stats,
    })
}
