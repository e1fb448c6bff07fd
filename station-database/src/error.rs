//! Types d'erreurs pour le crate station-database
//!
//! Deux niveaux : [`DatasetError`] interrompt le build (aucun artefact écrit),
//! [`Warning`] est journalisé puis le build continue en mode dégradé.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Ident, LineCode, StationCode};

/// Erreurs fatales pouvant survenir pendant le build
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Erreur d'I/O lors de la lecture ou de l'écriture
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Répertoire racine du dataset introuvable
    #[error("station_database not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Fichier obligatoire absent
    #[error("Missing required file: {}", .0.display())]
    MissingFile(PathBuf),

    /// Erreur de parsing d'un fichier JSON
    #[error("Parse error in {file}: {reason}")]
    Parse { file: String, reason: String },

    /// Deux entrées partagent le même code
    #[error("Duplicate {kind} code {code}")]
    DuplicateCode { kind: EntityKind, code: String },

    /// Géométrie invalide (frontière dégénérée)
    #[error("Invalid geometry for {entity_id}: {reason}")]
    InvalidGeometry { entity_id: String, reason: String },

    /// Station sans aucune ligne
    #[error("Station {0} has an empty line list")]
    EmptyStationLines(StationCode),

    /// Station de la liste d'une ligne introuvable
    #[error("Station {station} listed by line {line} not found")]
    UnresolvedLineStation { line: LineCode, station: StationCode },

    /// Sommet de l'arbre de recherche introuvable
    #[error("Station {0} not found in tree")]
    UnresolvedTreeNode(StationCode),

    /// Échec de sérialisation JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Motif de contrôle invalide
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Échec d'encodage MessagePack
    #[error("Encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Échec de décodage MessagePack
    #[error("Decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

impl DatasetError {
    /// Crée une erreur de parsing avec contexte
    pub fn parse_error(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Crée une erreur de géométrie invalide
    pub fn invalid_geometry(entity_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            entity_id: entity_id.into(),
            reason: reason.into(),
        }
    }
}

/// Nature de l'entité indexée par code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Station,
    Line,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Station => f.write_str("station"),
            EntityKind::Line => f.write_str("line"),
        }
    }
}

/// Côté d'un lien enfant dans l'arbre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildSide {
    Left,
    Right,
}

impl fmt::Display for ChildSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildSide::Left => f.write_str("left"),
            ChildSide::Right => f.write_str("right"),
        }
    }
}

/// Anomalies tolérées : le build continue, l'entité fautive est identifiée
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Warning {
    #[error("delaunay {station} not found")]
    MissingDelaunay { station: StationCode },

    #[error("station {neighbor} not found in delaunay {station}")]
    UnresolvedNeighbor {
        station: StationCode,
        neighbor: StationCode,
    },

    #[error("line {line} referenced by station {station} not found")]
    UnknownLineReference { station: StationCode, line: LineCode },

    #[error("line {line} not found: {reason}")]
    MissingLineDetail { line: LineCode, reason: String },

    #[error("line {line} polyline not found: {reason}")]
    MissingPolyline { line: LineCode, reason: String },

    #[error("line {line} declares station_size {declared} but lists {actual} stations")]
    StationSizeMismatch {
        line: LineCode,
        declared: u32,
        actual: usize,
    },

    #[error("line {line} id differs between summary ({summary}) and detail ({detail})")]
    LineIdMismatch {
        line: LineCode,
        summary: Ident,
        detail: Ident,
    },

    #[error("line {line} lists station {station} as {embedded}, resolved to {resolved}")]
    LineStationIdMismatch {
        line: LineCode,
        station: StationCode,
        embedded: Ident,
        resolved: Ident,
    },

    #[error("tree node_list does not exist")]
    TreeNodeListMissing,

    #[error("tree root does not exist")]
    TreeRootMissing,

    #[error("tree root station {code} not found")]
    UnresolvedTreeRoot { code: StationCode },

    #[error("station {code} not found in tree ({side} child of {node})")]
    UnresolvedTreeChild {
        node: StationCode,
        side: ChildSide,
        code: StationCode,
    },

    #[error("{entity}: invalid {field} {value:?}")]
    InvalidField {
        entity: String,
        field: &'static str,
        value: String,
    },
}

impl Warning {
    /// Identité lisible de l'entité concernée, pour l'audit après build
    pub fn entity(&self) -> String {
        match self {
            Warning::MissingDelaunay { station }
            | Warning::UnresolvedNeighbor { station, .. }
            | Warning::UnknownLineReference { station, .. } => format!("station {}", station),
            Warning::MissingLineDetail { line, .. }
            | Warning::MissingPolyline { line, .. }
            | Warning::StationSizeMismatch { line, .. }
            | Warning::LineIdMismatch { line, .. }
            | Warning::LineStationIdMismatch { line, .. } => format!("line {}", line),
            Warning::TreeNodeListMissing | Warning::TreeRootMissing => "tree".to_string(),
            Warning::UnresolvedTreeRoot { code } => format!("tree root {}", code),
            Warning::UnresolvedTreeChild { node, .. } => format!("tree node {}", node),
            Warning::InvalidField { entity, .. } => entity.clone(),
        }
    }
}
