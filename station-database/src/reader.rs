//! Lecture des fichiers JSON du dataset
//!
//! Arborescence attendue sous la racine :
//!
//! ```text
//! station.json        (obligatoire)
//! line.json           (obligatoire)
//! delaunay.json       (obligatoire)
//! tree.json           (obligatoire)
//! line/<code>.json    (un par ligne, absence tolérée)
//! polyline/<code>.json (optionnel)
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::LineCode;
use crate::DatasetError;

pub const STATION_FILE: &str = "station.json";
pub const LINE_FILE: &str = "line.json";
pub const DELAUNAY_FILE: &str = "delaunay.json";
pub const TREE_FILE: &str = "tree.json";

/// Accès en lecture à un répertoire de dataset
#[derive(Debug, Clone)]
pub struct DatasetReader {
    root: PathBuf,
}

impl DatasetReader {
    /// Ouvre la racine du dataset
    ///
    /// # Errors
    ///
    /// `RootNotFound` si le chemin n'existe pas ou n'est pas un répertoire.
    pub fn open(root: &Path) -> Result<Self, DatasetError> {
        if !root.is_dir() {
            return Err(DatasetError::RootNotFound(root.to_path_buf()));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Lit un fichier obligatoire : absence ou JSON invalide sont fatals
    pub fn read_required<T: DeserializeOwned>(&self, relative: &str) -> Result<T, DatasetError> {
        match self.read_optional(relative)? {
            Some(value) => Ok(value),
            None => Err(DatasetError::MissingFile(self.root.join(relative))),
        }
    }

    /// Lit un fichier optionnel : `Ok(None)` s'il n'existe pas
    ///
    /// Un fichier présent mais illisible reste une erreur ; l'appelant décide
    /// s'il la tolère.
    pub fn read_optional<T: DeserializeOwned>(
        &self,
        relative: &str,
    ) -> Result<Option<T>, DatasetError> {
        let path = self.root.join(relative);
        let data = match std::fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        debug!(file = %path.display(), bytes = data.len(), "Reading JSON");

        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|e| DatasetError::parse_error(relative, e.to_string()))
    }
}

/// Chemin relatif du détail d'une ligne
pub fn line_detail_path(code: LineCode) -> String {
    format!("line/{}.json", code)
}

/// Chemin relatif de la polyligne d'une ligne
pub fn polyline_path(code: LineCode) -> String {
    format!("polyline/{}.json", code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "station-database-reader-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_open_missing_root() {
        let result = DatasetReader::open(Path::new("nonexistent/station_database/out/main"));
        assert!(matches!(result, Err(DatasetError::RootNotFound(_))));
    }

    #[test]
    fn test_read_required_and_optional() {
        let root = temp_root("required");
        std::fs::write(root.join("values.json"), "[1, 2, 3]").unwrap();
        std::fs::write(root.join("broken.json"), "[1, 2,").unwrap();

        let reader = DatasetReader::open(&root).unwrap();

        let values: Vec<u32> = reader.read_required("values.json").unwrap();
        assert_eq!(values, vec![1, 2, 3]);

        let missing: Result<Vec<u32>, _> = reader.read_required("missing.json");
        assert!(matches!(missing, Err(DatasetError::MissingFile(_))));

        let optional: Option<Vec<u32>> = reader.read_optional("missing.json").unwrap();
        assert!(optional.is_none());

        let broken: Result<Option<Vec<u32>>, _> = reader.read_optional("broken.json");
        assert!(matches!(broken, Err(DatasetError::Parse { .. })));

        std::fs::remove_dir_all(root).ok();
    }

    #[test]
    fn test_relative_paths() {
        assert_eq!(line_detail_path(LineCode(11319)), "line/11319.json");
        assert_eq!(polyline_path(LineCode(11319)), "polyline/11319.json");
    }
}
