//! Configuration du build
//!
//! Priorité : arguments CLI, puis variables d'environnement (chargées depuis
//! `.env` au démarrage), puis valeurs par défaut.

use std::path::{Path, PathBuf};

use serde::Serialize;

pub const ENV_ROOT: &str = "STATION_DATABASE_ROOT";
pub const ENV_DATASET: &str = "STATION_DATABASE_DATASET";
pub const ENV_OUTPUT: &str = "STATION_DATABASE_OUTPUT";

const DEFAULT_ROOT: &str = "./station_database/out";
const DEFAULT_DATASET: &str = "main";
const DEFAULT_OUTPUT: &str = "station_database.msgpack";

/// Emplacements d'entrée et de sortie du build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
    /// Répertoire contenant les datasets générés
    pub root: PathBuf,
    /// Nom du dataset (sous-répertoire de `root`)
    pub dataset: String,
    /// Fichier MessagePack produit
    pub output: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            dataset: DEFAULT_DATASET.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl BuildConfig {
    /// Charge la configuration depuis les variables d'environnement
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Charge la configuration depuis une source clé/valeur quelconque
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            root: non_empty(ENV_ROOT).map(PathBuf::from).unwrap_or(defaults.root),
            dataset: non_empty(ENV_DATASET).unwrap_or(defaults.dataset),
            output: non_empty(ENV_OUTPUT)
                .map(PathBuf::from)
                .unwrap_or(defaults.output),
        }
    }

    /// Applique les arguments CLI fournis
    pub fn apply_overrides(
        mut self,
        root: Option<PathBuf>,
        dataset: Option<String>,
        output: Option<PathBuf>,
    ) -> Self {
        if let Some(root) = root {
            self.root = root;
        }
        if let Some(dataset) = dataset {
            self.dataset = dataset;
        }
        if let Some(output) = output {
            self.output = output;
        }
        self
    }

    /// Répertoire du dataset à lire : `<root>/<dataset>`
    pub fn input_dir(&self) -> PathBuf {
        self.root.join(&self.dataset)
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}
