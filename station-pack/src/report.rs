//! Rapport de build
//!
//! Résume les compteurs, les anomalies tolérées et l'artefact produit.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use station_database::{BuildStats, Warning};

/// Statut global du build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BuildStatus {
    /// Artefact écrit sans aucune anomalie
    Success,
    /// Artefact écrit, des entités ont été dégradées ou ignorées
    SuccessWithWarnings,
}

/// Anomalie tolérée, avec l'entité concernée
#[derive(Debug, Clone, Serialize)]
pub struct BuildWarning {
    pub entity: String,
    pub message: String,
}

impl From<&Warning> for BuildWarning {
    fn from(warning: &Warning) -> Self {
        Self {
            entity: warning.entity(),
            message: warning.to_string(),
        }
    }
}

/// Rapport complet de build
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Nom du dataset
    pub dataset: String,
    pub duration_secs: f64,
    pub status: BuildStatus,

    pub stations: usize,
    /// Frontières LineString converties en Polygon
    pub voronoi_converted: usize,
    pub lines: usize,
    /// Lignes sans détail, absentes de l'artefact
    pub lines_skipped: usize,
    pub polylines_missing: usize,
    pub tree_nodes: usize,

    /// Chemin de l'artefact MessagePack
    pub artifact: Option<PathBuf>,
    pub artifact_bytes: usize,
    /// Hash BLAKE3 de l'artefact
    pub checksum: Option<String>,

    pub warnings: Vec<BuildWarning>,
}

impl BuildReport {
    /// Crée un rapport pour un dataset
    pub fn new(dataset: &str) -> Self {
        Self {
            dataset: dataset.to_string(),
            duration_secs: 0.0,
            status: BuildStatus::Success,
            stations: 0,
            voronoi_converted: 0,
            lines: 0,
            lines_skipped: 0,
            polylines_missing: 0,
            tree_nodes: 0,
            artifact: None,
            artifact_bytes: 0,
            checksum: None,
            warnings: Vec::new(),
        }
    }

    /// Reporte les compteurs du build
    pub fn record_stats(&mut self, stats: &BuildStats) {
        self.stations = stats.stations;
        self.voronoi_converted = stats.voronoi_converted;
        self.lines = stats.lines;
        self.lines_skipped = stats.lines_skipped;
        self.polylines_missing = stats.polylines_missing;
        self.tree_nodes = stats.tree_nodes;
    }

    pub fn record_warnings(&mut self, warnings: &[Warning]) {
        self.warnings.extend(warnings.iter().map(BuildWarning::from));
    }

    /// Enregistre l'artefact écrit
    pub fn record_artifact(&mut self, path: &Path, bytes: usize, checksum: String) {
        self.artifact = Some(path.to_path_buf());
        self.artifact_bytes = bytes;
        self.checksum = Some(checksum);
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        self.status = if self.warnings.is_empty() {
            BuildStatus::Success
        } else {
            BuildStatus::SuccessWithWarnings
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("BUILD REPORT - Dataset {}", self.dataset);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);

        println!("\n--- SUMMARY ---");
        println!(
            "Stations: {} ({} voronoi converted to Polygon)",
            self.stations, self.voronoi_converted
        );
        println!(
            "Lines: {} written, {} skipped, {} without polyline",
            self.lines, self.lines_skipped, self.polylines_missing
        );
        println!("Tree: {} nodes", self.tree_nodes);

        if let Some(artifact) = &self.artifact {
            println!("\n--- ARTIFACT ---");
            println!("  {} ({} bytes)", artifact.display(), self.artifact_bytes);
            if let Some(checksum) = &self.checksum {
                println!("  blake3: {}", checksum);
            }
        }

        if !self.warnings.is_empty() {
            println!("\n--- WARNINGS ({}) ---", self.warnings.len());
            for w in self.warnings.iter().take(20) {
                println!("  [{}] {}", w.entity, w.message);
            }
            if self.warnings.len() > 20 {
                println!("  ... and {} more", self.warnings.len() - 20);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}: {} stations, {} lines, {} tree nodes, {} warnings",
            self.dataset,
            self.stations,
            self.lines,
            self.tree_nodes,
            self.warnings.len()
        )
    }
}
