//! Collecte des anomalies tolérées
//!
//! Chaque warning est journalisé immédiatement (avec l'entité fautive en champ
//! structuré) et conservé pour le rapport de fin de build.

use tracing::warn;

use crate::error::Warning;

#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Journalise et enregistre un warning
    pub fn warn(&mut self, warning: Warning) {
        warn!(entity = %warning.entity(), "{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
