//! Assemblage des collections de sortie
//!
//! Les tables de résolution sont construites avant l'appel de ces modules ;
//! chaque assembleur produit de nouveaux enregistrements sans modifier ses entrées.

pub mod line;
pub mod station;
pub mod tree;

pub use line::LineAssembly;
pub use station::StationAssembly;
