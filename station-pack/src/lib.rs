//! # station-pack
//!
//! Construction de l'artefact `station_database.msgpack` à partir du dataset JSON.
//!
//! ## Usage CLI
//!
//! ```bash
//! # Build du dataset par défaut (./station_database/out/main)
//! station-pack
//! station-pack --dataset extra --output extra.msgpack --report report.json
//!
//! # Inspection d'un artefact
//! station-pack decode --input station_database.msgpack --output station_database.json
//! ```

pub mod config;
pub mod report;

pub use config::BuildConfig;
pub use report::{BuildReport, BuildStatus};
