//! Définition et implémentation des commandes CLI
//!
//! - `build` (défaut) : dataset JSON → artefact MessagePack
//! - `decode` : artefact MessagePack → JSON indenté

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::info;

use station_database::encode;
use station_pack::{BuildConfig, BuildReport};

#[derive(Subcommand)]
pub enum Commands {
    /// Build the MessagePack artifact from the JSON dataset
    Build(BuildArgs),

    /// Decode an artifact into indented JSON
    Decode {
        /// Path to the MessagePack artifact
        #[arg(short, long, default_value = "station_database.msgpack")]
        input: PathBuf,

        /// Output JSON file (défaut : stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Directory holding the generated datasets (défaut : env STATION_DATABASE_ROOT / ./station_database/out)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Dataset name under the root directory (défaut : env STATION_DATABASE_DATASET / main)
    #[arg(long)]
    pub dataset: Option<String>,

    /// Output artifact (défaut : env STATION_DATABASE_OUTPUT / station_database.msgpack)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Save the build report as JSON
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Exécute la commande build
pub fn cmd_build(args: &BuildArgs) -> Result<BuildReport> {
    let config = BuildConfig::from_env().apply_overrides(
        args.root.clone(),
        args.dataset.clone(),
        args.output.clone(),
    );
    let input = config.input_dir();
    let start = Instant::now();

    info!(input = %input.display(), output = %config.output().display(), "Building station database");

    let output = station_database::build(&input)
        .with_context(|| format!("Build failed for dataset {}", config.dataset))?;

    let bytes = encode::write_artifact(config.output(), &output.document)
        .with_context(|| format!("Cannot write {}", config.output().display()))?;
    let checksum = compute_file_checksum(config.output())?;

    let mut report = BuildReport::new(&config.dataset);
    report.record_stats(&output.stats);
    report.record_warnings(&output.warnings);
    report.record_artifact(config.output(), bytes, checksum);
    report.set_duration(start.elapsed());
    report.finalize();

    report.display();

    if let Some(path) = &args.report {
        report
            .save_to_file(path)
            .with_context(|| format!("Cannot write report {}", path.display()))?;
        info!(report = %path.display(), "Report saved");
    }

    info!("{}", report.summary());
    Ok(report)
}

/// Exécute la commande decode
pub fn cmd_decode(input: &Path, output: Option<&Path>) -> Result<()> {
    let bytes = std::fs::read(input).with_context(|| format!("Cannot open {}", input.display()))?;
    let value = encode::decode_value(&bytes)
        .with_context(|| format!("Cannot decode {}", input.display()))?;
    let json = encode::to_pretty_json(&value)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            info!(input = %input.display(), output = %path.display(), "Artifact decoded");
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Calcule le hash BLAKE3 d'un fichier
fn compute_file_checksum(path: &Path) -> Result<String> {
    use std::fs::File;
    use std::io::Read;

    let mut file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 65536]; // 64KB buffer

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_file_checksum() {
        let path = std::env::temp_dir().join(format!("station-pack-checksum-{}", std::process::id()));
        std::fs::write(&path, b"station_database").unwrap();

        let checksum = compute_file_checksum(&path).unwrap();
        assert_eq!(checksum, blake3::hash(b"station_database").to_hex().to_string());
        assert_eq!(checksum.len(), 64);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_checksum_missing_file() {
        assert!(compute_file_checksum(Path::new("nonexistent.msgpack")).is_err());
    }

    #[test]
    fn test_build_missing_root() {
        let args = BuildArgs {
            root: Some(PathBuf::from("nonexistent/station_database/out")),
            dataset: Some("main".to_string()),
            output: Some(std::env::temp_dir().join("station-pack-never-written.msgpack")),
            report: None,
        };

        let err = cmd_build(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("station_database not found"));
    }
}
