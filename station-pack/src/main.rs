//! Point d'entrée CLI pour station-pack

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::{BuildArgs, Commands};

/// Construire la base de stations consolidée (MessagePack) depuis le dataset JSON
#[derive(Parser)]
#[command(name = "station-pack")]
#[command(author, version)]
#[command(about = "Build the consolidated station database (MessagePack) from the JSON dataset")]
#[command(long_about = "Réconcilie stations, lignes, voisinage de Delaunay et arbre de recherche en un artefact MessagePack unique.\n\nPar défaut, lance le build. Utilisez 'decode' pour inspecter un artefact.")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Sous-commande (défaut: build)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Arguments du build (commande par défaut)
    #[command(flatten)]
    build: Option<BuildArgs>,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Some(Commands::Decode { input, output }) => {
            info!(input = %input.display(), "Decode artifact");
            cli::cmd_decode(&input, output.as_deref())?;
        }
        Some(Commands::Build(args)) => {
            cli::cmd_build(&args)?;
        }
        None => {
            // Commande par défaut: build
            let args = cli.build.unwrap_or_default();
            cli::cmd_build(&args)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
