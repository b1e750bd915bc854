mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand, seo::SeoSubcommand, tom::TomSubcommand, voice::VoiceSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "yp",
    about = "Youth Performance ops: SEO task seeding, Tom routing, and brand voice checks",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .yp/ or .git/)
    #[arg(long, global = true, env = "YP_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, score, and upload SEO content tasks
    Seo {
        #[command(subcommand)]
        subcommand: SeoSubcommand,
    },

    /// Inspect Tom's mode detection, classification, and routing
    Tom {
        #[command(subcommand)]
        subcommand: TomSubcommand,
    },

    /// List voice profiles and lint content against them
    Voice {
        #[command(subcommand)]
        subcommand: VoiceSubcommand,
    },

    /// Show or validate .yp/config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Seo {
            subcommand: SeoSubcommand::Seed { .. },
        }
        | Commands::Tom {
            subcommand: TomSubcommand::Route { .. },
        } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Seo { subcommand } => cmd::seo::run(&root, subcommand, cli.json),
        Commands::Tom { subcommand } => cmd::tom::run(&root, subcommand, cli.json),
        Commands::Voice { subcommand } => cmd::voice::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
