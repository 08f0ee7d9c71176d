use clap::{Parser, Subcommand, crate_name};
use color_eyre::eyre::Result;
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{
    information::Information, manifest::Manifest, query::Query, search::Search,
};

mod commands;

fn main() -> Result<()> {
    color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .install()?;

    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Manifest(manifest) => manifest.run(),
        Commands::Search(search) => search.run(),
        Commands::Information(information) => information.run(),
        Commands::Query(query) => query.run(),
    }
}

fn setup_logging(verbose: bool) {
    let crate_level = if verbose { Level::TRACE } else { Level::INFO };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(cfg!(debug_assertions))
                .without_time(),
        )
        .with(
            filter::Targets::new()
                .with_default(LevelFilter::INFO)
                .with_target(crate_name!().replace('-', "_"), crate_level),
        )
        .init();
}

#[derive(Parser)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
struct Cli {
    #[arg(short = 'v', short_alias = 'V', long, action = clap::builder::ArgAction::Version)]
    version: (),
    /// Log skipped and dropped payload content
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Manifest(Manifest),
    Search(Search),
    Information(Information),
    Query(Query),
}
