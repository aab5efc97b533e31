//! GWAS dashboard worker main executable

use clap::{Parser, Subcommand};
use console::{Emoji, Term};

use gwas_dash_worker::{cli, common};

/// CLI parser based on clap.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "GWAS dashboard worker",
    long_about = "This tool prepares Manhattan plots, top hits tables, and phenotype information for the GWAS dashboard"
)]
struct Cli {
    /// Commonly used arguments
    #[command(flatten)]
    common: common::Args,

    /// The sub command to run
    #[command(subcommand)]
    command: Commands,
}

/// Enum supporting the parsing of top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Render the Manhattan plot of one phecode.
    Manhattan(cli::manhattan::Args),
    /// Write the top hits table of one phecode.
    TopHits(cli::top_hits::Args),
    /// Write the phenotype information of one phecode.
    PhenoInfo(cli::pheno_info::Args),
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Build a tracing subscriber according to the configuration in `cli.common`.
    let collector = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(match cli.common.verbose.log_level() {
            Some(level) => match level {
                log::Level::Error => tracing::Level::ERROR,
                log::Level::Warn => tracing::Level::WARN,
                log::Level::Info => tracing::Level::INFO,
                log::Level::Debug => tracing::Level::DEBUG,
                log::Level::Trace => tracing::Level::TRACE,
            },
            None => tracing::Level::INFO,
        })
        .compact()
        .finish();

    // Install collector and go into sub commands.
    let term = Term::stderr();
    tracing::subscriber::with_default(collector, || {
        match &cli.command {
            Commands::Manhattan(args) => cli::manhattan::run(&cli.common, args)?,
            Commands::TopHits(args) => cli::top_hits::run(&cli.common, args)?,
            Commands::PhenoInfo(args) => cli::pheno_info::run(&cli.common, args)?,
        }

        Ok::<(), anyhow::Error>(())
    })?;
    term.write_line(&format!("All done. Have a nice day!{}", Emoji(" 😃", "")))?;

    Ok(())
}
