//! Code supporting the `top-hits` sub command.

use std::time::Instant;

use clap::Parser;
use thousands::Separable;

use crate::{common::trace_rss_now, gwas::GwasData};

use super::{write_output, RepoArgs};

/// Output format of the top hits table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum TableFormat {
    #[default]
    Html,
    Tsv,
    Json,
}

/// Command line arguments for `top-hits` sub command.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Write table of top hits of one phecode", long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub repo: RepoArgs,
    /// Phecode to use, e.g., `585_4`.
    #[arg(long)]
    pub phecode: String,
    /// Path to output file, compressed if ending in `.gz`.
    #[arg(long)]
    pub path_output: String,
    /// Output format.
    #[arg(long, value_enum, default_value_t = TableFormat::Html)]
    pub format: TableFormat,
}

/// Main entry point for `top-hits` sub command.
pub fn run(common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    let before_anything = Instant::now();
    tracing::info!("args_common = {:?}", &common);
    tracing::info!("args = {:?}", &args);

    let conf = args.repo.load_conf()?;
    let repo = args.repo.open_repo(&conf.schema)?;
    let data = GwasData::load(&*repo, &args.phecode)?;
    trace_rss_now();

    let top_hits = data.top_hits();
    tracing::info!(
        "Writing {} top hits as {}",
        top_hits.len().separate_with_commas(),
        args.format
    );
    let content = match args.format {
        TableFormat::Html => data.html_table().into_bytes(),
        TableFormat::Tsv => {
            let mut buf = Vec::new();
            top_hits.write_tsv(&mut buf)?;
            buf
        }
        TableFormat::Json => serde_json::to_vec_pretty(top_hits)?,
    };
    write_output(&args.path_output, &content)?;

    tracing::info!(
        "All of `top-hits` completed in {:?}",
        before_anything.elapsed()
    );
    Ok(())
}
