//! Code supporting the `manhattan` sub command.

use std::time::Instant;

use clap::Parser;

use crate::{
    common::trace_rss_now,
    conf::TickLabels,
    gwas::GwasData,
};

use super::{write_output, RepoArgs};

/// Output format of the Manhattan plot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum PlotFormat {
    /// Plotly figure as JSON.
    #[default]
    Json,
    /// Static SVG image.
    Svg,
}

/// Command line arguments for `manhattan` sub command.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Render Manhattan plot of one phecode", long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub repo: RepoArgs,
    /// Phecode to plot, e.g., `585_4`.
    #[arg(long)]
    pub phecode: String,
    /// Path to output file, compressed if ending in `.gz`.
    #[arg(long)]
    pub path_output: String,
    /// Output format.
    #[arg(long, value_enum, default_value_t = PlotFormat::Json)]
    pub format: PlotFormat,
    /// Override genome-wide significance threshold from configuration.
    #[arg(long)]
    pub genomewide_val: Option<f64>,
    /// Override tick label scheme from configuration.
    #[arg(long, value_enum)]
    pub tick_labels: Option<TickLabels>,
    /// Override plot title from configuration.
    #[arg(long)]
    pub title: Option<String>,
}

/// Main entry point for `manhattan` sub command.
pub fn run(common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    let before_anything = Instant::now();
    tracing::info!("args_common = {:?}", &common);
    tracing::info!("args = {:?}", &args);

    let mut conf = args.repo.load_conf()?;
    if let Some(genomewide_val) = args.genomewide_val {
        conf.plot.genomewide_val = genomewide_val;
    }
    if let Some(tick_labels) = args.tick_labels {
        conf.plot.tick_labels = tick_labels;
    }
    if let Some(title) = &args.title {
        conf.plot.title = Some(title.clone());
    }

    tracing::info!("Loading associations for phecode {}...", &args.phecode);
    let before_load = Instant::now();
    let repo = args.repo.open_repo(&conf.schema)?;
    let data = GwasData::load(&*repo, &args.phecode)?;
    tracing::info!("... done loading in {:?}", before_load.elapsed());
    trace_rss_now();

    tracing::info!("Rendering plot as {}...", args.format);
    let chart = data.manhattan_plot(&conf.plot)?;
    let content = match args.format {
        PlotFormat::Json => serde_json::to_string_pretty(&chart.to_plotly_json())?,
        PlotFormat::Svg => chart.to_svg_string()?,
    };
    write_output(&args.path_output, content.as_bytes())?;

    tracing::info!(
        "All of `manhattan` completed in {:?}",
        before_anything.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{Args, PlotFormat};
    use crate::{cli::test::tsv_repo_args, conf::TickLabels};

    fn args(path_output: String, format: PlotFormat) -> Args {
        Args {
            repo: tsv_repo_args(),
            phecode: "585_4".to_string(),
            path_output,
            format,
            genomewide_val: None,
            tick_labels: Some(TickLabels::Chromosome),
            title: None,
        }
    }

    #[test]
    fn smoke_json() -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();
        let path_output = format!("{}", tmp_dir.join("plot.json").display());

        super::run(&Default::default(), &args(path_output.clone(), PlotFormat::Json))?;

        let figure: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path_output)?)?;
        assert_eq!(3, figure["data"].as_array().map(Vec::len).unwrap_or_default());
        assert_eq!(
            serde_json::json!(["1", "2", "X"]),
            figure["layout"]["xaxis"]["ticktext"]
        );

        Ok(())
    }

    #[test]
    fn smoke_svg_gz() -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();
        let path_output = format!("{}", tmp_dir.join("plot.svg.gz").display());

        super::run(&Default::default(), &args(path_output.clone(), PlotFormat::Svg))?;

        let mut svg = String::new();
        std::io::Read::read_to_string(
            &mut crate::common::open_read_maybe_gz(&path_output)?,
            &mut svg,
        )?;
        assert_eq!(5, svg.matches("<circle").count());

        Ok(())
    }

    #[test]
    fn invalid_threshold() {
        let tmp_dir = temp_testdir::TempDir::default();
        let path_output = format!("{}", tmp_dir.join("plot.json").display());
        let args = Args {
            genomewide_val: Some(0.0),
            ..args(path_output, PlotFormat::Json)
        };

        assert!(super::run(&Default::default(), &args).is_err());
    }
}
