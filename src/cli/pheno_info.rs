//! Code supporting the `pheno-info` sub command.

use std::time::Instant;

use clap::Parser;

use crate::gwas::PhenotypeInfo;

use super::{write_output, RepoArgs};

/// Command line arguments for `pheno-info` sub command.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Write phenotype information of one phecode", long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub repo: RepoArgs,
    /// Phecode to use, e.g., `585_4`.
    #[arg(long)]
    pub phecode: String,
    /// Path to output JSON file, compressed if ending in `.gz`.
    #[arg(long)]
    pub path_output: String,
}

/// Main entry point for `pheno-info` sub command.
pub fn run(common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    let before_anything = Instant::now();
    tracing::info!("args_common = {:?}", &common);
    tracing::info!("args = {:?}", &args);

    let conf = args.repo.load_conf()?;
    let repo = args.repo.open_repo(&conf.schema)?;
    let info = PhenotypeInfo::resolve(&*repo, &args.phecode)?;
    tracing::debug!("phenotype info = {:?}", &info);
    write_output(&args.path_output, &serde_json::to_vec_pretty(&info)?)?;

    tracing::info!(
        "All of `pheno-info` completed in {:?}",
        before_anything.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::Args;
    use crate::cli::test::tsv_repo_args;

    #[test]
    fn smoke() -> Result<(), anyhow::Error> {
        let tmp_dir = temp_testdir::TempDir::default();
        let path_output = format!("{}", tmp_dir.join("pheno.json").display());
        let args = Args {
            repo: tsv_repo_args(),
            phecode: "250_2".to_string(),
            path_output: path_output.clone(),
        };

        super::run(&Default::default(), &args)?;

        let info: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path_output)?)?;
        assert_eq!(
            serde_json::json!({
                "phenotype": "Type 2 Diabetes",
                "phecode": "250.2",
                "cases": 8000,
                "controls": 50000,
                "category": "Endocrine/Metabolic"
            }),
            info
        );

        Ok(())
    }

    #[test]
    fn not_found() {
        let tmp_dir = temp_testdir::TempDir::default();
        let args = Args {
            repo: tsv_repo_args(),
            phecode: "999".to_string(),
            path_output: format!("{}", tmp_dir.join("pheno.json").display()),
        };

        assert!(super::run(&Default::default(), &args).is_err());
    }
}
