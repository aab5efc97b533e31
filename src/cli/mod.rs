//! Implementation of the sub commands.

pub mod manhattan;
pub mod pheno_info;
pub mod top_hits;

use std::io::Write;

use crate::{
    common::open_write_maybe_gz,
    conf::{SchemaConf, Top},
    repo::{InMemoryRepository, ResultRepository, SqliteRepository},
};

/// Arguments selecting the result repository, shared by all sub commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RepoArgs {
    /// Path to SQLite database with the association results.
    #[arg(long, conflicts_with_all = ["path_associations", "path_phenotypes"])]
    pub path_db: Option<String>,
    /// Path to TSV file with association records (alternative to `--path-db`).
    #[arg(long, requires = "path_phenotypes")]
    pub path_associations: Option<String>,
    /// Path to TSV file with phenotype records (alternative to `--path-db`).
    #[arg(long, requires = "path_associations")]
    pub path_phenotypes: Option<String>,
    /// Optional path to TOML configuration file.
    #[arg(long)]
    pub path_conf: Option<String>,
}

impl RepoArgs {
    /// Load configuration file or use the defaults.
    pub fn load_conf(&self) -> Result<Top, anyhow::Error> {
        match &self.path_conf {
            Some(path) => {
                let path = shellexpand::tilde(path);
                tracing::info!("Loading configuration from {}", &path);
                Ok(Top::load(&*path)?)
            }
            None => Ok(Top::default()),
        }
    }

    /// Open the repository selected on the command line.
    pub fn open_repo(&self, schema: &SchemaConf) -> Result<Box<dyn ResultRepository>, anyhow::Error> {
        match (&self.path_db, &self.path_associations, &self.path_phenotypes) {
            (Some(path_db), _, _) => {
                let path_db = shellexpand::tilde(path_db);
                tracing::info!("Opening SQLite database {}", &path_db);
                Ok(Box::new(SqliteRepository::open(&*path_db, schema)?))
            }
            (None, Some(path_associations), Some(path_phenotypes)) => {
                let path_associations = shellexpand::tilde(path_associations);
                let path_phenotypes = shellexpand::tilde(path_phenotypes);
                tracing::info!(
                    "Reading TSV files {} and {}",
                    &path_associations,
                    &path_phenotypes
                );
                Ok(Box::new(InMemoryRepository::from_tsv(
                    &*path_associations,
                    &*path_phenotypes,
                )?))
            }
            _ => anyhow::bail!(
                "either --path-db or both --path-associations and --path-phenotypes are required"
            ),
        }
    }
}

/// Write `content` to `path`, compressing if the name ends in `.gz`.
pub fn write_output(path: &str, content: &[u8]) -> Result<(), anyhow::Error> {
    let path = shellexpand::tilde(path);
    let mut writer = open_write_maybe_gz(&*path)?;
    writer.write_all(content)?;
    writer.flush()?;
    Ok(())
}
