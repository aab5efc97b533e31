//! Access to the stored association results and phenotype metadata.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use sqlite::SqliteRepository;

use crate::{common::Chromosome, err::RepositoryError};

/// One association result for a variant, joined with its annotation.
#[derive(
    Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct AssociationRecord {
    /// Variant identifier, unique within one phecode's results.
    pub variant_id: String,
    /// Chromosome name.
    pub chromosome: Chromosome,
    /// Genomic position on `chromosome`.
    pub position: i64,
    /// Gene symbol of the annotated gene.
    #[builder(default)]
    pub gene: String,
    /// Putative impact (e.g., `MODERATE`).
    #[builder(default)]
    pub impact: String,
    /// Predicted effect (e.g., `missense_variant`).
    #[builder(default)]
    pub effect: String,
    /// HGVS notation on the coding sequence.
    #[builder(default)]
    pub hgvs_c: String,
    /// Minor allele frequency.
    #[builder(default)]
    pub maf: f64,
    /// Effect size (beta).
    #[builder(default)]
    pub effect_size: f64,
    /// Standard error of `effect_size`.
    #[builder(default)]
    pub standard_error: f64,
    /// -log10 of the association p-value.
    pub log10p: f64,
}

/// Phenotype metadata as stored.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, derive_new::new)]
pub struct PhenotypeRecord {
    /// Phenotype name.
    pub phenotype: String,
    /// The phecode, possibly with `_` as separator.
    pub phecode: String,
    /// Number of cases.
    pub cases: i64,
    /// Number of controls.
    pub controls: i64,
    /// Phenotype category.
    pub category: String,
}

/// Read access to association results and phenotype metadata.
///
/// Implementations must bind `phecode` as a query parameter and never
/// interpolate it into query text.
pub trait ResultRepository {
    /// Fetch all association records for `phecode`.
    fn fetch_associations(&self, phecode: &str) -> Result<Vec<AssociationRecord>, RepositoryError>;

    /// Fetch the phenotype metadata rows for `phecode`.
    fn fetch_phenotype_info(&self, phecode: &str) -> Result<Vec<PhenotypeRecord>, RepositoryError>;
}

impl<R: ResultRepository + ?Sized> ResultRepository for Box<R> {
    fn fetch_associations(&self, phecode: &str) -> Result<Vec<AssociationRecord>, RepositoryError> {
        (**self).fetch_associations(phecode)
    }

    fn fetch_phenotype_info(&self, phecode: &str) -> Result<Vec<PhenotypeRecord>, RepositoryError> {
        (**self).fetch_phenotype_info(phecode)
    }
}
