//! In-memory repository, optionally loaded from TSV files.

use std::{collections::HashMap, path::Path};

use thousands::Separable;

use crate::{common::open_read_maybe_gz, err::RepositoryError};

use super::{AssociationRecord, PhenotypeRecord, ResultRepository};

/// Row of the associations TSV file.
#[derive(Debug, serde::Deserialize)]
struct AssociationRow {
    #[serde(rename = "PHECODE")]
    phecode: String,
    #[serde(rename = "VAR_ID")]
    variant_id: String,
    #[serde(rename = "CHR")]
    chromosome: String,
    #[serde(rename = "POS")]
    position: i64,
    #[serde(rename = "GENE", default)]
    gene: String,
    #[serde(rename = "IMPACT", default)]
    impact: String,
    #[serde(rename = "EFFECT", default)]
    effect: String,
    #[serde(rename = "HGVS_c", default)]
    hgvs_c: String,
    #[serde(rename = "MAF")]
    maf: f64,
    #[serde(rename = "EFFECTSIZE")]
    effect_size: f64,
    #[serde(rename = "SE")]
    standard_error: f64,
    #[serde(rename = "LOG10P")]
    log10p: f64,
}

impl AssociationRow {
    /// Split into phecode and record.
    fn into_parts(self) -> (String, AssociationRecord) {
        (
            self.phecode,
            AssociationRecord {
                variant_id: self.variant_id,
                chromosome: self.chromosome.into(),
                position: self.position,
                gene: self.gene,
                impact: self.impact,
                effect: self.effect,
                hgvs_c: self.hgvs_c,
                maf: self.maf,
                effect_size: self.effect_size,
                standard_error: self.standard_error,
                log10p: self.log10p,
            },
        )
    }
}

/// Row of the phenotypes TSV file.
#[derive(Debug, serde::Deserialize)]
struct PhenotypeRow {
    phenotype: String,
    #[serde(rename = "PHECODE")]
    phecode: String,
    cases: i64,
    controls: i64,
    category: String,
}

impl From<PhenotypeRow> for PhenotypeRecord {
    fn from(row: PhenotypeRow) -> Self {
        PhenotypeRecord::new(
            row.phenotype,
            row.phecode,
            row.cases,
            row.controls,
            row.category,
        )
    }
}

/// Repository keeping all records in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRepository {
    /// Association records by phecode, in insertion order.
    associations: HashMap<String, Vec<AssociationRecord>>,
    /// Phenotype records in insertion order.
    phenotypes: Vec<PhenotypeRecord>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one association record for `phecode`.
    pub fn with_association<S: Into<String>>(mut self, phecode: S, record: AssociationRecord) -> Self {
        self.associations
            .entry(phecode.into())
            .or_default()
            .push(record);
        self
    }

    /// Add association records for `phecode`.
    pub fn with_associations<S, I>(mut self, phecode: S, records: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = AssociationRecord>,
    {
        self.associations
            .entry(phecode.into())
            .or_default()
            .extend(records);
        self
    }

    /// Add one phenotype record.
    pub fn with_phenotype(mut self, record: PhenotypeRecord) -> Self {
        self.phenotypes.push(record);
        self
    }

    /// Load from associations and phenotypes TSV files (optionally gzip-compressed).
    pub fn from_tsv<P, Q>(path_associations: P, path_phenotypes: Q) -> Result<Self, RepositoryError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let mut result = Self::default();

        tracing::debug!("Loading associations from {:?}", path_associations.as_ref());
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(open_read_maybe_gz(path_associations.as_ref())?);
        let mut count = 0usize;
        for row in reader.deserialize::<AssociationRow>() {
            let (phecode, record) = row?.into_parts();
            result = result.with_association(phecode, record);
            count += 1;
        }
        tracing::debug!("... loaded {} association records", count.separate_with_commas());

        tracing::debug!("Loading phenotypes from {:?}", path_phenotypes.as_ref());
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(open_read_maybe_gz(path_phenotypes.as_ref())?);
        for row in reader.deserialize::<PhenotypeRow>() {
            result.phenotypes.push(row?.into());
        }
        tracing::debug!(
            "... loaded {} phenotype records",
            result.phenotypes.len().separate_with_commas()
        );

        Ok(result)
    }
}

impl ResultRepository for InMemoryRepository {
    fn fetch_associations(&self, phecode: &str) -> Result<Vec<AssociationRecord>, RepositoryError> {
        Ok(self.associations.get(phecode).cloned().unwrap_or_default())
    }

    fn fetch_phenotype_info(&self, phecode: &str) -> Result<Vec<PhenotypeRecord>, RepositoryError> {
        Ok(self
            .phenotypes
            .iter()
            .filter(|record| record.phecode == phecode)
            .cloned()
            .collect())
    }
}
