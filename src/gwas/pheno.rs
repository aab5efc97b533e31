//! Normalization of phenotype metadata for display.

use crate::{
    common::title_case,
    err::Error,
    repo::{PhenotypeRecord, ResultRepository},
};

/// CKD stage phecodes whose curated names are displayed unmodified.
pub const STAGE_CODES: &[&str] = &["585.4", "585.33", "585.34"];

/// Normalize the phecode separator from `_` to `.`.
pub fn normalize_phecode(phecode: &str) -> String {
    phecode.replace('_', ".")
}

/// Whether the (normalized) `phecode` is one of `STAGE_CODES`.
pub fn is_stage_code(phecode: &str) -> bool {
    STAGE_CODES.contains(&phecode)
}

/// Phenotype metadata ready for display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PhenotypeInfo {
    /// Display name of the phenotype.
    pub phenotype: String,
    /// Phecode with `.` as separator.
    pub phecode: String,
    /// Number of cases.
    pub cases: i64,
    /// Number of controls.
    pub controls: i64,
    /// Display name of the category.
    pub category: String,
}

impl From<PhenotypeRecord> for PhenotypeInfo {
    fn from(record: PhenotypeRecord) -> Self {
        let phecode = normalize_phecode(&record.phecode);
        let phenotype = if is_stage_code(&phecode) {
            record.phenotype
        } else {
            title_case(&record.phenotype)
        };
        Self {
            phenotype,
            phecode,
            cases: record.cases,
            controls: record.controls,
            category: title_case(&record.category),
        }
    }
}

impl PhenotypeInfo {
    /// Fetch and normalize the metadata for `phecode`.
    ///
    /// If the repository returns more than one row, the last one is used.
    pub fn resolve(repo: &dyn ResultRepository, phecode: &str) -> Result<Self, Error> {
        let mut records = repo.fetch_phenotype_info(phecode)?;
        if records.len() > 1 {
            tracing::warn!(
                "{} phenotype records for phecode {:?}, using the last one",
                records.len(),
                phecode
            );
        }
        records
            .pop()
            .map(PhenotypeInfo::from)
            .ok_or_else(|| Error::PhenotypeNotFound {
                phecode: phecode.to_string(),
            })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::PhenotypeInfo;
    use crate::{
        err::Error,
        repo::{InMemoryRepository, PhenotypeRecord},
    };

    fn record(phenotype: &str, phecode: &str, category: &str) -> PhenotypeRecord {
        PhenotypeRecord::new(
            phenotype.to_string(),
            phecode.to_string(),
            100,
            1000,
            category.to_string(),
        )
    }

    #[rstest::rstest]
    #[case("585_4", "585.4", true)]
    #[case("585_33", "585.33", true)]
    #[case("585.34", "585.34", true)]
    #[case("584_4", "584.4", false)]
    #[case("250_2", "250.2", false)]
    #[case("585", "585", false)]
    fn stage_codes(#[case] raw: &str, #[case] normalized: &str, #[case] is_stage: bool) {
        assert_eq!(normalized, super::normalize_phecode(raw));
        assert_eq!(is_stage, super::is_stage_code(normalized));
    }

    #[test]
    fn stage_code_keeps_name() {
        let info = PhenotypeInfo::from(record(
            "Chronic kidney disease, Stage IV",
            "585_4",
            "genitourinary",
        ));

        assert_eq!(
            PhenotypeInfo {
                phenotype: "Chronic kidney disease, Stage IV".to_string(),
                phecode: "585.4".to_string(),
                cases: 100,
                controls: 1000,
                category: "Genitourinary".to_string(),
            },
            info
        );
    }

    #[test]
    fn other_codes_are_title_cased() {
        let info = PhenotypeInfo::from(record(
            "type 2 diabetes",
            "250_2",
            "endocrine/metabolic",
        ));

        assert_eq!("Type 2 Diabetes", info.phenotype);
        assert_eq!("250.2", info.phecode);
        assert_eq!("Endocrine/Metabolic", info.category);
    }

    #[test]
    fn resolve() -> Result<(), anyhow::Error> {
        let repo = InMemoryRepository::new().with_phenotype(record(
            "type 2 diabetes",
            "250_2",
            "endocrine/metabolic",
        ));

        let info = PhenotypeInfo::resolve(&repo, "250_2")?;

        assert_eq!("Type 2 Diabetes", info.phenotype);

        Ok(())
    }

    #[test]
    fn resolve_not_found() {
        let repo = InMemoryRepository::new();

        let res = PhenotypeInfo::resolve(&repo, "250_2");

        assert!(matches!(res, Err(Error::PhenotypeNotFound { phecode }) if phecode == "250_2"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn resolve_multiple_uses_last() {
        let repo = InMemoryRepository::new()
            .with_phenotype(record("first", "250_2", "a"))
            .with_phenotype(record("second", "250_2", "b"));

        let info = PhenotypeInfo::resolve(&repo, "250_2").unwrap();

        assert_eq!("Second", info.phenotype);
        assert!(logs_contain("using the last one"));
    }

    #[test]
    fn serializes_as_mapping() -> Result<(), anyhow::Error> {
        let info = PhenotypeInfo::from(record("asthma", "495", "respiratory"));

        assert_eq!(
            serde_json::json!({
                "phenotype": "Asthma",
                "phecode": "495",
                "cases": 100,
                "controls": 1000,
                "category": "Respiratory"
            }),
            serde_json::to_value(&info)?
        );

        Ok(())
    }
}
