//! GWAS results of one phecode, prepared for display.

pub mod index;
pub mod pheno;
pub mod top_hits;

use std::time::Instant;

use thousands::Separable;

use crate::{
    conf::PlotConf,
    err::Error,
    plot::ManhattanChart,
    repo::ResultRepository,
};

pub use index::{ChromosomeTickSet, IndexedDataset, IndexedRecord};
pub use pheno::PhenotypeInfo;
pub use top_hits::{TopHit, TopHitsTable};

/// Association results of one phecode with derived tables.
///
/// Everything is computed in `load()`; afterwards the value is immutable, so
/// plots and tables may be produced from several threads.
#[derive(Debug, Clone)]
pub struct GwasData {
    phecode: String,
    dataset: IndexedDataset,
    top_hits: TopHitsTable,
}

impl GwasData {
    /// Fetch the associations of `phecode` and derive positions and top hits.
    pub fn load(repo: &dyn ResultRepository, phecode: &str) -> Result<Self, Error> {
        let before_fetch = Instant::now();
        let records = repo.fetch_associations(phecode)?;
        tracing::debug!(
            "fetched {} association records for phecode {:?} in {:?}",
            records.len().separate_with_commas(),
            phecode,
            before_fetch.elapsed()
        );

        let dataset = IndexedDataset::build(records).ok_or_else(|| Error::EmptyDataset {
            phecode: phecode.to_string(),
        })?;
        let top_hits = TopHitsTable::build(&dataset);
        tracing::debug!(
            "indexed {} records on {} chromosomes, {} top hits",
            dataset.len().separate_with_commas(),
            dataset.n_chr(),
            top_hits.len().separate_with_commas()
        );

        Ok(Self {
            phecode: phecode.to_string(),
            dataset,
            top_hits,
        })
    }

    pub fn phecode(&self) -> &str {
        &self.phecode
    }

    pub fn dataset(&self) -> &IndexedDataset {
        &self.dataset
    }

    pub fn top_hits(&self) -> &TopHitsTable {
        &self.top_hits
    }

    /// Build the Manhattan plot with the given appearance.
    pub fn manhattan_plot(&self, conf: &PlotConf) -> Result<ManhattanChart, Error> {
        ManhattanChart::build(&self.dataset, conf)
    }

    /// The top hits as HTML table.
    pub fn html_table(&self) -> String {
        self.top_hits.to_html()
    }

    /// Fetch the phenotype metadata of this phecode.
    pub fn pheno_info(&self, repo: &dyn ResultRepository) -> Result<PhenotypeInfo, Error> {
        PhenotypeInfo::resolve(repo, &self.phecode)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::GwasData;
    use crate::{conf::PlotConf, err::Error, repo::InMemoryRepository};

    #[rstest::fixture]
    fn repo() -> InMemoryRepository {
        InMemoryRepository::from_tsv("tests/data/associations.tsv", "tests/data/phenotypes.tsv")
            .unwrap()
    }

    #[rstest::rstest]
    fn load(repo: InMemoryRepository) -> Result<(), anyhow::Error> {
        let data = GwasData::load(&repo, "585_4")?;

        assert_eq!("585_4", data.phecode());
        assert_eq!(5, data.dataset().len());
        assert_eq!(3, data.dataset().n_chr());

        let ids = data
            .dataset()
            .records()
            .iter()
            .map(|r| r.record.variant_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(vec!["rs1003", "rs1001", "rs1005", "rs1002", "rs1004"], ids);

        let hits = data
            .top_hits()
            .rows()
            .iter()
            .map(|r| (r.variant_id.as_str(), r.p_value.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                ("rs1002", "3.16e-10"),
                ("rs1001", "1.00e-07"),
                ("rs1005", "3.16e-06"),
            ],
            hits
        );

        Ok(())
    }

    #[rstest::rstest]
    fn load_unknown_phecode(repo: InMemoryRepository) {
        let res = GwasData::load(&repo, "999");

        assert!(matches!(res, Err(Error::EmptyDataset { phecode }) if phecode == "999"));
    }

    #[rstest::rstest]
    fn pheno_info(repo: InMemoryRepository) -> Result<(), anyhow::Error> {
        let data = GwasData::load(&repo, "585_4")?;

        let info = data.pheno_info(&repo)?;

        assert_eq!("Chronic kidney disease, Stage IV", info.phenotype);
        assert_eq!("585.4", info.phecode);
        assert_eq!(1200, info.cases);
        assert_eq!(60000, info.controls);
        assert_eq!("Genitourinary", info.category);

        Ok(())
    }

    #[rstest::rstest]
    fn manhattan_plot(repo: InMemoryRepository) -> Result<(), anyhow::Error> {
        let data = GwasData::load(&repo, "585_4")?;

        let chart = data.manhattan_plot(&PlotConf::default())?;

        assert_eq!(5, chart.n_points());
        assert!(data.html_table().contains("<td>rs1002</td>"));

        Ok(())
    }

    #[rstest::rstest]
    fn shared_between_threads(repo: InMemoryRepository) -> Result<(), anyhow::Error> {
        let data = std::sync::Arc::new(GwasData::load(&repo, "585_4")?);

        let handles = (0..4)
            .map(|_| {
                let data = data.clone();
                std::thread::spawn(move || data.html_table())
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(data.html_table(), handle.join().expect("thread panicked"));
        }

        Ok(())
    }
}
