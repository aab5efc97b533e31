//! Assignment of genome-relative positions and chromosome ticks.

use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
    common::{display_float, round_to, Chromosome},
    repo::AssociationRecord,
};

/// An association record with its plotting coordinate.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct IndexedRecord {
    /// The underlying record.
    #[serde(flatten)]
    pub record: AssociationRecord,
    /// 0-based rank of the record when sorted by chromosome and position.
    pub relative_position: usize,
    /// Effect size with standard error, e.g., `1.23(0.057)`.
    pub effect_display: String,
}

/// Format effect size and standard error for display.
pub fn effect_display(effect_size: f64, standard_error: f64) -> String {
    format!(
        "{}({})",
        display_float(round_to(effect_size, 2)),
        display_float(round_to(standard_error, 3))
    )
}

/// Median relative position of each chromosome, in chromosome order.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ChromosomeTickSet {
    ticks: IndexMap<Chromosome, f64>,
}

impl ChromosomeTickSet {
    /// Number of distinct chromosomes.
    pub fn n_chr(&self) -> usize {
        self.ticks.len()
    }

    /// Tick position of `chromosome`, if present.
    pub fn get(&self, chromosome: &Chromosome) -> Option<f64> {
        self.ticks.get(chromosome).copied()
    }

    /// Iterate chromosomes and tick positions in chromosome order.
    pub fn iter(&self) -> impl Iterator<Item = (&Chromosome, f64)> {
        self.ticks.iter().map(|(chrom, tick)| (chrom, *tick))
    }
}

/// Median of a sorted, non-empty slice.
fn median(sorted: &[usize]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
    }
}

/// Association records of one phecode, sorted and indexed for plotting.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedDataset {
    records: Vec<IndexedRecord>,
    ticks: ChromosomeTickSet,
}

impl IndexedDataset {
    /// Sort `records` by chromosome and position and assign relative positions.
    ///
    /// The sort is stable: records with the same chromosome and position keep
    /// their input order.  Returns `None` if `records` is empty.
    pub fn build(mut records: Vec<AssociationRecord>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        records.sort_by(|a, b| {
            (&a.chromosome, a.position).cmp(&(&b.chromosome, b.position))
        });

        let records = records
            .into_iter()
            .enumerate()
            .map(|(relative_position, record)| IndexedRecord {
                effect_display: effect_display(record.effect_size, record.standard_error),
                relative_position,
                record,
            })
            .collect::<Vec<_>>();

        // Records of one chromosome are contiguous after sorting.
        let ticks = records
            .iter()
            .group_by(|r| r.record.chromosome.clone())
            .into_iter()
            .map(|(chrom, group)| {
                let positions = group.map(|r| r.relative_position).collect::<Vec<_>>();
                (chrom, median(&positions))
            })
            .collect::<IndexMap<_, _>>();

        Some(Self {
            records,
            ticks: ChromosomeTickSet { ticks },
        })
    }

    /// Records in relative position order.
    pub fn records(&self) -> &[IndexedRecord] {
        &self.records
    }

    /// Per-chromosome tick positions.
    pub fn ticks(&self) -> &ChromosomeTickSet {
        &self.ticks
    }

    /// Number of distinct chromosomes.
    pub fn n_chr(&self) -> usize {
        self.ticks.n_chr()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records, never the case for a built dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Largest relative position.
    pub fn max_relative_position(&self) -> usize {
        self.records.len() - 1
    }
}
