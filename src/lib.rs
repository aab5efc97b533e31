//! Shaping of GWAS association results for a results dashboard.
//!
//! Association records of one phecode are fetched from a `repo::ResultRepository`,
//! placed on a genome-relative axis and turned into a Manhattan plot, a table
//! of top hits, and normalized phenotype metadata.

pub mod cli;
pub mod common;
pub mod conf;
pub mod err;
pub mod gwas;
pub mod plot;
pub mod repo;
