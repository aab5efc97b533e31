//! Code for supporting the configuration file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::err::Error;

/// Names of the tables to read from.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(default)]
pub struct SchemaConf {
    /// Variant annotation table (`VAR_ID`, `CHR`, `POS`, `GENE`, ...).
    pub variants_table: String,
    /// Association statistics table (`VAR_ID`, `PHECODE`, `MAF`, ...).
    pub stats_table: String,
    /// Phenotype metadata table (`phenotype`, `PHECODE`, `cases`, ...).
    pub phenotypes_table: String,
}

impl Default for SchemaConf {
    fn default() -> Self {
        Self {
            variants_table: "variants".to_string(),
            stats_table: "association_stats".to_string(),
            phenotypes_table: "phenotypes".to_string(),
        }
    }
}

/// How to label the chromosome ticks on the x axis.
#[derive(
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Debug,
    Default,
    clap::ValueEnum,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TickLabels {
    /// Sequential numbers `1..=n` in chromosome order.
    #[default]
    Sequential,
    /// The chromosome names.
    Chromosome,
}

/// Manhattan plot appearance.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(default)]
pub struct PlotConf {
    /// Genome-wide significance threshold (p-value).
    pub genomewide_val: f64,
    /// Colors cycled through by chromosome, as `#RRGGBB`.
    pub palette: Vec<String>,
    /// Color of the significance reference line.
    pub reference_line_color: String,
    /// Tick label scheme for the x axis.
    pub tick_labels: TickLabels,
    /// Width of rendered images in pixels.
    pub width: u32,
    /// Height of rendered images in pixels.
    pub height: u32,
    /// Optional title.
    pub title: Option<String>,
}

impl Default for PlotConf {
    fn default() -> Self {
        Self {
            genomewide_val: 5e-8,
            palette: vec!["#0093D4".to_string(), "#0029D4".to_string()],
            // LightSeaGreen
            reference_line_color: "#20B2AA".to_string(),
            tick_labels: TickLabels::default(),
            width: 1200,
            height: 500,
            title: None,
        }
    }
}

impl PlotConf {
    /// Check palette and colors.
    pub fn validate(&self) -> Result<(), Error> {
        if self.palette.is_empty() {
            return Err(Error::Config("palette must not be empty".to_string()));
        }
        for color in self.palette.iter().chain(std::iter::once(&self.reference_line_color)) {
            parse_hex_color(color)?;
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "invalid plot size {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Parse a `#RRGGBB` color into its components.
pub fn parse_hex_color(color: &str) -> Result<(u8, u8, u8), Error> {
    let invalid = || Error::Config(format!("invalid color {:?}, expected #RRGGBB", color));
    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

/// Top-level configuration.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Default)]
#[serde(default)]
pub struct Top {
    /// Table names.
    pub schema: SchemaConf,
    /// Plot appearance.
    pub plot: PlotConf,
}

impl Top {
    /// Load configuration from TOML file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let toml_str = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!("could not read {:?}: {}", path.as_ref(), e))
        })?;
        Self::from_toml(&toml_str)
    }

    /// Parse and validate configuration from TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, Error> {
        let conf: Top = toml::from_str(toml_str).map_err(|e| Error::Config(e.to_string()))?;
        conf.plot.validate()?;
        Ok(conf)
    }
}
