//! Manhattan plot of an indexed dataset.

pub mod plotly;
pub mod svg;

use serde::Serialize;

use crate::{
    conf::{PlotConf, TickLabels},
    err::Error,
    gwas::IndexedDataset,
};

/// Hover template; `customdata` indices follow the fields of `HoverData`.
pub const HOVER_TEMPLATE: &str = "VAR_ID: %{customdata[0]}<br>\
     LOG10P: %{y:.2f}<br>\
     Beta: %{customdata[5]}<br>\
     Gene: %{customdata[1]}<br>\
     Impact: %{customdata[2]}<br>\
     Effect: %{customdata[3]}<br>\
     <extra></extra>";

/// Width of the reference line in pixels.
pub const REFERENCE_LINE_WIDTH: u32 = 2;

/// Metadata shown when hovering over a point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverData {
    pub variant_id: String,
    pub gene: String,
    pub impact: String,
    pub effect: String,
    pub maf: f64,
    pub effect_display: String,
}

impl HoverData {
    /// Values in `customdata` order.
    pub fn to_custom_data(&self) -> serde_json::Value {
        serde_json::json!([
            self.variant_id,
            self.gene,
            self.impact,
            self.effect,
            self.maf,
            self.effect_display
        ])
    }
}

/// Points of one chromosome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    /// Chromosome name.
    pub name: String,
    /// Marker color as `#RRGGBB`.
    pub color: String,
    pub x: Vec<usize>,
    pub y: Vec<f64>,
    pub hover: Vec<HoverData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    pub tick_values: Vec<f64>,
    pub tick_text: Vec<String>,
    pub tick_angle: i32,
}

/// Horizontal line at the genome-wide significance level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub x0: f64,
    pub x1: f64,
    pub y: f64,
    pub color: String,
    pub width: u32,
    pub dash: String,
}

/// A renderable Manhattan chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManhattanChart {
    pub title: Option<String>,
    pub traces: Vec<Trace>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub reference_line: ReferenceLine,
    pub show_legend: bool,
    pub hover_template: String,
    pub width: u32,
    pub height: u32,
}

impl ManhattanChart {
    /// Build the chart for `dataset`.
    ///
    /// Fails with `InvalidThreshold` unless `conf.genomewide_val` is positive
    /// and finite.
    pub fn build(dataset: &IndexedDataset, conf: &PlotConf) -> Result<Self, Error> {
        let genomewide_val = conf.genomewide_val;
        if !(genomewide_val.is_finite() && genomewide_val > 0.0) {
            return Err(Error::InvalidThreshold {
                value: genomewide_val,
            });
        }
        if conf.palette.is_empty() {
            return Err(Error::Config("palette must not be empty".to_string()));
        }

        let mut traces: Vec<Trace> = Vec::with_capacity(dataset.n_chr());
        for record in dataset.records() {
            let name = record.record.chromosome.name();
            if traces.last().map(|t| t.name.as_str()) != Some(name) {
                traces.push(Trace {
                    name: name.to_string(),
                    color: conf.palette[traces.len() % conf.palette.len()].clone(),
                    x: Vec::new(),
                    y: Vec::new(),
                    hover: Vec::new(),
                });
            }
            if let Some(trace) = traces.last_mut() {
                trace.x.push(record.relative_position);
                trace.y.push(record.record.log10p);
                trace.hover.push(HoverData {
                    variant_id: record.record.variant_id.clone(),
                    gene: record.record.gene.clone(),
                    impact: record.record.impact.clone(),
                    effect: record.record.effect.clone(),
                    maf: record.record.maf,
                    effect_display: record.effect_display.clone(),
                });
            }
        }

        let (tick_values, tick_text): (Vec<_>, Vec<_>) = dataset
            .ticks()
            .iter()
            .enumerate()
            .map(|(i, (chrom, tick))| {
                let label = match conf.tick_labels {
                    TickLabels::Sequential => (i + 1).to_string(),
                    TickLabels::Chromosome => chrom.name().to_string(),
                };
                (tick, label)
            })
            .unzip();

        Ok(Self {
            title: conf.title.clone(),
            traces,
            x_axis: Axis {
                title: "Chromosome".to_string(),
                tick_values,
                tick_text,
                tick_angle: 0,
            },
            y_axis: Axis {
                title: "-log10(p-value)".to_string(),
                tick_values: Vec::new(),
                tick_text: Vec::new(),
                tick_angle: 0,
            },
            reference_line: ReferenceLine {
                x0: 0.0,
                x1: dataset.max_relative_position() as f64,
                y: -genomewide_val.log10(),
                color: conf.reference_line_color.clone(),
                width: REFERENCE_LINE_WIDTH,
                dash: "dot".to_string(),
            },
            show_legend: false,
            hover_template: HOVER_TEMPLATE.to_string(),
            width: conf.width,
            height: conf.height,
        })
    }

    /// Total number of points over all traces.
    pub fn n_points(&self) -> usize {
        self.traces.iter().map(|t| t.x.len()).sum()
    }

    /// Largest y value of points and reference line.
    pub fn max_y(&self) -> f64 {
        self.traces
            .iter()
            .flat_map(|t| t.y.iter().copied())
            .filter(|y| y.is_finite())
            .fold(self.reference_line.y, f64::max)
    }
}
