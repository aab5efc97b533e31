//! The table of top association hits.

use std::io::Write;

use crate::common::{display_float, format_scientific, round_to, title_case};

use super::index::IndexedDataset;

/// Records need `log10p` strictly above this value to be listed (p < 1e-5).
pub const LOG10P_THRESHOLD: f64 = 5.0;

/// Display names of the table columns, in output order.
pub const COLUMNS: [&str; 8] = [
    "VarID",
    "Gene",
    "Impact",
    "Effect",
    "HGVSc",
    "MAF",
    "P-value",
    "EffectSize(SE)",
];

/// One row of the top hits table.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TopHit {
    #[serde(rename = "VarID")]
    pub variant_id: String,
    #[serde(rename = "Gene")]
    pub gene: String,
    #[serde(rename = "Impact")]
    pub impact: String,
    #[serde(rename = "Effect")]
    pub effect: String,
    #[serde(rename = "HGVSc")]
    pub hgvs_c: String,
    #[serde(rename = "MAF")]
    pub maf: f64,
    #[serde(rename = "P-value")]
    pub p_value: String,
    #[serde(rename = "EffectSize(SE)")]
    pub effect_display: String,
    /// Kept for ordering, not displayed.
    #[serde(skip)]
    pub log10p: f64,
}

impl TopHit {
    /// Cell values in `COLUMNS` order.
    fn cells(&self) -> [String; 8] {
        [
            self.variant_id.clone(),
            self.gene.clone(),
            self.impact.clone(),
            self.effect.clone(),
            self.hgvs_c.clone(),
            display_float(self.maf),
            self.p_value.clone(),
            self.effect_display.clone(),
        ]
    }
}

/// Escape `&`, `<` and `>` for HTML output; quotes are kept.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Significant hits, strongest first.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct TopHitsTable {
    rows: Vec<TopHit>,
}

impl TopHitsTable {
    /// Select and format all records with `log10p > 5`.
    ///
    /// Rows are sorted by descending `log10p`; ties keep relative position order.
    pub fn build(dataset: &IndexedDataset) -> Self {
        let mut rows = dataset
            .records()
            .iter()
            .filter(|r| r.record.log10p > LOG10P_THRESHOLD)
            .map(|r| TopHit {
                variant_id: r.record.variant_id.clone(),
                gene: r.record.gene.clone(),
                impact: title_case(&r.record.impact),
                effect: title_case(&r.record.effect.replace('_', " ")),
                hgvs_c: r.record.hgvs_c.clone(),
                maf: round_to(r.record.maf, 5),
                p_value: format_scientific(10f64.powf(-r.record.log10p), 2),
                effect_display: r.effect_display.clone(),
                log10p: r.record.log10p,
            })
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| b.log10p.total_cmp(&a.log10p));

        Self { rows }
    }

    pub fn rows(&self) -> &[TopHit] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as HTML table with a leading row index column.
    pub fn to_html(&self) -> String {
        let mut lines = vec![
            r#"<table border="1" class="dataframe">"#.to_string(),
            "  <thead>".to_string(),
            r#"    <tr style="text-align: right;">"#.to_string(),
            "      <th></th>".to_string(),
        ];
        lines.extend(COLUMNS.iter().map(|c| format!("      <th>{}</th>", escape_html(c))));
        lines.push("    </tr>".to_string());
        lines.push("  </thead>".to_string());
        lines.push("  <tbody>".to_string());
        for (i, row) in self.rows.iter().enumerate() {
            lines.push("    <tr>".to_string());
            lines.push(format!("      <th>{}</th>", i));
            lines.extend(
                row.cells()
                    .iter()
                    .map(|cell| format!("      <td>{}</td>", escape_html(cell))),
            );
            lines.push("    </tr>".to_string());
        }
        lines.push("  </tbody>".to_string());
        lines.push("</table>".to_string());
        lines.join("\n")
    }

    /// Write as TSV with header line.
    pub fn write_tsv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(COLUMNS)?;
        for row in &self.rows {
            csv_writer.write_record(row.cells())?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
