//! Serialization of a chart as plotly figure.

use serde_json::{json, Value};

use super::ManhattanChart;

impl ManhattanChart {
    /// Plotly figure with `data` and `layout` for embedding in a dashboard.
    pub fn to_plotly_json(&self) -> Value {
        let data = self
            .traces
            .iter()
            .map(|trace| {
                json!({
                    "type": "scatter",
                    "mode": "markers",
                    "name": trace.name,
                    "x": trace.x,
                    "y": trace.y,
                    "marker": { "color": trace.color },
                    "customdata": trace
                        .hover
                        .iter()
                        .map(|h| h.to_custom_data())
                        .collect::<Vec<_>>(),
                    "hovertemplate": self.hover_template,
                })
            })
            .collect::<Vec<_>>();

        let line = &self.reference_line;
        let mut layout = json!({
            "showlegend": self.show_legend,
            "width": self.width,
            "height": self.height,
            "xaxis": {
                "title": { "text": self.x_axis.title },
                "tickmode": "array",
                "tickvals": self.x_axis.tick_values,
                "ticktext": self.x_axis.tick_text,
                "tickangle": self.x_axis.tick_angle,
            },
            "yaxis": {
                "title": { "text": self.y_axis.title },
            },
            "shapes": [{
                "type": "line",
                "x0": line.x0,
                "x1": line.x1,
                "y0": line.y,
                "y1": line.y,
                "line": {
                    "color": line.color,
                    "width": line.width,
                    "dash": line.dash,
                },
            }],
        });
        if let Some(title) = &self.title {
            layout["title"] = json!({ "text": title });
        }

        json!({ "data": data, "layout": layout })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::{
        conf::PlotConf,
        gwas::IndexedDataset,
        plot::ManhattanChart,
        repo::AssociationRecordBuilder,
    };

    fn chart(title: Option<&str>) -> ManhattanChart {
        let records = vec![
            AssociationRecordBuilder::default()
                .variant_id("rs1")
                .chromosome("1")
                .position(100)
                .gene("PKD1")
                .impact("HIGH")
                .effect("stop_gained")
                .maf(0.1)
                .effect_size(0.5)
                .standard_error(0.1)
                .log10p(9.0)
                .build()
                .unwrap(),
            AssociationRecordBuilder::default()
                .variant_id("rs2")
                .chromosome("2")
                .position(100)
                .log10p(1.0)
                .build()
                .unwrap(),
        ];
        let conf = PlotConf {
            title: title.map(String::from),
            ..Default::default()
        };
        ManhattanChart::build(&IndexedDataset::build(records).unwrap(), &conf).unwrap()
    }

    #[test]
    fn figure() {
        let figure = chart(None).to_plotly_json();

        let data = figure["data"].as_array().unwrap();
        assert_eq!(2, data.len());
        assert_eq!("1", data[0]["name"]);
        assert_eq!("#0093D4", data[0]["marker"]["color"]);
        assert_eq!("#0029D4", data[1]["marker"]["color"]);
        assert_eq!(
            serde_json::json!([["rs1", "PKD1", "HIGH", "stop_gained", 0.1, "0.5(0.1)"]]),
            data[0]["customdata"]
        );
        assert!(data[0]["hovertemplate"]
            .as_str()
            .unwrap()
            .starts_with("VAR_ID: %{customdata[0]}<br>LOG10P: %{y:.2f}<br>"));

        let layout = &figure["layout"];
        assert_eq!(false, layout["showlegend"]);
        assert_eq!(serde_json::json!(["1", "2"]), layout["xaxis"]["ticktext"]);
        assert_eq!(serde_json::json!([0.0, 1.0]), layout["xaxis"]["tickvals"]);
        assert_eq!("dot", layout["shapes"][0]["line"]["dash"]);
        assert_eq!(1.0, layout["shapes"][0]["x1"]);
        assert!(layout.get("title").is_none());
    }

    #[test]
    fn figure_with_title() {
        let figure = chart(Some("Phecode 585.4")).to_plotly_json();

        assert_eq!("Phecode 585.4", figure["layout"]["title"]["text"]);
    }
}
