//! Static rendering of a chart as SVG.

use plotters::{coord::Shift, prelude::*, series::DashedLineSeries};

use crate::{conf::parse_hex_color, err::Error};

use super::ManhattanChart;

/// Marker radius in pixels.
const POINT_SIZE: u32 = 3;
/// Dash length and gap of the reference line in pixels.
const DASH_SIZE: u32 = 4;
const DASH_SPACING: u32 = 4;

fn draw_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Output(format!("could not draw plot: {}", e))
}

fn rgb_color(color: &str) -> Result<RGBColor, Error> {
    let (r, g, b) = parse_hex_color(color)?;
    Ok(RGBColor(r, g, b))
}

impl ManhattanChart {
    /// Render as SVG document.
    pub fn to_svg_string(&self) -> Result<String, Error> {
        let mut buf = String::new();
        {
            let root =
                SVGBackend::with_string(&mut buf, (self.width, self.height)).into_drawing_area();
            self.draw(&root)?;
            root.present().map_err(draw_err)?;
        }
        Ok(buf)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), Error> {
        root.fill(&WHITE).map_err(draw_err)?;

        let x_max = self.reference_line.x1.max(1.0) + 0.5;
        let y_max = self.max_y().max(1.0) * 1.1;
        let y_min = -y_max * 0.05;

        let mut builder = ChartBuilder::on(root);
        builder
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50);
        if let Some(title) = &self.title {
            builder.caption(title, ("sans-serif", 20));
        }
        let mut chart = builder
            .build_cartesian_2d(-0.5..x_max, y_min..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|_| String::new())
            .x_desc(self.x_axis.title.as_str())
            .y_desc(self.y_axis.title.as_str())
            .draw()
            .map_err(draw_err)?;

        for trace in &self.traces {
            let color = rgb_color(&trace.color)?;
            chart
                .draw_series(
                    trace
                        .x
                        .iter()
                        .zip(trace.y.iter())
                        .filter(|(_, y)| y.is_finite())
                        .map(|(x, y)| Circle::new((*x as f64, *y), POINT_SIZE, color.filled())),
                )
                .map_err(draw_err)?;
        }

        let line = &self.reference_line;
        let line_style = rgb_color(&line.color)?.stroke_width(line.width);
        chart
            .draw_series(DashedLineSeries::new(
                vec![(line.x0, line.y), (line.x1, line.y)],
                DASH_SIZE,
                DASH_SPACING,
                line_style,
            ))
            .map_err(draw_err)?;

        chart
            .draw_series(
                self.x_axis
                    .tick_values
                    .iter()
                    .zip(self.x_axis.tick_text.iter())
                    .map(|(x, label)| {
                        Text::new(label.clone(), (*x, y_min), ("sans-serif", 12).into_font())
                    }),
            )
            .map_err(draw_err)?;

        Ok(())
    }
}
