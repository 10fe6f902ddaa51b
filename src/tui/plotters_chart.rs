//! Plotters-powered score-trend chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct ScoreTrendChart<'a> {
    /// `(index, score)` pairs, oldest first.
    pub points: &'a [(f64, f64)],
    /// Point labels, indexed like `points`.
    pub labels: &'a [String],
    pub y_bounds: [f64; 2],
}

impl<'a> Widget for ScoreTrendChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x1 = (self.points.len().saturating_sub(1)).max(1) as f64;
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];
        if !(y0.is_finite() && y1.is_finite()) || y1 <= y0 {
            return;
        }

        let labels = self.labels;
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(0.0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(6)
                .y_labels(5)
                .x_label_formatter(&|v| label_at(labels, *v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let line_color = RGBColor(102, 126, 234);
            chart.draw_series(LineSeries::new(self.points.iter().copied(), &line_color))?;

            // `Pixel` rather than `Circle`: the backend maps circle radii to
            // canvas units incorrectly and draws huge circles.
            chart.draw_series(
                self.points
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), WHITE)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Label for a fractional x position; empty between points.
fn label_at(labels: &[String], x: f64) -> String {
    if !x.is_finite() || x < 0.0 || (x - x.round()).abs() > 1e-6 {
        return String::new();
    }
    labels.get(x.round() as usize).cloned().unwrap_or_default()
}
