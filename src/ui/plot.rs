use eframe::egui::{self, Align2, Color32, FontId, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::config::HistogramConfig;
use crate::view::axis_to_date;
use crate::view::histogram::HistogramSpec;
use crate::view::scatter::ScatterSpec;
use crate::view::summary::LocationSummary;

const SCATTER_COLOR: Color32 = Color32::from_rgb(70, 130, 180);

fn format_date_axis(value: f64) -> String {
    axis_to_date(value)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Time-series scatter
// ---------------------------------------------------------------------------

/// Render the selected metric over time.
pub fn scatter_plot(ui: &mut Ui, spec: &ScatterSpec) {
    ui.label(RichText::new(&spec.title).strong());

    let y_label = spec.y_label.clone();
    let series: PlotPoints = spec.plot_points().into_iter().collect();
    let points = Points::new(series)
        .name(&spec.y_label)
        .color(SCATTER_COLOR)
        .radius(3.0)
        .shape(MarkerShape::Circle)
        .filled(true);

    Plot::new("scatter_plot")
        .height(400.0)
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .x_axis_formatter(|mark, _range| format_date_axis(mark.value))
        .label_formatter(move |_name, value| {
            format!("{}\n{y_label}: {:.2}", format_date_axis(value.x), value.y)
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(points);
        });
}

// ---------------------------------------------------------------------------
// pH histogram
// ---------------------------------------------------------------------------

/// Render the pH histogram layers and, for a single location, the summary
/// annotation pinned to the plot's top-left corner.
pub fn ph_histogram(ui: &mut Ui, spec: &HistogramSpec, config: &HistogramConfig) {
    ui.label(RichText::new(&spec.title).strong());

    let [x_min, x_max] = spec.x_domain;
    let [y_min, y_max] = spec.y_domain;

    let response = Plot::new("ph_histogram")
        .height(300.0)
        .legend(Legend::default())
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .include_x(x_min)
        .include_x(x_max)
        .include_y(y_min)
        .include_y(y_max)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for layer in &spec.layers {
                let fill = layer.color.gamma_multiply(layer.opacity);
                let bars: Vec<Bar> = layer
                    .bins
                    .iter()
                    .map(|b| {
                        Bar::new(b.center(), b.count as f64)
                            .width(b.width())
                            .fill(fill)
                    })
                    .collect();

                let chart = BarChart::new(bars)
                    .name(&layer.location)
                    .color(fill)
                    .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
                        format!("pH {:.2}\nCount: {}", bar.argument, bar.value)
                    }));
                plot_ui.bar_chart(chart);
            }
        });

    if let Some(text) = spec.annotation_text() {
        let [dx, dy] = config.annotation_offset;
        ui.painter().text(
            response.response.rect.left_top() + egui::vec2(dx, dy),
            Align2::LEFT_TOP,
            text,
            FontId::proportional(12.0),
            Color32::RED,
        );
    }
}

// ---------------------------------------------------------------------------
// Per-location summary
// ---------------------------------------------------------------------------

pub fn summary_table(ui: &mut Ui, rows: &[LocationSummary]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(240.0))
        .columns(Column::auto().at_least(80.0), 2)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Location", "Samples", "Mean pH", "Std pH"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(&row.location);
                    });
                    table_row.col(|ui| {
                        ui.label(row.samples.to_string());
                    });
                    table_row.col(|ui| {
                        ui.label(row.mean_text());
                    });
                    table_row.col(|ui| {
                        ui.label(row.std_text());
                    });
                });
            }
        });
}
