use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color::marker_color;
use crate::config::MapConfig;
use crate::registry::{SiteKind, sites_of_kind};

// ---------------------------------------------------------------------------
// Site map
// ---------------------------------------------------------------------------

/// Plot every registered site at its coordinates, longitude on x.
pub fn site_map(ui: &mut Ui, config: &MapConfig) {
    let [lat, lon] = config.center;
    // Screen ratio of one degree longitude to one degree latitude.
    let aspect = lat.to_radians().cos();
    let span = config.span_degrees;

    Plot::new("site_map")
        .height(500.0)
        .legend(Legend::default())
        .data_aspect(aspect as f32)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(lon - span / aspect)
        .include_x(lon + span / aspect)
        .include_y(lat - span)
        .include_y(lat + span)
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.5}, {:.5}", value.y, value.x)
            } else {
                format!("{name}\n{:.5}, {:.5}", value.y, value.x)
            }
        })
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(true)
        .show(ui, |plot_ui| {
            for kind in [SiteKind::SamplingLocation, SiteKind::PointSource] {
                let color = marker_color(kind);
                let coords: PlotPoints = sites_of_kind(kind)
                    .map(|s| [s.longitude, s.latitude])
                    .collect();

                plot_ui.points(
                    Points::new(coords)
                        .name(kind.label())
                        .color(color)
                        .radius(config.marker_radius)
                        .shape(MarkerShape::Circle)
                        .filled(true),
                );

                for site in sites_of_kind(kind) {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(site.longitude, site.latitude),
                            RichText::new(format!("  {}", site.name)).small(),
                        )
                        .anchor(Align2::LEFT_BOTTOM)
                        .color(color),
                    );
                }
            }
        });
}
