use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::marker_color;
use crate::data::filter::LocationSelection;
use crate::data::model::Metric;
use crate::registry::{SITE_REGISTRY, find_site};
use crate::state::AppState;
use crate::ui::{map, plot};

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    // ---- Metric selector ----
    ui.strong("Feature for the y-axis");
    let mut metric = state.metric;
    egui::ComboBox::from_id_salt("metric_select")
        .selected_text(metric.column())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for m in Metric::ALL {
                ui.selectable_value(&mut metric, m, m.column());
            }
        });
    state.set_metric(metric);
    ui.add_space(8.0);

    // ---- Location selector ----
    ui.strong("Location for the pH histogram");
    let options = state
        .dataset()
        .map(LocationSelection::options)
        .unwrap_or_default();
    let mut location = state.location.clone();
    egui::ComboBox::from_id_salt("location_select")
        .selected_text(location.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                let label = option.to_string();
                ui.selectable_value(&mut location, option, label);
            }
        });
    state.set_location(location);
    if let LocationSelection::Location(name) = &state.location {
        if let Some(site) = find_site(name) {
            ui.small(site.coordinate_label());
        }
    }
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Map legend ----
            ui.strong("Sites");
            for site in SITE_REGISTRY {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("●").color(marker_color(site.kind)));
                    ui.label(site.name);
                });
            }
            ui.separator();

            // ---- Histogram colours ----
            ui.strong("Histogram colours");
            for (location, color) in state.colors.legend_entries() {
                ui.label(RichText::new(location).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with dataset status.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong(&state.config.title);
        ui.separator();

        if let Some(ds) = state.dataset() {
            ui.label(format!(
                "{} samples, {} locations ({})",
                ds.len(),
                ds.locations.len(),
                state.session.path().display()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Map, scatter, histogram and summary table, top to bottom. A failed load
/// replaces all of them with the error.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    if let Err(e) = state.session.dataset() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(format!("Error: {e}")).heading().color(Color32::RED));
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Water Quality Map");
            map::site_map(ui, &state.config.map);
            ui.add_space(16.0);

            ui.heading("Time-Series Scatter Plot");
            if let Some(spec) = &state.scatter {
                plot::scatter_plot(ui, spec);
            }
            ui.add_space(16.0);

            ui.heading("pH Distribution");
            if let Some(spec) = &state.histogram {
                plot::ph_histogram(ui, spec, &state.config.histogram);
            }
            ui.add_space(16.0);

            ui.heading("Summary by Location");
            plot::summary_table(ui, &state.summaries);
        });
}
