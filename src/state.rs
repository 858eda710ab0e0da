use crate::color::LocationColors;
use crate::config::DashboardConfig;
use crate::data::filter::LocationSelection;
use crate::data::model::{Dataset, Metric};
use crate::data::session::DataSession;
use crate::view::histogram::HistogramSpec;
use crate::view::scatter::ScatterSpec;
use crate::view::summary::{LocationSummary, location_summaries};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Owns the dataset; loaded once when the state is created.
    pub session: DataSession,

    /// Metric shown on the time-series chart.
    pub metric: Metric,

    /// Location shown on the pH histogram.
    pub location: LocationSelection,

    /// Colour per location, shared by single and overlay views.
    pub colors: LocationColors,

    /// Display specs for the current selections (None when no data).
    pub scatter: Option<ScatterSpec>,
    pub histogram: Option<HistogramSpec>,
    pub summaries: Vec<LocationSummary>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let session = DataSession::new(config.data_path.clone());
        let colors = LocationColors::new(&config.location_colors, std::iter::empty());
        let mut state = Self {
            config,
            session,
            metric: Metric::Ph,
            location: LocationSelection::All,
            colors,
            scatter: None,
            histogram: None,
            summaries: Vec::new(),
            status_message: None,
        };
        state.load();
        state
    }

    /// Load the dataset and build every view.
    fn load(&mut self) {
        match self.session.dataset() {
            Ok(ds) => {
                self.colors = LocationColors::new(&self.config.location_colors, &ds.locations);
                // Start on the first location, like the location selector.
                self.location = ds
                    .locations
                    .first()
                    .cloned()
                    .map_or(LocationSelection::All, LocationSelection::Location);
                self.summaries = location_summaries(ds);
                self.status_message = None;
            }
            Err(e) => {
                self.status_message = Some(e.to_string());
            }
        }
        self.rebuild_scatter();
        self.rebuild_histogram();
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.session.dataset().ok()
    }

    /// Select a metric and rebuild the time-series chart.
    pub fn set_metric(&mut self, metric: Metric) {
        if self.metric == metric {
            return;
        }
        log::debug!("Metric selection changed to {metric}");
        self.metric = metric;
        self.rebuild_scatter();
    }

    /// Select a location and rebuild the histogram.
    pub fn set_location(&mut self, location: LocationSelection) {
        if self.location == location {
            return;
        }
        log::debug!("Location selection changed to {location}");
        self.location = location;
        self.rebuild_histogram();
    }

    fn rebuild_scatter(&mut self) {
        self.scatter = self
            .session
            .dataset()
            .ok()
            .map(|ds| ScatterSpec::build(ds, self.metric, &self.config));
    }

    fn rebuild_histogram(&mut self) {
        self.histogram = self
            .session
            .dataset()
            .ok()
            .map(|ds| HistogramSpec::build(ds, &self.location, &self.config, &self.colors));
    }
}
