use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::model::Metric;
use crate::error::{DashboardError, Result};

/// Optional override file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Static display configuration. Every field has a default, so an override
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    /// Sample table, relative to the working directory.
    pub data_path: PathBuf,
    /// Axis label per metric. Metrics missing here use their column name.
    pub metric_labels: BTreeMap<Metric, String>,
    /// Histogram colour per location as `[r, g, b]`.
    pub location_colors: BTreeMap<String, [u8; 3]>,
    pub histogram: HistogramConfig,
    pub map: MapConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    pub bin_count: usize,
    /// Initial x view `[min, max]`.
    pub ph_domain: [f64; 2],
    /// Initial y view `[min, max]`.
    pub count_domain: [f64; 2],
    /// Layer opacity in the all-locations overlay.
    pub overlay_opacity: f32,
    /// Annotation position in screen pixels from the plot's top-left corner.
    pub annotation_offset: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// `[latitude, longitude]`.
    pub center: [f64; 2],
    /// Half-extent of the initial view in degrees latitude.
    pub span_degrees: f64,
    pub marker_radius: f32,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bin_count: 30,
            ph_domain: [3.0, 12.0],
            count_domain: [0.0, 600.0],
            overlay_opacity: 0.5,
            annotation_offset: [20.0, 20.0],
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [43.580, -96.720],
            span_degrees: 0.06,
            marker_radius: 6.0,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let metric_labels = [
            (Metric::Ph, "pH"),
            (Metric::Ammonia, "Ammonia (mg/L)"),
            (Metric::EColi, "E. coli (MPN/100 mL)"),
            (Metric::Nitrate, "Nitrate (ppm)"),
            (Metric::DissolvedOxygen, "Dissolved Oxygen (mg/L)"),
            (Metric::TotalSuspendedSolids, "Total Suspended Solids (mg/L)"),
            (Metric::Temperature, "Temperature (°C)"),
        ]
        .into_iter()
        .map(|(m, label)| (m, label.to_string()))
        .collect();

        let location_colors = [
            ("Big Sioux River @ Bahnson", [31, 119, 180]),
            ("Big Sioux River @ Falls Park", [255, 127, 14]),
            ("Big Sioux River @ I-90", [44, 160, 44]),
            ("Big Sioux River @ Timberline", [214, 39, 40]),
            ("Skunk Creek @ Marion Road", [148, 103, 189]),
        ]
        .into_iter()
        .map(|(loc, rgb)| (loc.to_string(), rgb))
        .collect();

        Self {
            title: "Big Sioux River: Water Quality Dashboard".to_string(),
            data_path: PathBuf::from("SF_water.csv"),
            metric_labels,
            location_colors,
            histogram: HistogramConfig::default(),
            map: MapConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Human-readable label for `metric`, or its raw column name.
    pub fn metric_label(&self, metric: Metric) -> &str {
        self.metric_labels
            .get(&metric)
            .map(String::as_str)
            .unwrap_or(metric.column())
    }

    /// Parse an override file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_error = |reason: String| DashboardError::Config {
            path: path.to_path_buf(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config: DashboardConfig =
            serde_json::from_str(&text).map_err(|e| config_error(e.to_string()))?;
        config.validate().map_err(config_error)?;
        Ok(config)
    }

    /// Use `path` when it exists and parses, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        let h = &self.histogram;
        if h.bin_count == 0 {
            return Err("histogram.bin_count must be at least 1".to_string());
        }
        if !(h.ph_domain[0] < h.ph_domain[1]) || !(h.count_domain[0] < h.count_domain[1]) {
            return Err("histogram domains must be increasing [min, max] pairs".to_string());
        }
        if !(0.0..=1.0).contains(&h.overlay_opacity) {
            return Err("histogram.overlay_opacity must be within [0, 1]".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn defaults_cover_every_metric() {
        let config = DashboardConfig::default();
        for metric in Metric::ALL {
            assert!(config.metric_labels.contains_key(&metric), "{metric}");
        }
        assert_eq!(config.metric_label(Metric::Nitrate), "Nitrate (ppm)");
        assert_eq!(config.data_path, PathBuf::from("SF_water.csv"));
        assert_eq!(config.histogram.bin_count, 30);
    }

    #[test]
    fn unknown_label_falls_back_to_column() {
        let mut config = DashboardConfig::default();
        config.metric_labels.remove(&Metric::EColi);
        assert_eq!(config.metric_label(Metric::EColi), "EColi");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{"data_path": "other.parquet", "metric_labels": {"pH": "Acidity"},
                "histogram": {"overlay_opacity": 0.3}}"#,
        )
        .unwrap();

        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("other.parquet"));
        assert_eq!(config.metric_label(Metric::Ph), "Acidity");
        assert_eq!(config.metric_label(Metric::Nitrate), "Nitrate");
        assert_eq!(config.histogram.overlay_opacity, 0.3);
        assert_eq!(config.histogram.bin_count, 30);
        assert_eq!(config.title, DashboardConfig::default().title);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"histogram": {"bin_count": 0}}"#).unwrap();

        assert!(matches!(
            DashboardConfig::from_file(&path),
            Err(DashboardError::Config { .. })
        ));
        assert_eq!(
            DashboardConfig::load_or_default(&path),
            DashboardConfig::default()
        );
    }

    #[test]
    fn absent_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE));
        assert_eq!(config, DashboardConfig::default());
    }
}
