use chrono::NaiveDateTime;

use crate::config::DashboardConfig;
use crate::data::model::{Dataset, Metric};

use super::date_to_axis;

/// One marker of the time-series chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    /// Index of the sample in the dataset.
    pub row: usize,
    pub sample_date: NaiveDateTime,
    pub value: f64,
}

/// Time-series scatter of one metric over every sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSpec {
    pub metric: Metric,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterSpec {
    pub fn build(dataset: &Dataset, metric: Metric, config: &DashboardConfig) -> Self {
        let label = config.metric_label(metric);
        let points = dataset
            .samples
            .iter()
            .enumerate()
            .map(|(row, s)| ScatterPoint {
                row,
                sample_date: s.sample_date,
                value: s.value(metric),
            })
            .collect();

        ScatterSpec {
            metric,
            title: format!("{label} over time"),
            x_label: "Sample Date".to_string(),
            y_label: label.to_string(),
            points,
        }
    }

    /// `[x, y]` pairs for the plot, x in days since the epoch. Missing
    /// readings stay `NaN` and are not drawn.
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .map(|p| [date_to_axis(p.sample_date), p.value])
            .collect()
    }
}
