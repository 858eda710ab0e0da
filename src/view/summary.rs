use crate::data::filter::location_indices;
use crate::data::model::Dataset;
use crate::data::stats::SummaryStatistic;

/// One row of the per-location summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSummary {
    pub location: String,
    pub samples: usize,
    pub ph: Option<SummaryStatistic>,
}

impl LocationSummary {
    pub fn mean_text(&self) -> String {
        self.ph
            .map_or_else(|| "–".to_string(), |s| format!("{:.2}", s.mean))
    }

    pub fn std_text(&self) -> String {
        self.ph
            .and_then(|s| s.std_dev)
            .map_or_else(|| "–".to_string(), |sd| format!("{sd:.2}"))
    }
}

/// Sample count and pH statistics per location, in first-seen order.
pub fn location_summaries(dataset: &Dataset) -> Vec<LocationSummary> {
    dataset
        .locations
        .iter()
        .map(|loc| {
            let rows = location_indices(dataset, loc);
            LocationSummary {
                location: loc.clone(),
                samples: rows.len(),
                ph: SummaryStatistic::compute(rows.iter().map(|&i| dataset.samples[i].ph())),
            }
        })
        .collect()
}
