use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Metric – one tracked numeric column
// ---------------------------------------------------------------------------

/// The seven water-quality measurements carried by every sample.
///
/// Serialized under the exact column name used in the source table, which is
/// also how the metric appears in `dashboard.json` label overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "pH")]
    Ph,
    Ammonia,
    EColi,
    Nitrate,
    DissolvedOxygen,
    TotalSuspendedSolids,
    Temperature,
}

impl Metric {
    pub const COUNT: usize = 7;

    /// All metrics in the order offered by the metric selector.
    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::Ph,
        Metric::Ammonia,
        Metric::EColi,
        Metric::Nitrate,
        Metric::DissolvedOxygen,
        Metric::TotalSuspendedSolids,
        Metric::Temperature,
    ];

    /// Column name in the source table.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Ph => "pH",
            Metric::Ammonia => "Ammonia",
            Metric::EColi => "EColi",
            Metric::Nitrate => "Nitrate",
            Metric::DissolvedOxygen => "DissolvedOxygen",
            Metric::TotalSuspendedSolids => "TotalSuspendedSolids",
            Metric::Temperature => "Temperature",
        }
    }

    /// Position of this metric inside [`Sample::values`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// Sample – one row of the table
// ---------------------------------------------------------------------------

/// A single water sample taken at one location.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub sample_date: NaiveDateTime,
    pub location: String,
    /// Indexed by [`Metric::index`]. Missing cells are `NaN`.
    pub values: [f64; Metric::COUNT],
}

impl Sample {
    pub fn value(&self, metric: Metric) -> f64 {
        self.values[metric.index()]
    }

    pub fn ph(&self) -> f64 {
        self.value(Metric::Ph)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All samples of one session plus the location index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub samples: Vec<Sample>,
    /// Distinct location names in first-seen order.
    pub locations: Vec<String>,
}

impl Dataset {
    /// Build the location index from the loaded samples.
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut locations = Vec::new();
        for sample in &samples {
            if seen.insert(sample.location.as_str()) {
                locations.push(sample.location.clone());
            }
        }
        Dataset { samples, locations }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
