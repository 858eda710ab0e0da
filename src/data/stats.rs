use std::fmt;

// ---------------------------------------------------------------------------
// Summary statistics over a series of readings
// ---------------------------------------------------------------------------

/// Mean and sample standard deviation of a series. Non-finite values are
/// skipped, the way missing cells are skipped by the source table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistic {
    pub count: usize,
    pub mean: f64,
    /// `None` with fewer than two values.
    pub std_dev: Option<f64>,
}

impl SummaryStatistic {
    /// Returns `None` when no finite value is present.
    pub fn compute(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let vals: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if vals.is_empty() {
            return None;
        }

        let count = vals.len();
        let mean = vals.iter().sum::<f64>() / count as f64;
        let std_dev = (count > 1).then(|| {
            let variance =
                vals.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        });

        Some(SummaryStatistic {
            count,
            mean,
            std_dev,
        })
    }
}

// ---------------------------------------------------------------------------
// pH annotation text
// ---------------------------------------------------------------------------

/// Text drawn over the single-location histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhAnnotation {
    Summary(SummaryStatistic),
    NoData,
}

impl PhAnnotation {
    pub fn from_stat(stat: Option<SummaryStatistic>) -> Self {
        stat.map_or(PhAnnotation::NoData, PhAnnotation::Summary)
    }
}

impl fmt::Display for PhAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhAnnotation::Summary(SummaryStatistic {
                mean,
                std_dev: Some(std),
                ..
            }) => write!(f, "Mean pH: {mean:.2} ± {std:.2}"),
            PhAnnotation::Summary(SummaryStatistic {
                mean,
                std_dev: None,
                ..
            }) => write!(f, "Mean pH: {mean:.2} ± n/a"),
            PhAnnotation::NoData => f.write_str("Mean pH: no data"),
        }
    }
}
