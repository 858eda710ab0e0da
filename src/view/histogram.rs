use eframe::egui::Color32;

use crate::color::LocationColors;
use crate::config::DashboardConfig;
use crate::data::filter::{LocationSelection, location_indices};
use crate::data::model::Dataset;
use crate::data::stats::{PhAnnotation, SummaryStatistic};
use crate::registry::sampling_site_names;

// ---------------------------------------------------------------------------
// Binning
// ---------------------------------------------------------------------------

/// One bar: values in `[start, end)`, the last bin also holds `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Split the finite `values` into `bin_count` equal-width bins spanning their
/// range. A constant series gets a range of one unit centred on the value.
pub fn bin_values(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bin_count as f64;

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v - min) / width).floor() as usize).min(bin_count - 1);
        bins[idx].count += 1;
    }
    bins
}

// ---------------------------------------------------------------------------
// Histogram display specification
// ---------------------------------------------------------------------------

/// pH distribution of one location.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramLayer {
    pub location: String,
    pub color: Color32,
    pub opacity: f32,
    /// Dataset indices of the samples in this layer.
    pub rows: Vec<usize>,
    pub bins: Vec<HistogramBin>,
}

/// The pH chart for the current location selection.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSpec {
    pub selection: LocationSelection,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Initial x view; panning beyond stays possible.
    pub x_domain: [f64; 2],
    /// Initial y view.
    pub y_domain: [f64; 2],
    pub layers: Vec<HistogramLayer>,
    /// Only set for a single location.
    pub annotation: Option<PhAnnotation>,
}

impl HistogramSpec {
    pub fn build(
        dataset: &Dataset,
        selection: &LocationSelection,
        config: &DashboardConfig,
        colors: &LocationColors,
    ) -> Self {
        let hist = &config.histogram;
        let layer = |location: &str, opacity: f32| {
            let rows = location_indices(dataset, location);
            let ph: Vec<f64> = rows.iter().map(|&i| dataset.samples[i].ph()).collect();
            HistogramLayer {
                location: location.to_string(),
                color: colors.color_for(location),
                opacity,
                bins: bin_values(&ph, hist.bin_count),
                rows,
            }
        };

        let (title, layers, annotation) = match selection {
            LocationSelection::Location(name) => {
                let single = layer(name.as_str(), 1.0);
                let stat = SummaryStatistic::compute(
                    single.rows.iter().map(|&i| dataset.samples[i].ph()),
                );
                if stat.is_none() {
                    log::warn!("No pH data available for {name}");
                }
                (
                    format!("Distribution of pH at {name}"),
                    vec![single],
                    Some(PhAnnotation::from_stat(stat)),
                )
            }
            LocationSelection::All => (
                "Distribution of pH by location".to_string(),
                sampling_site_names()
                    .into_iter()
                    .map(|name| layer(name, hist.overlay_opacity))
                    .collect(),
                None,
            ),
        };

        HistogramSpec {
            selection: selection.clone(),
            title,
            x_label: "pH".to_string(),
            y_label: "Count".to_string(),
            x_domain: hist.ph_domain,
            y_domain: hist.count_domain,
            layers,
            annotation,
        }
    }

    /// Annotation text, if this view carries one.
    pub fn annotation_text(&self) -> Option<String> {
        self.annotation.map(|a| a.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::model::tests::sample;

    fn colors(config: &DashboardConfig, ds: &Dataset) -> LocationColors {
        LocationColors::new(&config.location_colors, &ds.locations)
    }

    #[test]
    fn bins_cover_all_finite_values() {
        let values = [3.0, 4.5, 7.0, 7.0, 12.0, f64::NAN];
        let bins = bin_values(&values, 30);
        assert_eq!(bins.len(), 30);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        assert_eq!(bins[0].start, 3.0);
        assert!((bins[29].end - 12.0).abs() < 1e-9);
        // The maximum lands in the last bin.
        assert_eq!(bins[29].count, 1);
        assert!((bins[0].width() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn constant_series_gets_unit_range() {
        let bins = bin_values(&[7.0, 7.0, 7.0], 10);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
        assert_eq!(bins[0].start, 6.5);
        assert_eq!(bins[9].end, 7.5);
        assert_eq!(bins[5].count, 3);
    }

    #[test]
    fn no_values_no_bins() {
        assert!(bin_values(&[], 30).is_empty());
        assert!(bin_values(&[f64::NAN], 30).is_empty());
    }

    #[test]
    fn single_location_scenario() {
        let ds = Dataset::from_samples(vec![
            sample("2023-01-01", "A", 7.0),
            sample("2023-01-02", "A", 8.0),
        ]);
        let config = DashboardConfig::default();
        let spec = HistogramSpec::build(
            &ds,
            &LocationSelection::Location("A".into()),
            &config,
            &colors(&config, &ds),
        );

        assert_eq!(spec.title, "Distribution of pH at A");
        assert_eq!(spec.layers.len(), 1);
        assert_eq!(spec.layers[0].rows, [0, 1]);
        assert_eq!(spec.layers[0].opacity, 1.0);
        assert_eq!(spec.annotation_text().unwrap(), "Mean pH: 7.50 ± 0.71");
        assert_eq!(spec.x_domain, [3.0, 12.0]);
        assert_eq!(spec.y_domain, [0.0, 600.0]);
    }

    #[test]
    fn single_location_rows_and_stats_match_filter() {
        let ds = Dataset::from_samples(vec![
            sample("2023-01-01", "Big Sioux River @ I-90", 7.2),
            sample("2023-01-02", "Skunk Creek @ Marion Road", 8.4),
            sample("2023-01-03", "Big Sioux River @ I-90", 7.8),
            sample("2023-01-04", "Big Sioux River @ I-90", 8.1),
        ]);
        let config = DashboardConfig::default();
        let location = "Big Sioux River @ I-90";
        let spec = HistogramSpec::build(
            &ds,
            &LocationSelection::Location(location.into()),
            &config,
            &colors(&config, &ds),
        );

        let layer = &spec.layers[0];
        assert!(layer.rows.iter().all(|&i| ds.samples[i].location == location));
        assert_eq!(layer.rows.len(), 3);
        assert_eq!(layer.color, Color32::from_rgb(44, 160, 44));

        let mean = (7.2 + 7.8 + 8.1) / 3.0;
        let var = [7.2f64, 7.8, 8.1]
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / 2.0;
        match spec.annotation {
            Some(PhAnnotation::Summary(stat)) => {
                assert!((stat.mean - mean).abs() < 1e-12);
                assert!((stat.std_dev.unwrap() - var.sqrt()).abs() < 1e-12);
            }
            other => panic!("expected summary, got {other:?}"),
        }
    }

    #[test]
    fn empty_location_shows_no_data() {
        let ds = Dataset::from_samples(vec![sample("2023-01-01", "A", 7.0)]);
        let config = DashboardConfig::default();
        let spec = HistogramSpec::build(
            &ds,
            &LocationSelection::Location("Nowhere".into()),
            &config,
            &colors(&config, &ds),
        );

        assert!(spec.layers[0].rows.is_empty());
        assert!(spec.layers[0].bins.is_empty());
        assert_eq!(spec.annotation, Some(PhAnnotation::NoData));
        let text = spec.annotation_text().unwrap();
        assert_eq!(text, "Mean pH: no data");
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn overlay_layers_partition_sampling_sites() {
        let sites = sampling_site_names();
        let mut rows = Vec::new();
        for (i, site) in sites.iter().enumerate() {
            rows.push(sample("2023-01-01", site, 7.0 + i as f64 * 0.1));
            rows.push(sample("2023-02-01", site, 7.5));
        }
        rows.push(sample("2023-01-01", "Smithfield Foods", 9.0));
        rows.push(sample("2023-01-01", "Somewhere Else", 6.0));
        let ds = Dataset::from_samples(rows);

        let config = DashboardConfig::default();
        let spec = HistogramSpec::build(&ds, &LocationSelection::All, &config, &colors(&config, &ds));

        assert!(spec.annotation.is_none());
        assert_eq!(spec.title, "Distribution of pH by location");
        let layer_names: Vec<&str> = spec.layers.iter().map(|l| l.location.as_str()).collect();
        assert_eq!(layer_names, sites);

        let mut seen = BTreeSet::new();
        for layer in &spec.layers {
            assert_eq!(layer.opacity, 0.5);
            assert_eq!(
                layer.color,
                colors(&config, &ds).color_for(&layer.location)
            );
            for &row in &layer.rows {
                assert!(seen.insert(row), "row {row} in two layers");
            }
        }
        let expected: BTreeSet<usize> = ds
            .samples
            .iter()
            .enumerate()
            .filter(|(_, s)| sites.contains(&s.location.as_str()))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(seen, expected);
    }
}
