use std::path::PathBuf;

use tempfile::TempDir;

use water_quality_dashboard::color::LocationColors;
use water_quality_dashboard::config::DashboardConfig;
use water_quality_dashboard::data::filter::{LocationSelection, filtered_indices};
use water_quality_dashboard::data::model::Metric;
use water_quality_dashboard::data::session::DataSession;
use water_quality_dashboard::error::DashboardError;
use water_quality_dashboard::registry::sampling_site_names;
use water_quality_dashboard::view::histogram::HistogramSpec;
use water_quality_dashboard::view::scatter::ScatterSpec;
use water_quality_dashboard::view::summary::location_summaries;

const HEADER: &str =
    "SampleDate,Location,pH,Ammonia,EColi,Nitrate,DissolvedOxygen,TotalSuspendedSolids,Temperature";

fn write_csv(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let path = dir.path().join("SF_water.csv");
    let mut contents = String::from(HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    contents.push('\n');
    std::fs::write(&path, contents).unwrap();
    path
}

fn river_rows() -> Vec<&'static str> {
    vec![
        "2023-05-01,Big Sioux River @ I-90,7.8,0.05,120,3.1,9.2,35,12.0",
        "2023-05-01,Big Sioux River @ Falls Park,8.1,0.07,240,4.2,8.8,41,12.4",
        "2023-05-01,Skunk Creek @ Marion Road,7.6,0.03,90,2.7,9.6,28,11.8",
        "2023-05-08,Big Sioux River @ I-90,8.0,,150,3.3,9.0,38,14.1",
        "2023-05-08,Big Sioux River @ Bahnson,8.3,0.11,310,5.0,8.1,52,14.6",
        "2023-05-08,Smithfield Foods,9.1,0.50,900,8.0,6.0,80,15.0",
        "2023-05-15,Big Sioux River @ Timberline,8.2,0.09,200,4.6,8.4,47,15.2",
        "2023-05-15,Big Sioux River @ I-90,7.9,0.06,130,3.0,8.9,36,15.0",
    ]
}

#[test]
fn end_to_end_single_location() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        &[
            "2023-01-01,A,7.0,0.1,5,1.0,9.0,10,2.0",
            "2023-01-02,A,8.0,0.2,6,2.0,8.0,12,3.0",
        ],
    );

    let config = DashboardConfig::default();
    let session = DataSession::new(&path);
    let ds = session.dataset().unwrap();
    let colors = LocationColors::new(&config.location_colors, &ds.locations);

    let hist = HistogramSpec::build(ds, &LocationSelection::Location("A".into()), &config, &colors);
    assert_eq!(hist.annotation_text().as_deref(), Some("Mean pH: 7.50 ± 0.71"));

    let scatter = ScatterSpec::build(ds, Metric::Nitrate, &config);
    assert_eq!(scatter.y_label, "Nitrate (ppm)");
    assert_eq!(scatter.title, "Nitrate (ppm) over time");
    assert_eq!(scatter.points.len(), 2);
    assert_eq!(scatter.points[1].value, 2.0);
}

#[test]
fn scatter_has_one_point_per_row_for_every_metric() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, &river_rows());
    let session = DataSession::new(&path);
    let ds = session.dataset().unwrap();
    let config = DashboardConfig::default();

    for metric in Metric::ALL {
        let spec = ScatterSpec::build(ds, metric, &config);
        assert_eq!(spec.points.len(), ds.len(), "{metric}");
        for (point, sample) in spec.points.iter().zip(&ds.samples) {
            let expected = sample.value(metric);
            assert!(
                point.value == expected || (point.value.is_nan() && expected.is_nan()),
                "{metric}: {} vs {expected}",
                point.value
            );
        }
    }
}

#[test]
fn overlay_covers_sampling_sites_only() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, &river_rows());
    let session = DataSession::new(&path);
    let ds = session.dataset().unwrap();
    let config = DashboardConfig::default();
    let colors = LocationColors::new(&config.location_colors, &ds.locations);

    let spec = HistogramSpec::build(ds, &LocationSelection::All, &config, &colors);
    assert!(spec.annotation.is_none());

    let mut rows: Vec<usize> = spec.layers.iter().flat_map(|l| l.rows.clone()).collect();
    rows.sort_unstable();
    let before = rows.len();
    rows.dedup();
    assert_eq!(rows.len(), before, "a row appears in two layers");

    let sites = sampling_site_names();
    let expected: Vec<usize> = (0..ds.len())
        .filter(|&i| sites.contains(&ds.samples[i].location.as_str()))
        .collect();
    assert_eq!(rows, expected);
    assert!(!rows.iter().any(|&i| ds.samples[i].location == "Smithfield Foods"));
}

#[test]
fn single_location_matches_filter_and_statistics() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, &river_rows());
    let session = DataSession::new(&path);
    let ds = session.dataset().unwrap();
    let config = DashboardConfig::default();
    let colors = LocationColors::new(&config.location_colors, &ds.locations);

    for location in &ds.locations {
        let selection = LocationSelection::Location(location.clone());
        let spec = HistogramSpec::build(ds, &selection, &config, &colors);
        let rows = &spec.layers[0].rows;

        assert_eq!(rows, &filtered_indices(ds, &selection));
        assert!(rows.iter().all(|&i| &ds.samples[i].location == location));
        assert!(!spec.annotation_text().unwrap().contains("NaN"));
    }

    let summaries = location_summaries(ds);
    let i90 = summaries
        .iter()
        .find(|s| s.location == "Big Sioux River @ I-90")
        .unwrap();
    assert_eq!(i90.samples, 3);
    assert_eq!(i90.mean_text(), "7.90");
    assert_eq!(i90.std_text(), "0.10");
}

#[test]
fn malformed_file_is_data_unavailable() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, &["05/01/2023,A,7.0,,,,,,", "soon,A,7.1,,,,,,"]);

    let session = DataSession::new(&path);
    assert!(matches!(
        session.dataset(),
        Err(DashboardError::DataUnavailable { .. })
    ));
}
