use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};

use water_quality_dashboard::data::loader::{DATE_COLUMN, LOCATION_COLUMN};
use water_quality_dashboard::data::model::Metric;
use water_quality_dashboard::registry::{SiteKind, sites_of_kind};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Water temperature follows the season, peaking in late July.
fn seasonal_temperature(date: NaiveDate) -> f64 {
    let phase = (date.ordinal() as f64 - 200.0) / 365.0 * 2.0 * std::f64::consts::PI;
    13.0 + 12.0 * phase.cos()
}

fn simulate(rng: &mut SimpleRng, date: NaiveDate, site_index: usize) -> [f64; Metric::COUNT] {
    // Downstream sites run slightly more alkaline and carry more nutrients.
    let offset = site_index as f64 * 0.08;
    let temperature = seasonal_temperature(date) + rng.gauss(0.0, 1.5);

    let mut values = [0.0; Metric::COUNT];
    values[Metric::Ph.index()] = rng.gauss(7.9 + offset, 0.35);
    values[Metric::Ammonia.index()] = rng.gauss(0.08 + offset * 0.2, 0.05).abs();
    values[Metric::EColi.index()] = rng.gauss(5.0 + offset, 1.2).exp().round();
    values[Metric::Nitrate.index()] = rng.gauss(4.0 + offset * 5.0, 1.5).abs();
    values[Metric::DissolvedOxygen.index()] = (12.5 - 0.2 * temperature + rng.gauss(0.0, 0.6)).max(0.5);
    values[Metric::TotalSuspendedSolids.index()] = rng.gauss(3.4 + offset, 0.6).exp().round();
    values[Metric::Temperature.index()] = temperature;
    values
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let sites: Vec<&str> = sites_of_kind(SiteKind::SamplingLocation)
        .map(|s| s.name)
        .collect();

    let output_path = "SF_water.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;

    let mut header = vec![DATE_COLUMN, LOCATION_COLUMN];
    header.extend(Metric::ALL.iter().map(|m| m.column()));
    writer.write_record(&header).context("writing header")?;

    let start = NaiveDate::from_ymd_opt(2019, 4, 1).context("invalid start date")?;
    let end = NaiveDate::from_ymd_opt(2023, 10, 31).context("invalid end date")?;

    let mut rows = 0usize;
    let mut date = start;
    while date <= end {
        // Samples are only collected April through October.
        if (4..=10).contains(&date.month()) {
            for (site_index, site) in sites.iter().enumerate() {
                let values = simulate(&mut rng, date, site_index);

                let mut record = vec![date.format("%Y-%m-%d").to_string(), site.to_string()];
                for v in values {
                    // About one reading in a hundred is missing.
                    if rng.next_f64() < 0.01 {
                        record.push(String::new());
                    } else {
                        record.push(format!("{v:.2}"));
                    }
                }
                writer.write_record(&record).context("writing sample")?;
                rows += 1;
            }
        }
        date += Duration::days(7);
    }

    writer.flush().context("flushing output file")?;

    println!(
        "Wrote {rows} samples for {} sites to {output_path}",
        sites.len()
    );
    Ok(())
}
