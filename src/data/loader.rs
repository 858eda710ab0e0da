use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, Date32Array, Date64Array, Float64Array, PrimitiveArray, StringArray,
    TimestampMillisecondArray,
};
use arrow::compute::cast;
use arrow::datatypes::{ArrowTemporalType, DataType, TimeUnit};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Metric, Sample};

/// Column holding the sample timestamp.
pub const DATE_COLUMN: &str = "SampleDate";
/// Column holding the sampling-site name.
pub const LOCATION_COLUMN: &str = "Location";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sample table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `SampleDate`, `Location` and one column per metric
/// * `.json`    – `[{ "SampleDate": ..., "Location": ..., "pH": ..., ... }, ...]`
/// * `.parquet` – the same columns; dates as text, `Date32`/`Date64` or timestamps
///
/// Any unparseable date fails the whole load.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Shared parsing helpers
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a `SampleDate` cell. Date-only values land on midnight; timestamps
/// with an offset are converted to UTC.
pub fn parse_sample_date(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Some(dt) = NaiveDate::parse_from_str(text, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(dt);
        }
    }
    bail!("'{text}' is not a recognised date")
}

/// Parse a numeric cell; blank and `NaN` cells become `NaN`.
fn parse_metric_cell(text: &str) -> Result<f64> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    text.parse::<f64>()
        .with_context(|| format!("'{text}' is not a number"))
}

/// Positions of the required columns inside a header or schema.
struct ColumnIndex {
    date: usize,
    location: usize,
    metrics: [usize; Metric::COUNT],
}

impl ColumnIndex {
    fn resolve(mut find: impl FnMut(&str) -> Option<usize>) -> Result<Self> {
        let mut lookup =
            |name: &str| find(name).with_context(|| format!("missing '{name}' column"));

        let date = lookup(DATE_COLUMN)?;
        let location = lookup(LOCATION_COLUMN)?;
        let mut metrics = [0; Metric::COUNT];
        for metric in Metric::ALL {
            metrics[metric.index()] = lookup(metric.column())?;
        }
        Ok(ColumnIndex {
            date,
            location,
            metrics,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let columns = ColumnIndex::resolve(|name| headers.iter().position(|h| h.trim() == name))
        .context("CSV header")?;

    let mut samples = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        // Line 1 is the header.
        let line = row_no + 2;
        let record = result.with_context(|| format!("CSV line {line}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let sample_date = parse_sample_date(cell(columns.date))
            .with_context(|| format!("CSV line {line}: invalid '{DATE_COLUMN}'"))?;

        let mut values = [f64::NAN; Metric::COUNT];
        for metric in Metric::ALL {
            values[metric.index()] = parse_metric_cell(cell(columns.metrics[metric.index()]))
                .with_context(|| format!("CSV line {line}: invalid '{metric}'"))?;
        }

        samples.push(Sample {
            sample_date,
            location: cell(columns.location).trim().to_string(),
            values,
        });
    }

    Ok(Dataset::from_samples(samples))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "SampleDate": 1672531200000,
///     "Location": "Big Sioux River @ I-90",
///     "pH": 7.9,
///     "Ammonia": null,
///     ...
///   },
///   ...
/// ]
/// ```
///
/// `SampleDate` may be epoch milliseconds or any accepted date string.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut samples = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let sample_date = json_to_date(obj.get(DATE_COLUMN))
            .with_context(|| format!("Row {i}: invalid '{DATE_COLUMN}'"))?;

        let location = obj
            .get(LOCATION_COLUMN)
            .and_then(|v| v.as_str())
            .with_context(|| format!("Row {i}: missing or invalid '{LOCATION_COLUMN}'"))?
            .trim()
            .to_string();

        let mut values = [f64::NAN; Metric::COUNT];
        for metric in Metric::ALL {
            values[metric.index()] = json_to_f64(obj.get(metric.column()))
                .with_context(|| format!("Row {i}: invalid '{metric}'"))?;
        }

        samples.push(Sample {
            sample_date,
            location,
            values,
        });
    }

    Ok(Dataset::from_samples(samples))
}

fn json_to_date(val: Option<&JsonValue>) -> Result<NaiveDateTime> {
    match val {
        Some(JsonValue::String(s)) => parse_sample_date(s),
        Some(JsonValue::Number(n)) => {
            let millis = n
                .as_i64()
                .context("epoch milliseconds must be an integer")?;
            DateTime::from_timestamp_millis(millis)
                .map(|dt| dt.naive_utc())
                .context("timestamp out of range")
        }
        Some(other) => bail!("expected a date string or epoch milliseconds, got {other}"),
        None => bail!("value is missing"),
    }
}

fn json_to_f64(val: Option<&JsonValue>) -> Result<f64> {
    match val {
        Some(JsonValue::Null) => Ok(f64::NAN),
        Some(JsonValue::Number(n)) => n.as_f64().context("number out of range"),
        Some(JsonValue::String(s)) => parse_metric_cell(s),
        Some(other) => bail!("expected a number, got {other}"),
        None => bail!("value is missing"),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding one sample per row.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): metric columns may use any numeric
/// type, nulls become `NaN`.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut samples = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let columns = ColumnIndex::resolve(|name| schema.index_of(name).ok())
            .context("parquet schema")?;

        let dates = extract_dates(batch.column(columns.date))
            .with_context(|| format!("reading '{DATE_COLUMN}'"))?;

        let locations = cast(batch.column(columns.location).as_ref(), &DataType::Utf8)
            .with_context(|| format!("reading '{LOCATION_COLUMN}'"))?;
        let locations = locations
            .as_any()
            .downcast_ref::<StringArray>()
            .context("expected StringArray")?;

        let mut metric_values = Vec::with_capacity(Metric::COUNT);
        for metric in Metric::ALL {
            let values = extract_f64_column(batch.column(columns.metrics[metric.index()]))
                .with_context(|| format!("reading '{metric}'"))?;
            metric_values.push(values);
        }

        for (row, sample_date) in dates.into_iter().enumerate() {
            if locations.is_null(row) {
                bail!("Row {row}: null '{LOCATION_COLUMN}'");
            }
            let mut values = [f64::NAN; Metric::COUNT];
            for (slot, column) in values.iter_mut().zip(&metric_values) {
                *slot = column[row];
            }
            samples.push(Sample {
                sample_date,
                location: locations.value(row).trim().to_string(),
                values,
            });
        }
    }

    Ok(Dataset::from_samples(samples))
}

// -- Parquet / Arrow helpers --

/// Read a numeric column of any type as `f64`, nulls as `NaN`.
fn extract_f64_column(col: &ArrayRef) -> Result<Vec<f64>> {
    let as_f64 = cast(col.as_ref(), &DataType::Float64)
        .with_context(|| format!("cannot read {:?} as Float64", col.data_type()))?;
    let values = as_f64
        .as_any()
        .downcast_ref::<Float64Array>()
        .context("expected Float64Array")?;
    Ok(values.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Read the date column; text is parsed with [`parse_sample_date`].
fn extract_dates(col: &ArrayRef) -> Result<Vec<NaiveDateTime>> {
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            let text = cast(col.as_ref(), &DataType::Utf8).context("casting dates to Utf8")?;
            let text = text
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            (0..text.len())
                .map(|row| {
                    if text.is_null(row) {
                        bail!("Row {row}: null date");
                    }
                    parse_sample_date(text.value(row)).with_context(|| format!("Row {row}"))
                })
                .collect()
        }
        DataType::Date32 => {
            let days = col
                .as_any()
                .downcast_ref::<Date32Array>()
                .context("expected Date32Array")?;
            collect_datetimes(days)
        }
        DataType::Date64 => {
            let millis = col
                .as_any()
                .downcast_ref::<Date64Array>()
                .context("expected Date64Array")?;
            collect_datetimes(millis)
        }
        DataType::Timestamp(_, _) => {
            let normalized = cast(
                col.as_ref(),
                &DataType::Timestamp(TimeUnit::Millisecond, None),
            )
            .context("normalising timestamps")?;
            let millis = normalized
                .as_any()
                .downcast_ref::<TimestampMillisecondArray>()
                .context("expected TimestampMillisecondArray")?;
            collect_datetimes(millis)
        }
        other => bail!("Unsupported date column type {other:?}"),
    }
}

fn collect_datetimes<T>(array: &PrimitiveArray<T>) -> Result<Vec<NaiveDateTime>>
where
    T: ArrowTemporalType,
    i64: From<T::Native>,
{
    (0..array.len())
        .map(|row| {
            if array.is_null(row) {
                bail!("Row {row}: null date");
            }
            array
                .value_as_datetime(row)
                .with_context(|| format!("Row {row}: date out of range"))
        })
        .collect()
}
