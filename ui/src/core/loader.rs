//! Survey CSV parsing into a [`RowStore`].
//!
//! Expected header (extra columns are ignored):
//! `Year, Class, Topic, Question, Response, Locationdesc, Data_value,
//! Sample_Size, Confidence_limit_Low, Confidence_limit_High`.

use std::io::Read;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::record::{Record, RowStore};

const REQUIRED_COLUMNS: [&str; 7] = [
    "Year",
    "Class",
    "Topic",
    "Question",
    "Response",
    "Locationdesc",
    "Data_value",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {source_name}: {message}")]
    Fetch {
        source_name: String,
        message: String,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset is missing required column `{0}`")]
    MissingColumn(&'static str),
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Class")]
    class: String,
    #[serde(rename = "Topic")]
    topic: String,
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Locationdesc")]
    region: String,
    #[serde(rename = "Data_value", default)]
    data_value: String,
    #[serde(rename = "Sample_Size", default)]
    sample_size: String,
    #[serde(rename = "Confidence_limit_Low", default)]
    ci_low: String,
    #[serde(rename = "Confidence_limit_High", default)]
    ci_high: String,
}

pub fn load_rows_from_str(text: &str) -> Result<RowStore, LoadError> {
    load_rows_from_reader(text.as_bytes())
}

pub fn load_rows_from_reader<R: Read>(reader: R) -> Result<RowStore, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut malformed = 0usize;

    for result in rdr.deserialize::<RawRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                debug!(target: "riskatlas::loader", error = %err, "skipping malformed row");
                malformed += 1;
                continue;
            }
        };
        let Some(value) = parse_number(&raw.data_value) else {
            skipped += 1;
            continue;
        };

        records.push(Record {
            year: raw.year,
            category: raw.class,
            topic: raw.topic,
            question: raw.question,
            response: raw.response,
            region: raw.region,
            value,
            sample_size: parse_number(&raw.sample_size),
            ci_low: parse_number(&raw.ci_low),
            ci_high: parse_number(&raw.ci_high),
        });
    }

    if skipped > 0 || malformed > 0 {
        warn!(
            target: "riskatlas::loader",
            skipped, malformed, "dropped rows without a numeric Data_value or with malformed fields"
        );
    }
    debug!(target: "riskatlas::loader", rows = records.len(), "parsed survey rows");

    Ok(RowStore::from_records(records))
}

/// Empty or unparsable fields are absent rather than zero.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
