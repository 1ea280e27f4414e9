//! Startup dataset loading.
//!
//! The dataset is fetched exactly once, before the server starts. Any fetch or
//! parse failure is fatal: there is no degraded mode.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{Dataset, MeasurementColumn, Record};
use crate::error::{ExplorerError, ExplorerResult};

pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/MUSA-550-Fall-2022/week-2/master/data/penguins.csv";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const SPECIES_COLUMN: &str = "species";

/// Where the startup CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetSource {
    Remote { url: String },
    File { path: PathBuf },
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self::Remote {
            url: DEFAULT_DATASET_URL.to_owned(),
        }
    }
}

impl DatasetSource {
    /// `http://` and `https://` locations are fetched, anything else is a file path.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Remote {
                url: location.to_owned(),
            }
        } else {
            Self::File {
                path: PathBuf::from(location),
            }
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote { url } => f.write_str(url),
            Self::File { path } => write!(f, "{}", path.display()),
        }
    }
}

/// Loads and parses the dataset from its configured source.
pub fn load_dataset(source: &DatasetSource) -> ExplorerResult<Dataset> {
    let dataset = match source {
        DatasetSource::Remote { url } => {
            let body = fetch_remote(url)?;
            parse_dataset(body.as_bytes())?
        }
        DatasetSource::File { path } => {
            let file = File::open(path).map_err(|e| ExplorerError::DatasetFetch {
                location: path.display().to_string(),
                reason: e.to_string(),
            })?;
            parse_dataset(file)?
        }
    };

    info!(
        location = %source,
        records = dataset.len(),
        species = dataset.species_domain().len(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn fetch_remote(url: &str) -> ExplorerResult<String> {
    let fetch_error = |reason: String| ExplorerError::DatasetFetch {
        location: url.to_owned(),
        reason,
    };

    debug!(url, "fetching dataset");
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| fetch_error(format!("http client error: {e}")))?;
    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|e| fetch_error(format!("request error: {e}")))?
        .text()
        .map_err(|e| fetch_error(format!("body decode error: {e}")))
}

/// Parses penguin CSV content.
///
/// Headers are checked before any row is read so a missing column fails with a
/// precise error. Unparsable numeric cells (`NA`, empty) become missing values.
pub fn parse_dataset<R: Read>(reader: R) -> ExplorerResult<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| ExplorerError::InvalidDataset(format!("failed to read csv headers: {e}")))?
        .clone();
    let required = std::iter::once(SPECIES_COLUMN)
        .chain(MeasurementColumn::ALL.into_iter().map(MeasurementColumn::key));
    for column in required {
        if !headers.iter().any(|header| header == column) {
            return Err(ExplorerError::MissingColumn {
                column: column.to_owned(),
            });
        }
    }

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<Record>().enumerate() {
        let record = row.map_err(|e| {
            ExplorerError::InvalidDataset(format!("failed to parse row {}: {e}", index + 1))
        })?;
        records.push(record);
    }

    debug!(rows = records.len(), "parsed dataset rows");
    Dataset::new(records)
}
