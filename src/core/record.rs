use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

use crate::core::MeasurementColumn;
use crate::error::{ExplorerError, ExplorerResult};

/// One penguin observation.
///
/// Field names match the CSV headers and are reused verbatim as Vega-Lite
/// field names when the record is embedded into a chart document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub species: String,
    #[serde(default, deserialize_with = "missing_label")]
    pub island: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub bill_length_mm: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub bill_depth_mm: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub flipper_length_mm: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub body_mass_g: Option<f64>,
    #[serde(default, deserialize_with = "missing_label")]
    pub sex: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub year: Option<i32>,
}

/// Text cells spelled `NA` are missing, like the numeric ones.
fn missing_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.filter(|value| !value.is_empty() && value != "NA"))
}

impl Record {
    /// Creates a record with only species and the four measurements set.
    #[must_use]
    pub fn new(
        species: impl Into<String>,
        bill_length_mm: Option<f64>,
        bill_depth_mm: Option<f64>,
        flipper_length_mm: Option<f64>,
        body_mass_g: Option<f64>,
    ) -> Self {
        Self {
            species: species.into(),
            island: None,
            bill_length_mm,
            bill_depth_mm,
            flipper_length_mm,
            body_mass_g,
            sex: None,
            year: None,
        }
    }

    /// Value of a measurement column, `None` when missing or non-finite.
    #[must_use]
    pub fn measurement(&self, column: MeasurementColumn) -> Option<f64> {
        let value = match column {
            MeasurementColumn::FlipperLength => self.flipper_length_mm,
            MeasurementColumn::BillLength => self.bill_length_mm,
            MeasurementColumn::BodyMass => self.body_mass_g,
            MeasurementColumn::BillDepth => self.bill_depth_mm,
        };
        value.filter(|v| v.is_finite())
    }

    /// Returns `true` when every listed measurement is present.
    #[must_use]
    pub fn is_complete_for(&self, columns: &[MeasurementColumn]) -> bool {
        columns
            .iter()
            .all(|column| self.measurement(*column).is_some())
    }
}

/// Immutable in-memory dataset, loaded once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> ExplorerResult<Self> {
        if records.is_empty() {
            return Err(ExplorerError::InvalidDataset(
                "dataset contains no records".to_owned(),
            ));
        }
        if let Some(index) = records
            .iter()
            .position(|record| record.species.trim().is_empty())
        {
            return Err(ExplorerError::InvalidDataset(format!(
                "record {index} has an empty species label"
            )));
        }

        Ok(Self { records })
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct species labels, sorted ascending like a nominal Vega scale domain.
    #[must_use]
    pub fn species_domain(&self) -> SmallVec<[&str; 4]> {
        let mut domain: SmallVec<[&str; 4]> = SmallVec::new();
        for record in &self.records {
            let species = record.species.as_str();
            if let Err(slot) = domain.binary_search(&species) {
                domain.insert(slot, species);
            }
        }
        domain
    }

    /// Records that carry a value for every listed measurement, in load order.
    pub fn complete_for<'a>(
        &'a self,
        columns: &'a [MeasurementColumn],
    ) -> impl Iterator<Item = &'a Record> + 'a {
        self.records
            .iter()
            .filter(move |record| record.is_complete_for(columns))
    }
}
