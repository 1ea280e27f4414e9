use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, ExplorerResult};

/// Numeric morphology columns eligible for axis selection.
///
/// Variant order is the display order of the dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MeasurementColumn {
    #[serde(rename = "flipper_length_mm")]
    FlipperLength,
    #[serde(rename = "bill_length_mm")]
    BillLength,
    #[serde(rename = "body_mass_g")]
    BodyMass,
    #[serde(rename = "bill_depth_mm")]
    BillDepth,
}

/// One dropdown entry: internal key plus the label shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub key: &'static str,
    pub label: &'static str,
}

impl MeasurementColumn {
    pub const ALL: [MeasurementColumn; 4] = [
        MeasurementColumn::FlipperLength,
        MeasurementColumn::BillLength,
        MeasurementColumn::BodyMass,
        MeasurementColumn::BillDepth,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::FlipperLength => "flipper_length_mm",
            Self::BillLength => "bill_length_mm",
            Self::BodyMass => "body_mass_g",
            Self::BillDepth => "bill_depth_mm",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FlipperLength => "Flipper Length",
            Self::BillLength => "Bill Length",
            Self::BodyMass => "Body Mass",
            Self::BillDepth => "Bill Depth",
        }
    }

    #[must_use]
    pub fn descriptor(self) -> ColumnDescriptor {
        ColumnDescriptor {
            key: self.key(),
            label: self.label(),
        }
    }

    /// Resolves a raw key coming from the UI event channel.
    pub fn from_key(key: &str) -> ExplorerResult<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.key() == key)
            .ok_or_else(|| ExplorerError::UnknownColumn {
                key: key.to_owned(),
            })
    }
}

impl FromStr for MeasurementColumn {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

impl fmt::Display for MeasurementColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The registry in display order.
#[must_use]
pub fn descriptors() -> [ColumnDescriptor; 4] {
    MeasurementColumn::ALL.map(MeasurementColumn::descriptor)
}
