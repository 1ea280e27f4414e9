use std::collections::BTreeSet;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{BinPlan, MeasurementColumn, Record, extent};
use crate::error::ExplorerResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub species: String,
}

/// One histogram bar stack under an empty (full-range) brush.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    /// Per-species counts in species-domain order.
    pub counts: IndexMap<String, usize>,
}

impl HistogramBin {
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Deterministic summary of what a chart document plots.
///
/// Mirrors what Vega renders client-side before any brush interaction, so the
/// composition can be inspected without a browser. Each panel drops records
/// missing its own fields, like Vega-Lite's default invalid-value filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionSnapshot {
    pub x_column: MeasurementColumn,
    pub y_column: MeasurementColumn,
    pub histogram_column: MeasurementColumn,
    /// Records with both x and y, one scatter point each.
    pub plotted_records: usize,
    /// Records the scatter leaves out for a missing x or y.
    pub excluded_records: usize,
    /// Records with a histogram value, one bar segment each.
    pub histogram_records: usize,
    pub species_domain: Vec<String>,
    pub scatter_points: Vec<ScatterPoint>,
    pub bin_plan: Option<BinPlan>,
    pub histogram: Vec<HistogramBin>,
}

impl CompositionSnapshot {
    /// Builds the snapshot from the records embedded into the document.
    pub fn from_records(
        x_column: MeasurementColumn,
        y_column: MeasurementColumn,
        histogram_column: MeasurementColumn,
        records: &[Record],
        max_bins: u32,
    ) -> ExplorerResult<Self> {
        let scatter_points: Vec<ScatterPoint> = records
            .iter()
            .filter_map(|record| {
                Some(ScatterPoint {
                    x: record.measurement(x_column)?,
                    y: record.measurement(y_column)?,
                    species: record.species.clone(),
                })
            })
            .collect();

        let values: Vec<(f64, &str)> = records
            .iter()
            .filter_map(|record| {
                record
                    .measurement(histogram_column)
                    .map(|value| (value, record.species.as_str()))
            })
            .collect();

        let species_domain: Vec<String> = scatter_points
            .iter()
            .map(|point| point.species.as_str())
            .chain(values.iter().map(|(_, species)| *species))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect();

        let (bin_plan, histogram) = match extent(values.iter().map(|(value, _)| *value)) {
            Some(bounds) => {
                let plan = BinPlan::nice(bounds, max_bins)?;
                (Some(plan), histogram_bins(plan, &values, &species_domain))
            }
            None => (None, Vec::new()),
        };

        Ok(Self {
            x_column,
            y_column,
            histogram_column,
            plotted_records: scatter_points.len(),
            excluded_records: records.len() - scatter_points.len(),
            histogram_records: values.len(),
            species_domain,
            scatter_points,
            bin_plan,
            histogram,
        })
    }

    /// Sum of all bar heights across bins.
    #[must_use]
    pub fn histogram_total(&self) -> usize {
        self.histogram.iter().map(HistogramBin::total).sum()
    }

    /// Plotted `(x, y)` pairs as a set, independent of record order.
    #[must_use]
    pub fn coordinate_set(&self) -> BTreeSet<(OrderedFloat<f64>, OrderedFloat<f64>)> {
        self.scatter_points
            .iter()
            .map(|point| (OrderedFloat(point.x), OrderedFloat(point.y)))
            .collect()
    }
}

fn histogram_bins(
    plan: BinPlan,
    values: &[(f64, &str)],
    species_domain: &[String],
) -> Vec<HistogramBin> {
    let mut bins: Vec<HistogramBin> = (0..plan.bin_count())
        .map(|index| {
            let (start, end) = plan.bin_bounds(index);
            HistogramBin {
                start,
                end,
                counts: species_domain
                    .iter()
                    .map(|species| (species.clone(), 0))
                    .collect(),
            }
        })
        .collect();

    for (value, species) in values {
        let Some(index) = plan.bin_index(*value) else {
            continue;
        };
        if let Some(count) = bins[index].counts.get_mut(*species) {
            *count += 1;
        }
    }

    bins
}
