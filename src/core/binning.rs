use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, ExplorerResult};

const BIN_BASE: f64 = 10.0;
const BIN_DIVIDE: [f64; 2] = [5.0, 2.0];
const BIN_INDEX_EPSILON: f64 = 1e-14;

/// Nice-step bin layout matching Vega's `bin` transform with `nice: true`.
///
/// The client-side histogram is binned by Vega; this plan lets the server
/// summarize the same bins without a browser.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinPlan {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl BinPlan {
    /// Builds the plan for a data extent and a maximum bin count.
    pub fn nice(extent: (f64, f64), max_bins: u32) -> ExplorerResult<Self> {
        let (mut min, mut max) = extent;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ExplorerError::InvalidData(
                "bin extent must be finite and ordered".to_owned(),
            ));
        }
        if max_bins == 0 {
            return Err(ExplorerError::InvalidData(
                "max bins must be >= 1".to_owned(),
            ));
        }

        let max_bins = f64::from(max_bins);
        let log_base = BIN_BASE.ln();
        let span = if max - min > 0.0 {
            max - min
        } else if min.abs() > 0.0 {
            min.abs()
        } else {
            1.0
        };

        let level = (max_bins.ln() / log_base).ceil();
        let mut step = BIN_BASE.powf((span.ln() / log_base).round() - level);
        while (span / step).ceil() > max_bins {
            step *= BIN_BASE;
        }
        for divisor in BIN_DIVIDE {
            let candidate = step / divisor;
            if span / candidate <= max_bins {
                step = candidate;
            }
        }

        let step_log = step.ln();
        let precision = if step_log >= 0.0 {
            0.0
        } else {
            (-step_log / log_base).trunc() + 1.0
        };
        let eps = BIN_BASE.powf(-precision - 1.0);
        let floored = (min / step + eps).floor() * step;
        min = if min < floored { floored - step } else { floored };
        max = (max / step).ceil() * step;

        Ok(Self {
            start: min,
            stop: if max == min { min + step } else { max },
            step,
        })
    }

    /// Number of bins between `start` and `stop`.
    #[must_use]
    pub fn bin_count(self) -> usize {
        let count = ((self.stop - self.start) / self.step - 1e-9).ceil();
        if count < 1.0 { 1 } else { count as usize }
    }

    /// Bin index for a value, `None` for non-finite input.
    ///
    /// Values outside the plan clamp to the first or last bin, like Vega's
    /// `bin` transform; the last bin is closed on both ends.
    #[must_use]
    pub fn bin_index(self, value: f64) -> Option<usize> {
        if !value.is_finite() {
            return None;
        }
        let clamped = value.min(self.stop - self.step).max(self.start);
        let index = (BIN_INDEX_EPSILON + (clamped - self.start) / self.step).floor() as usize;
        Some(index.min(self.bin_count() - 1))
    }

    /// `[start, end)` bounds of a bin.
    #[must_use]
    pub fn bin_bounds(self, index: usize) -> (f64, f64) {
        let start = self.start + self.step * index as f64;
        (start, start + self.step)
    }
}

/// Min/max of the finite values, `None` when there are none.
#[must_use]
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut bounds: Option<(OrderedFloat<f64>, OrderedFloat<f64>)> = None;
    for value in values.into_iter().filter(|v| v.is_finite()) {
        let value = OrderedFloat(value);
        bounds = Some(match bounds {
            None => (value, value),
            Some((min, max)) => (min.min(value), max.max(value)),
        });
    }
    bounds.map(|(min, max)| (min.into_inner(), max.into_inner()))
}
