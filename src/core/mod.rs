pub mod binning;
pub mod columns;
pub mod record;

pub use binning::{BinPlan, extent};
pub use columns::{ColumnDescriptor, MeasurementColumn, descriptors};
pub use record::{Dataset, Record};
