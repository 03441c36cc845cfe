// Domain models for the drift pipeline

mod observation;
mod report;

pub use observation::{FlatObservation, ParamValue, RawSnapshot, ScalarValue};
pub use report::{ChangeRecord, FleetSummary};
