//! Measurement pipeline.
//!
//! Chains threshold selection, binarization, labeling, and area aggregation.
//! Every stage takes the previous stage's output by reference and returns a
//! fresh value; nothing is cached between calls.

mod params;
mod pipeline;
mod result;

pub use params::MeasureParams;
pub use pipeline::{measure, ObjectMeasurer};
pub use result::MeasureResult;
