use crate::{AreaTable, LabelMap, Polarity};
use objarea_core::BinaryMask;

/// Output of a measurement run. Each field is the output of one stage.
#[derive(Clone, Debug)]
pub struct MeasureResult {
    /// Cutoff actually applied, after resolving the threshold mode.
    pub threshold: u8,
    pub polarity: Polarity,
    pub mask: BinaryMask,
    pub labels: LabelMap,
    pub areas: AreaTable,
}

impl MeasureResult {
    pub fn num_objects(&self) -> usize {
        self.areas.len()
    }
}
