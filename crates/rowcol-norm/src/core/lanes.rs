//! Execution lane configuration.

use std::ops::Range;

/// Tuning knob for the data-parallel accumulation loop.
///
/// Rows are processed in contiguous chunks of `rows_per_lane`; each chunk
/// owns a private partial column accumulator, and partials are merged at the
/// completeness barrier. The chunk width is a property of the execution
/// engine, not of the algorithm: any value ≥ 1 produces the same result up
/// to floating-point summation order.
///
/// | Parameter | Purpose | Default |
/// |-----------|---------|---------|
/// | `rows_per_lane` | Rows per partial accumulator | 4 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneParams {
    /// Rows handled per lane chunk. Clamped to at least 1.
    pub rows_per_lane: usize,
}

impl Default for LaneParams {
    fn default() -> Self {
        Self { rows_per_lane: 4 }
    }
}

impl LaneParams {
    /// Create lane parameters with an explicit chunk width.
    pub fn new(rows_per_lane: usize) -> Self {
        Self {
            rows_per_lane: rows_per_lane.max(1),
        }
    }

    /// Iterate the row index ranges covered by each lane chunk.
    ///
    /// The final chunk may be short when `rows` is not a multiple of the
    /// chunk width.
    pub fn row_chunks(&self, rows: usize) -> impl Iterator<Item = Range<usize>> {
        let width = self.rows_per_lane.max(1);
        (0..rows.div_ceil(width)).map(move |chunk| {
            let start = chunk * width;
            start..(start + width).min(rows)
        })
    }
}
