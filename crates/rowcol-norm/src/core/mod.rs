//! Core pipeline stages for the normalization kernel.
//!
//! Data flows strictly left to right through four stages, with one feedback
//! constraint: column scales cannot be computed until every row's
//! contribution to the column sums has been accumulated.
//!
//! ```text
//! ┌────────┐   ┌───────────────┐   ┌──────────────┐   ┌─────────────────┐
//! │ Loader │ → │ RowNormalizer │ → │ ColumnScaler │ → │ Combiner/Writer │
//! └────────┘   └───────────────┘   └──────────────┘   └─────────────────┘
//!   input        tmp[i][j] =          scales[j] =        out[i][j] =
//!   stream       a[i][j] /            col_sums[j]        tmp[i][j] *
//!   → a          (row_sum + 1)        / R                scales[j]
//!                col_sums[j] +=       ▲ completeness     → output stream
//!                tmp[i][j]            │ barrier
//! ```
//!
//! # Stage independence
//!
//! | Stage | Parallelism | Shared state |
//! |-------|-------------|--------------|
//! | Loader | serial (stream order) | — |
//! | RowNormalizer | embarrassingly parallel over rows | column accumulator (per-lane partials, merged) |
//! | ColumnScaler | single serialization point | consumes the accumulator |
//! | Combiner/Writer | parallel over (i, j), serial push | — |
//!
//! # Module contents
//!
//! - [`pipeline`](pipeline): invocation drivers and the [`Phase`] machine
//! - [`row_norm`](row_norm): fused normalize + accumulate (phase 1)
//! - [`col_scale`](col_scale): [`ColumnAccumulator`], [`ColumnScales`], and
//!   the move-enforced completeness barrier
//! - [`lanes`](lanes): [`LaneParams`], the data-parallel chunking knob

mod col_scale;
mod lanes;
mod pipeline;
mod row_norm;

pub use col_scale::{ColumnAccumulator, ColumnScales};
pub use lanes::LaneParams;
pub use pipeline::Phase;
pub(crate) use pipeline::{run_staged, run_streamed};
pub use row_norm::{accumulate_rows, normalize_row, row_sum};
