//! Streaming row/column mean-normalization kernel for fixed-size dense
//! matrices.
//!
//! Given an R×C matrix A, every row is first normalized by its sum plus a
//! bias of one (`tmp[i][j] = a[i][j] / (row_sum(i) + 1)`), then every column
//! of the row-normalized matrix is rescaled by the mean of that column
//! (`out[i][j] = tmp[i][j] * col_sums[j] / R`). The arithmetic is trivial;
//! the crate is about the execution strategy: streaming a matrix through a
//! fixed working set, overlapping load and compute where the one true data
//! dependency allows it, and crossing the completeness barrier (all rows
//! accumulated) exactly once before any column scale is read.
//!
//! # Quick Start
//!
//! ```
//! use rowcol_norm::normalize_matrix;
//!
//! let a = vec![1.0f64, 1.0, 1.0, 1.0];
//! let c = normalize_matrix::<f64, 2, 2>(&a).unwrap();
//! assert!((c[0] - 1.0 / 9.0).abs() < 1e-12);
//! ```
//!
//! # Streaming invocation
//!
//! R and C are const generic parameters — deployment-time constants, never
//! passed per call. The kernel talks to the world through two single-pass,
//! in-order, blocking stream traits:
//!
//! ```
//! use rowcol_norm::{ChannelSink, ChannelSource, NormKernel};
//!
//! let (in_tx, in_rx) = crossbeam_channel::bounded(8);
//! let (out_tx, out_rx) = crossbeam_channel::bounded(8);
//!
//! std::thread::spawn(move || {
//!     for i in 0..4 {
//!         in_tx.send(i as f64).unwrap();
//!     }
//! });
//! let kernel = std::thread::spawn(move || {
//!     let mut src = ChannelSource::from(in_rx);
//!     let mut sink = ChannelSink::from(out_tx);
//!     NormKernel::<2, 2>::new().run_streamed(&mut src, &mut sink)
//! });
//!
//! let out: Vec<f64> = out_rx.iter().collect();
//! kernel.join().unwrap().unwrap();
//! assert_eq!(out.len(), 4);
//! ```
//!
//! # Limitations
//!
//! The `+ 1` denominator bias only guarantees a non-zero divisor for
//! non-negative inputs. A row summing to exactly −1 produces non-finite
//! values that propagate to the output undetected.

pub mod api;
pub mod core;
pub mod error;
pub mod stream;
pub mod types;

pub use crate::api::{normalize_matrix, normalize_matrix_batched, NormKernel};
pub use crate::core::{accumulate_rows, normalize_row, row_sum};
pub use crate::core::{ColumnAccumulator, ColumnScales, LaneParams, Phase};
pub use crate::error::{KernelError, Result};
pub use crate::stream::{
    ChannelSink, ChannelSource, Disconnected, MatrixSink, MatrixSource, SliceSource, VecSink,
};
pub use crate::types::Element;
