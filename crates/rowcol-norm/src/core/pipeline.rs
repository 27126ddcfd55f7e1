//! Invocation drivers: buffer lifecycle, phase machine, Loader and Writer.
//!
//! One invocation moves a single R×C matrix through
//! `LOAD → ACCUMULATE → SCALE → WRITE → DONE`. No transition is skipped;
//! `DONE` is terminal and releases the working and intermediate buffers
//! (they are owned locals, dropped on return). No state survives between
//! invocations.
//!
//! Two drivers share every stage implementation:
//!
//! - [`run_staged`]: each phase runs to completion before the next starts.
//!   ACCUMULATE is lane-chunked and may use the rayon pool.
//! - [`run_streamed`]: LOAD is fused with ACCUMULATE row by row, so
//!   normalization of row i overlaps loading of row i+1 in program order —
//!   the classic producer/consumer prefix overlap. SCALE still waits for the
//!   last row: the accumulator must be consumed to produce scales.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::core::col_scale::{ColumnAccumulator, ColumnScales};
use crate::core::lanes::LaneParams;
use crate::core::row_norm::{accumulate_rows, normalize_row};
use crate::error::{KernelError, Result};
use crate::stream::{MatrixSink, MatrixSource};
use crate::types::Element;

/// Phase of one kernel invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Draining the input stream into the working matrix.
    Load,
    /// Row normalization fused with column-sum accumulation.
    Accumulate,
    /// Column sums divided by the row count (the single serialization point).
    Scale,
    /// Combining intermediate values with scales and pushing downstream.
    Write,
    /// Terminal; buffers released.
    Done,
}

/// Staged driver: LOAD the whole matrix, then ACCUMULATE with lane chunking,
/// then SCALE, then WRITE.
pub(crate) fn run_staged<E, S, K>(
    rows: usize,
    cols: usize,
    lanes: LaneParams,
    source: &mut S,
    sink: &mut K,
) -> Result<()>
where
    E: Element,
    S: MatrixSource<E>,
    K: MatrixSink<E>,
{
    let total = rows * cols;
    debug!(rows, cols, ?lanes, "invocation start (staged)");

    trace!(phase = ?Phase::Load, "enter");
    let mut a = vec![E::ZERO; total];
    load_into(source, &mut a, total)?;

    trace!(phase = ?Phase::Accumulate, "enter");
    let mut tmp = vec![E::ZERO; total];
    let acc = accumulate_rows(&a, &mut tmp, cols, lanes);

    trace!(phase = ?Phase::Scale, "enter");
    let scales = acc.into_scales(rows);

    trace!(phase = ?Phase::Write, "enter");
    write_output(rows, cols, &tmp, &scales, sink)?;

    trace!(phase = ?Phase::Done, "enter");
    debug!(elements = total, "invocation complete");
    Ok(())
}

/// Streaming driver: LOAD and ACCUMULATE interleave one row at a time, so
/// already-loaded rows are normalized while later rows are still arriving.
pub(crate) fn run_streamed<E, S, K>(
    rows: usize,
    cols: usize,
    source: &mut S,
    sink: &mut K,
) -> Result<()>
where
    E: Element,
    S: MatrixSource<E>,
    K: MatrixSink<E>,
{
    let total = rows * cols;
    debug!(rows, cols, "invocation start (streamed)");

    let mut a = vec![E::ZERO; total];
    let mut tmp = vec![E::ZERO; total];
    let mut acc = ColumnAccumulator::new(cols);
    let mut got = 0usize;

    for i in 0..rows {
        let start = i * cols;
        for slot in &mut a[start..start + cols] {
            match source.pull() {
                Some(v) => {
                    *slot = v;
                    got += 1;
                }
                None => {
                    return Err(KernelError::InputExhausted {
                        expected: total,
                        got,
                    })
                }
            }
        }
        normalize_row(&a[start..start + cols], &mut tmp[start..start + cols]);
        acc.absorb_row(&tmp[start..start + cols]);
        trace!(row = i, "row loaded and accumulated");
    }

    trace!(phase = ?Phase::Scale, "enter");
    let scales = acc.into_scales(rows);

    trace!(phase = ?Phase::Write, "enter");
    write_output(rows, cols, &tmp, &scales, sink)?;

    trace!(phase = ?Phase::Done, "enter");
    debug!(elements = total, "invocation complete");
    Ok(())
}

/// Drain exactly `expected` elements from the source.
///
/// Runs before anything is pushed downstream, so a short input aborts the
/// invocation with no partial output emitted.
fn load_into<E, S>(source: &mut S, a: &mut [E], expected: usize) -> Result<()>
where
    E: Element,
    S: MatrixSource<E>,
{
    for (got, slot) in a.iter_mut().enumerate() {
        match source.pull() {
            Some(v) => *slot = v,
            None => return Err(KernelError::InputExhausted { expected, got }),
        }
    }
    Ok(())
}

/// WRITE phase: combine each intermediate row with the column scales and
/// push the result row-major.
///
/// Row combination is independent per element and may run on the rayon
/// pool; the push loop stays serial to preserve stream order. A blocked
/// sink blocks here and nowhere upstream — SCALE has already completed.
fn write_output<E, K>(
    rows: usize,
    cols: usize,
    tmp: &[E],
    scales: &ColumnScales<E>,
    sink: &mut K,
) -> Result<()>
where
    E: Element,
    K: MatrixSink<E>,
{
    let total = rows * cols;
    let mut out = vec![E::ZERO; total];

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(cols)
        .zip(tmp.par_chunks(cols))
        .for_each(|(out_row, tmp_row)| combine_row(tmp_row, scales.as_slice(), out_row));

    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(cols)
        .zip(tmp.chunks(cols))
        .for_each(|(out_row, tmp_row)| combine_row(tmp_row, scales.as_slice(), out_row));

    for (written, &v) in out.iter().enumerate() {
        sink.push(v).map_err(|_| KernelError::OutputClosed {
            written,
            expected: total,
        })?;
    }
    Ok(())
}

#[inline]
fn combine_row<E: Element>(tmp_row: &[E], scales: &[E], out_row: &mut [E]) {
    for ((dst, &t), &s) in out_row.iter_mut().zip(tmp_row).zip(scales) {
        *dst = t * s;
    }
}
