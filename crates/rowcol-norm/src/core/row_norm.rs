//! Row normalization with fused column-sum accumulation.
//!
//! Phase 1 of the pipeline. Each row is reduced to its sum, divided by the
//! bias-adjusted denominator `row_sum + 1`, and the normalized values are
//! folded into the column accumulator in the same pass — one traversal of
//! the matrix instead of the naive normalize-then-resum pair.
//!
//! Rows are independent; only the column accumulator is shared, and it is
//! kept private per lane chunk and merged afterwards, so chunks may run
//! serially or on the rayon pool without coordination.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::col_scale::ColumnAccumulator;
use crate::core::lanes::LaneParams;
use crate::types::Element;

/// Reduce one row to its sum.
#[inline]
pub fn row_sum<E: Element>(row: &[E]) -> E {
    row.iter().copied().sum()
}

/// Normalize one row into `tmp_row` by the bias-adjusted denominator.
///
/// The `+ 1` bias keeps the denominator away from zero for non-negative
/// rows. For rows summing to exactly −1 the division produces non-finite
/// values, which propagate untouched (see the crate docs).
#[inline]
pub fn normalize_row<E: Element>(row: &[E], tmp_row: &mut [E]) {
    debug_assert_eq!(row.len(), tmp_row.len());
    let denom = row_sum(row) + E::ONE;
    for (dst, &v) in tmp_row.iter_mut().zip(row) {
        *dst = v / denom;
    }
}

/// Normalize every row of `a` (row-major, `cols` columns) into `tmp` and
/// return the completed column accumulator.
///
/// Lane chunks each build a private partial accumulator; partials are merged
/// in chunk order, so the result is deterministic for a given `LaneParams`
/// regardless of how chunks are scheduled.
pub fn accumulate_rows<E: Element>(
    a: &[E],
    tmp: &mut [E],
    cols: usize,
    lanes: LaneParams,
) -> ColumnAccumulator<E> {
    debug_assert_eq!(a.len(), tmp.len());
    debug_assert_eq!(a.len() % cols, 0);

    let chunk_elems = lanes.rows_per_lane.max(1) * cols;

    #[cfg(feature = "parallel")]
    let partials: Vec<ColumnAccumulator<E>> = a
        .par_chunks(chunk_elems)
        .zip(tmp.par_chunks_mut(chunk_elems))
        .map(|(a_chunk, tmp_chunk)| accumulate_chunk(a_chunk, tmp_chunk, cols))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let partials: Vec<ColumnAccumulator<E>> = a
        .chunks(chunk_elems)
        .zip(tmp.chunks_mut(chunk_elems))
        .map(|(a_chunk, tmp_chunk)| accumulate_chunk(a_chunk, tmp_chunk, cols))
        .collect();

    let mut total = ColumnAccumulator::new(cols);
    for partial in partials {
        total.merge(partial);
    }
    total
}

/// One lane's work: normalize a contiguous block of rows and fold them into
/// a private partial accumulator.
fn accumulate_chunk<E: Element>(
    a_chunk: &[E],
    tmp_chunk: &mut [E],
    cols: usize,
) -> ColumnAccumulator<E> {
    let mut partial = ColumnAccumulator::new(cols);
    for (a_row, tmp_row) in a_chunk
        .chunks_exact(cols)
        .zip(tmp_chunk.chunks_exact_mut(cols))
    {
        normalize_row(a_row, tmp_row);
        partial.absorb_row(tmp_row);
    }
    partial
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_row_known_values() {
        // row sum 2, denom 3
        let row = [1.0f64, 1.0];
        let mut tmp = [0.0; 2];
        normalize_row(&row, &mut tmp);

        assert!((tmp[0] - 1.0 / 3.0).abs() < 1e-15);
        assert!((tmp[1] - 1.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_normalize_zero_row_is_identity() {
        // denom = 0 + 1, so the row passes through
        let row = [0.0f64, 0.0, 0.0];
        let mut tmp = [9.0; 3];
        normalize_row(&row, &mut tmp);
        assert_eq!(tmp, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normalized_row_shrinks() {
        // For non-negative rows, sum(tmp) = row_sum / (row_sum + 1) <= row_sum.
        let row = [0.5f64, 2.0, 0.25, 4.0];
        let mut tmp = [0.0; 4];
        normalize_row(&row, &mut tmp);

        let before: f64 = row.iter().sum();
        let after: f64 = tmp.iter().sum();
        assert!(after <= before);
        assert!((after - before / (before + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_row_sum_produces_non_finite() {
        // row_sum = -1: documented design gap, values propagate as non-finite
        let row = [-0.5f64, -0.5];
        let mut tmp = [0.0; 2];
        normalize_row(&row, &mut tmp);
        assert!(!tmp[0].is_finite());
    }

    #[test]
    fn test_accumulate_matches_single_lane() {
        let cols = 3;
        let a: Vec<f64> = (0..30).map(|i| (i % 7) as f64 * 0.5).collect();

        let mut tmp_one = vec![0.0; a.len()];
        let one = accumulate_rows(&a, &mut tmp_one, cols, LaneParams::new(1));

        for width in [2, 3, 4, 10, 64] {
            let mut tmp_k = vec![0.0; a.len()];
            let k = accumulate_rows(&a, &mut tmp_k, cols, LaneParams::new(width));

            assert_eq!(tmp_one, tmp_k, "tmp differs at lane width {width}");
            assert_eq!(k.rows_seen(), one.rows_seen());
            for (s1, sk) in one.sums().iter().zip(k.sums()) {
                assert!((s1 - sk).abs() < 1e-12, "sums differ at width {width}");
            }
        }
    }

    #[test]
    fn test_accumulation_order_independent() {
        let cols = 2;
        let a = vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let reversed = vec![5.0f64, 6.0, 3.0, 4.0, 1.0, 2.0];

        let mut tmp = vec![0.0; 6];
        let fwd = accumulate_rows(&a, &mut tmp, cols, LaneParams::default());
        let mut tmp_rev = vec![0.0; 6];
        let rev = accumulate_rows(&reversed, &mut tmp_rev, cols, LaneParams::default());

        for (f, r) in fwd.sums().iter().zip(rev.sums()) {
            assert!((f - r).abs() < 1e-12);
        }
    }

    #[test]
    fn test_column_sums_match_tmp() {
        // Invariant: after all rows, col_sums[j] == sum_i tmp[i][j]
        let cols = 4;
        let a: Vec<f64> = (0..20).map(|i| i as f64 * 0.1).collect();
        let mut tmp = vec![0.0; a.len()];
        let acc = accumulate_rows(&a, &mut tmp, cols, LaneParams::default());

        for j in 0..cols {
            let direct: f64 = tmp.iter().skip(j).step_by(cols).sum();
            assert!((acc.sums()[j] - direct).abs() < 1e-12);
        }
    }
}
