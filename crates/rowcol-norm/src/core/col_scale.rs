//! Column-sum accumulation and the completeness barrier.
//!
//! [`ColumnAccumulator`] carries the running per-column sums of
//! row-normalized values. [`ColumnScales`] can only be obtained by consuming
//! a finished accumulator, so no scale value can be observed before every
//! row's contribution has landed: the barrier is enforced by move semantics
//! rather than a runtime flag.

use crate::types::Element;

/// Running per-column sums of row-normalized values.
///
/// One contribution per row per column; accumulation is associative and
/// commutative up to floating-point rounding, so partial accumulators built
/// over disjoint row chunks may be merged in any order.
#[derive(Debug, Clone)]
pub struct ColumnAccumulator<E> {
    sums: Vec<E>,
    rows_seen: usize,
}

impl<E: Element> ColumnAccumulator<E> {
    /// Zero-initialized accumulator for `cols` columns.
    pub fn new(cols: usize) -> Self {
        Self {
            sums: vec![E::ZERO; cols],
            rows_seen: 0,
        }
    }

    /// Fold one row-normalized row into the running sums.
    pub fn absorb_row(&mut self, tmp_row: &[E]) {
        debug_assert_eq!(tmp_row.len(), self.sums.len());
        for (sum, &v) in self.sums.iter_mut().zip(tmp_row) {
            *sum += v;
        }
        self.rows_seen += 1;
    }

    /// Merge a partial accumulator built over a disjoint set of rows.
    pub fn merge(&mut self, other: Self) {
        debug_assert_eq!(other.sums.len(), self.sums.len());
        for (sum, v) in self.sums.iter_mut().zip(other.sums) {
            *sum += v;
        }
        self.rows_seen += other.rows_seen;
    }

    /// Number of rows absorbed so far (directly or via merge).
    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    /// The running column sums.
    pub fn sums(&self) -> &[E] {
        &self.sums
    }

    /// Cross the completeness barrier: divide each column sum by the row
    /// count, consuming the accumulator.
    ///
    /// `rows` is the fixed row count R of the kernel; the accumulator must
    /// have absorbed exactly that many rows.
    pub fn into_scales(mut self, rows: usize) -> ColumnScales<E> {
        debug_assert_eq!(
            self.rows_seen, rows,
            "scale computation before accumulation finished"
        );
        let divisor = E::from_row_count(rows);
        for sum in &mut self.sums {
            *sum = *sum / divisor;
        }
        ColumnScales { scales: self.sums }
    }
}

/// Per-column scale factors: the mean of each column's row-normalized
/// values. Exists only on the far side of the completeness barrier.
#[derive(Debug, Clone)]
pub struct ColumnScales<E> {
    scales: Vec<E>,
}

impl<E: Element> ColumnScales<E> {
    /// The scale vector, one entry per column.
    pub fn as_slice(&self) -> &[E] {
        &self.scales
    }
}
