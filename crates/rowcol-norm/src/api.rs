use crate::core::{run_staged, run_streamed, LaneParams};
use crate::error::{KernelError, Result};
use crate::stream::{MatrixSink, MatrixSource, SliceSource, VecSink};
use crate::types::Element;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Normalize one R×C matrix held in a slice.
///
/// Row-normalizes every row by `row_sum + 1`, then rescales every column by
/// the mean of its normalized values.
///
/// # Arguments
/// - `a`: Matrix data in row-major order, exactly `R * C` elements
///
/// # Returns
/// Result matrix of size R×C in row-major order
///
/// # Example
///
/// ```
/// use rowcol_norm::normalize_matrix;
///
/// // 2x2 all-ones: row sums 2, denom 3, tmp 1/3, scales 1/3
/// let a = vec![1.0f64; 4];
/// let c = normalize_matrix::<f64, 2, 2>(&a).unwrap();
/// assert!((c[0] - 1.0 / 9.0).abs() < 1e-12);
/// ```
pub fn normalize_matrix<E: Element, const R: usize, const C: usize>(a: &[E]) -> Result<Vec<E>> {
    if a.len() != R * C {
        return Err(KernelError::DimensionMismatch(format!(
            "expected {} elements for a {R}x{C} matrix, got {}",
            R * C,
            a.len()
        )));
    }

    let mut source = SliceSource::new(a);
    let mut sink = VecSink::with_capacity(R * C);
    NormKernel::<R, C>::new().run(&mut source, &mut sink)?;
    Ok(sink.into_inner())
}

/// Normalize a batch of independent R×C matrices.
///
/// Each matrix is one full kernel invocation; invocations share no state and
/// run on the rayon pool when the `parallel` feature is enabled.
///
/// # Example
///
/// ```
/// use rowcol_norm::normalize_matrix_batched;
///
/// let batch = vec![vec![1.0f64; 4], vec![0.0f64; 4]];
/// let out = normalize_matrix_batched::<f64, 2, 2>(&batch).unwrap();
/// assert_eq!(out.len(), 2);
/// assert_eq!(out[1], vec![0.0; 4]);
/// ```
pub fn normalize_matrix_batched<E: Element, const R: usize, const C: usize>(
    batch: &[Vec<E>],
) -> Result<Vec<Vec<E>>> {
    #[cfg(feature = "parallel")]
    {
        batch
            .par_iter()
            .map(|a| normalize_matrix::<E, R, C>(a))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        batch
            .iter()
            .map(|a| normalize_matrix::<E, R, C>(a))
            .collect()
    }
}

/// Builder for configuring and running normalization kernel invocations.
///
/// R and C are deployment-time constants baked into the type, the way the
/// working-set layout fixes them; they are never passed per call. One `run`
/// processes exactly one matrix and releases every buffer on return.
///
/// # Numeric degeneracy
///
/// The `row_sum + 1` bias keeps the denominator strictly positive for
/// non-negative inputs. A row summing to exactly −1 divides by zero; the
/// non-finite results propagate to the output undetected. This is a
/// documented limitation, not a defended edge.
///
/// # Example
///
/// ```
/// use rowcol_norm::{NormKernel, SliceSource, VecSink};
///
/// let a = vec![1.0f64; 4];
/// let mut src = SliceSource::new(&a);
/// let mut sink = VecSink::with_capacity(4);
///
/// NormKernel::<2, 2>::new().lanes(2).run(&mut src, &mut sink).unwrap();
/// assert_eq!(sink.into_inner().len(), 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NormKernel<const R: usize, const C: usize> {
    lanes: LaneParams,
}

impl<const R: usize, const C: usize> Default for NormKernel<R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const R: usize, const C: usize> NormKernel<R, C> {
    /// Create a kernel with default lane parameters.
    pub fn new() -> Self {
        assert!(R > 0 && C > 0, "matrix dimensions must be non-zero");
        Self {
            lanes: LaneParams::default(),
        }
    }

    /// Set the lane chunk width for the accumulation phase.
    pub fn lanes(mut self, rows_per_lane: usize) -> Self {
        self.lanes = LaneParams::new(rows_per_lane);
        self
    }

    /// The configured lane parameters.
    pub fn lane_params(&self) -> LaneParams {
        self.lanes
    }

    /// Run one staged invocation: load everything, then accumulate with lane
    /// chunking, then scale, then write.
    pub fn run<E, S, K>(&self, source: &mut S, sink: &mut K) -> Result<()>
    where
        E: Element,
        S: MatrixSource<E>,
        K: MatrixSink<E>,
    {
        run_staged(R, C, self.lanes, source, sink)
    }

    /// Run one streaming invocation: loading overlaps row normalization one
    /// row at a time. Lane parameters do not apply; accumulation follows
    /// stream order.
    pub fn run_streamed<E, S, K>(&self, source: &mut S, sink: &mut K) -> Result<()>
    where
        E: Element,
        S: MatrixSource<E>,
        K: MatrixSink<E>,
    {
        run_streamed(R, C, source, sink)
    }
}
