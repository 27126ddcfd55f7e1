//! Scalar type definitions.
//!
//! The kernel is generic over a small in-crate [`Element`] trait rather than
//! an external numeric-traits crate: the pipeline needs only addition,
//! division, multiplication, the two identities, and a conversion from the
//! row count (the divisor of the column mean).
//!
//! | Type | Precision | Notes |
//! |------|-----------|-------|
//! | `f32` | single | matches the usual deployment element width |
//! | `f64` | double | reference precision for tests and fixtures |
//!
//! # Example
//!
//! ```
//! use rowcol_norm::Element;
//!
//! let denom = 2.0f64 + f64::ONE; // row_sum + 1, the bias-adjusted denominator
//! assert_eq!(denom, 3.0);
//! assert_eq!(f64::from_row_count(4), 4.0);
//! ```

use std::fmt::Debug;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul};

/// Scalar element of the matrices flowing through the kernel.
///
/// Implementors must form a field-like structure under `+`, `*`, `/` with the
/// usual floating-point caveats: accumulation is associative and commutative
/// only up to rounding, which is exactly the tolerance the kernel's
/// order-independence contract is stated under.
pub trait Element:
    Copy
    + Debug
    + Default
    + PartialOrd
    + Send
    + Sync
    + Add<Output = Self>
    + AddAssign
    + Mul<Output = Self>
    + Div<Output = Self>
    + Sum<Self>
{
    /// Additive identity.
    const ZERO: Self;

    /// Multiplicative identity; also the denominator bias term.
    const ONE: Self;

    /// Lossy conversion from a row count, used as the column-mean divisor.
    fn from_row_count(rows: usize) -> Self;

    /// True when the value is neither infinite nor NaN.
    ///
    /// The kernel never tests this itself (numeric degeneracy propagates,
    /// see the crate docs), but callers and tests do.
    fn is_finite(self) -> bool;
}

impl Element for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline]
    fn from_row_count(rows: usize) -> Self {
        rows as f32
    }

    #[inline]
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

impl Element for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline]
    fn from_row_count(rows: usize) -> Self {
        rows as f64
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identities() {
        assert_eq!(f32::ZERO + f32::ONE, 1.0f32);
        assert_eq!(f64::ZERO + f64::ONE, 1.0f64);
    }

    #[test]
    fn test_from_row_count() {
        assert_eq!(f32::from_row_count(0), 0.0);
        assert_eq!(f64::from_row_count(128), 128.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(1.0f64.is_finite());
        assert!(!Element::is_finite(f64::INFINITY));
        assert!(!Element::is_finite(f32::NAN));
    }
}
