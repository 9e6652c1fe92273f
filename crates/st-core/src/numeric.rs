use crate::{CoreError, CoreResult};

/// Scalar type for samples, times and plant parameters.
pub type Real = f64;

/// Absolute and relative slack for float comparisons.
///
/// Two values compare equal when their difference is within `abs`, or
/// within `rel` times the larger magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    pub const fn new(abs: Real, rel: Real) -> Self {
        Self { abs, rel }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::new(1e-12, 1e-9)
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let gap = (a - b).abs();
    gap <= tol.abs || gap <= tol.rel * a.abs().max(b.abs())
}

/// Pass `value` through unless it is NaN or infinite.
pub fn ensure_finite(value: Real, what: &'static str) -> CoreResult<Real> {
    if value.is_finite() {
        return Ok(value);
    }
    Err(CoreError::NonFinite { what, value })
}

/// Check every element of a slice, reporting the first offending value.
pub fn ensure_all_finite(values: &[Real], what: &'static str) -> CoreResult<()> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(CoreError::NonFinite { what, value }),
        None => Ok(()),
    }
}

/// Index of the first element smaller than its predecessor.
pub fn first_decrease(values: &[Real]) -> Option<usize> {
    values.windows(2).position(|w| w[1] < w[0]).map(|i| i + 1)
}
