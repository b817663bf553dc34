//! Elementwise closeness checks.
//!
//! Two values are close when `|a - b| <= atol + rtol * |b|`, with `b` the
//! test value. Comparisons use two tiers: a strict tier that decides a
//! match, and a loose tier that separates marginal mismatches from real
//! ones.

use serde::Serialize;

/// Relative and absolute tolerance pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tolerance {
    /// Relative tolerance (fraction of `|b|`).
    pub rtol: f64,
    /// Absolute tolerance.
    pub atol: f64,
}

impl Tolerance {
    /// Tier that decides a match. Differences near the numerical noise
    /// floor pass.
    pub const STRICT: Self = Self::new(1e-5, 1e-2);

    /// Tier that decides a marginal mismatch.
    pub const LOOSE: Self = Self::new(1e-4, 1e-1);

    #[must_use]
    pub const fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }

    /// Largest difference allowed for test value `b`.
    ///
    /// Evaluated as `atol + rtol * |b|` without a fused multiply-add so
    /// values on the boundary round the same way as the reference data's
    /// tooling.
    #[inline]
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn allowance(&self, b: f64) -> f64 {
        self.atol + self.rtol * b.abs()
    }

    /// Checks if validation value `a` is close to test value `b`.
    ///
    /// Infinities are close only to an infinity of the same sign and NaN
    /// is never close to anything.
    #[inline]
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        if a.is_infinite() || b.is_infinite() {
            return a == b;
        }
        (a - b).abs() <= self.allowance(b)
    }

    /// Checks closeness of every pair. Slices of different length are never
    /// close.
    #[must_use]
    pub fn all_close(&self, a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| self.is_close(x, y))
    }
}
