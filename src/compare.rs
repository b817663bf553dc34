//! Two-tier approximate comparison of validation and test tables.
//!
//! Outcomes:
//! 1. every element passes [`Tolerance::STRICT`]: match
//! 2. the shapes differ: shape mismatch (no broadcasting)
//! 3. every element passes [`Tolerance::LOOSE`]: marginal mismatch
//! 4. otherwise: value mismatch

use serde::Serialize;

use crate::table::{ShapeDisplay, Table};
use crate::tolerance::Tolerance;

/// Result of comparing a validation table with a test table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonResult {
    /// All values within the strict tolerance.
    Match,
    /// Values outside the strict tolerance but within the loose one.
    MarginalMismatch,
    /// Tables have different shapes.
    ShapeMismatch,
    /// Values outside the loose tolerance.
    ValueMismatch,
}

impl ComparisonResult {
    pub const fn is_match(self) -> bool {
        matches!(self, Self::Match)
    }

    /// Process exit status for this outcome.
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Match => 0,
            Self::ShapeMismatch | Self::ValueMismatch => 1,
            Self::MarginalMismatch => 2,
        }
    }

    /// Diagnostic line printed for this outcome. A match has none.
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::Match => None,
            Self::MarginalMismatch => {
                Some("Marginal mismatch in values of validation and test data!")
            }
            Self::ShapeMismatch => Some("Test data and validation data are different shapes!"),
            Self::ValueMismatch => Some("Mismatch in values of validation and test data!"),
        }
    }
}

/// Compares validation table `valid` against test table `test`.
pub fn compare(valid: &Table, test: &Table) -> ComparisonResult {
    if valid.shape() != test.shape() {
        log::debug!(
            "shape mismatch: {} vs {}",
            ShapeDisplay(valid.shape()),
            ShapeDisplay(test.shape())
        );
        return ComparisonResult::ShapeMismatch;
    }

    let (a, b) = (valid.values(), test.values());

    if Tolerance::STRICT.all_close(a, b) {
        log::debug!("all {} values within strict tolerance", a.len());
        ComparisonResult::Match
    } else if Tolerance::LOOSE.all_close(a, b) {
        log::debug!("values fail strict tolerance, pass loose tolerance");
        ComparisonResult::MarginalMismatch
    } else {
        log::debug!("values fail loose tolerance");
        ComparisonResult::ValueMismatch
    }
}

/// The element that exceeds the strict tolerance by the largest factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorstElement {
    /// Row-major position.
    pub index: usize,
    /// Validation value.
    pub valid: f64,
    /// Test value.
    pub test: f64,
    /// `|valid - test|` divided by the strict allowance for `test`.
    pub ratio: f64,
}

/// Diagnostics for one comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub outcome: ComparisonResult,
    pub valid_shape: Vec<usize>,
    pub test_shape: Vec<usize>,
    /// Elements compared (zero on shape mismatch).
    pub elements: usize,
    /// Largest finite absolute difference, if any element was compared.
    pub max_abs_diff: Option<f64>,
    pub worst: Option<WorstElement>,
    pub strict: Tolerance,
    pub loose: Tolerance,
}

impl Report {
    pub const fn exit_code(&self) -> u8 {
        self.outcome.exit_code()
    }
}

/// Compares two tables and collects diagnostics about where they differ.
pub fn report(valid: &Table, test: &Table) -> Report {
    let outcome = compare(valid, test);

    let mut report = Report {
        outcome,
        valid_shape: valid.shape().to_vec(),
        test_shape: test.shape().to_vec(),
        elements: 0,
        max_abs_diff: None,
        worst: None,
        strict: Tolerance::STRICT,
        loose: Tolerance::LOOSE,
    };

    if outcome == ComparisonResult::ShapeMismatch {
        return report;
    }

    report.elements = valid.len();

    for (index, (&a, &b)) in valid.values().iter().zip(test.values()).enumerate() {
        let diff = (a - b).abs();
        if diff.is_finite() {
            report.max_abs_diff = Some(report.max_abs_diff.map_or(diff, |m| m.max(diff)));
        }

        let ratio = excess_ratio(a, b);

        if report.worst.as_ref().is_none_or(|w| ratio > w.ratio) {
            report.worst = Some(WorstElement {
                index,
                valid: a,
                test: b,
                ratio,
            });
        }
    }

    if let Some(ref worst) = report.worst {
        log::trace!(
            "worst element {}: valid={} test={} ratio={:.3}",
            worst.index,
            worst.valid,
            worst.test,
            worst.ratio
        );
    }

    report
}

/// How many strict allowances apart `a` and `b` are. Unequal infinities
/// and NaN are infinitely far apart.
#[allow(clippy::float_cmp)]
fn excess_ratio(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::INFINITY
    } else if a.is_infinite() || b.is_infinite() {
        if a == b {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        (a - b).abs() / Tolerance::STRICT.allowance(b)
    }
}
