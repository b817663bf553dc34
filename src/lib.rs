//! pydiff: approximate comparison of numeric data files.
//!
//! Compares a validation table with a test table using a strict and a loose
//! tolerance tier, so numerical noise passes, borderline differences are
//! flagged as marginal and real differences fail.

pub mod compare;
pub mod error;
pub mod table;
pub mod tolerance;

pub use compare::{compare, report, ComparisonResult, Report};
pub use error::{Error, Result};
pub use table::{load_table, parse_table, Table};
pub use tolerance::Tolerance;
