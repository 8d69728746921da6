//! Library components of the `mcq` command-line checker.

pub mod check;
pub mod logging;
pub mod report;

/// Question passed every evaluated rule.
pub const EXIT_OK: i32 = 0;

/// Question violated at least one rule.
pub const EXIT_NOT_OK: i32 = 1;

/// Input or settings could not be loaded.
pub const EXIT_ERROR: i32 = 2;
