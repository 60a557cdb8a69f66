//! Process exit codes.
//!
//! - 0: run finished, no confirmed error-severity findings
//! - 1: run finished with at least one confirmed error
//! - 2: the run itself failed (bad arguments, agent failures, I/O)

/// Clean run. Warnings alone still exit with this code.
pub const SUCCESS: u8 = 0;

/// At least one confirmed finding has severity `error`.
pub const ERRORS_FOUND: u8 = 1;

/// Operational failure. clap also uses 2 for usage errors.
pub const FAILURE: u8 = 2;
