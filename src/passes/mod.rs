//! Scan and verify passes: prompts plus the response shapes each pass accepts.

mod first_pass;
mod prompt;
mod second_pass;
mod types;

pub use first_pass::execute_first_pass;
pub use second_pass::execute_second_pass;
pub use types::{RawIssue, Severity, VerifiedIssue};
