//! Diagnostics for semantic analysis.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Notes (why it's wrong) and suggestions (how to fix)
//!
//! Rendering is left to the driver; `Display` gives a plain one-block form.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
