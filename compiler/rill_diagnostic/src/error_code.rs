//! Error codes for semantic-analysis diagnostics.
//!
//! Format: E#### where the first digit indicates the phase:
//! - E2xxx: Name and call resolution errors
//! - E9xxx: Internal compiler errors

use std::fmt;

/// Error codes for semantic-analysis diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Resolution Errors (E2xxx)
    /// No overload accepts the call's arguments
    E2001,
    /// More than one overload accepts the call's arguments
    E2002,
    /// Unknown identifier
    E2003,
    /// Argument or initializer type does not fit the expected type
    E2004,
    /// Cannot infer type
    E2005,
    /// Duplicate definition
    E2006,
    /// Template instantiation nested too deeply
    E2007,

    // Internal Errors (E9xxx)
    /// Internal compiler error
    E9001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E9001,
    ];

    /// Get the code as a string (e.g., "E2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line description, for `--explain`-style listings.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "no matching overload",
            ErrorCode::E2002 => "ambiguous overload",
            ErrorCode::E2003 => "unknown identifier",
            ErrorCode::E2004 => "type mismatch",
            ErrorCode::E2005 => "cannot infer type",
            ErrorCode::E2006 => "duplicate definition",
            ErrorCode::E2007 => "template instantiation depth exceeded",
            ErrorCode::E9001 => "internal compiler error",
        }
    }

    /// Check if this is a resolution error (E2xxx range).
    pub fn is_resolution_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Check if this is an internal compiler error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
