//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the dupecheck application.
///
/// - 0: Success (duplicates found, or compared files are identical)
/// - 1: General error (unexpected failure)
/// - 2: No duplicates found (or compared files differ)
/// - 3: Invalid path (root missing or not a directory)
/// - 4: Cancelled (the user gave up at the path prompt)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed and duplicates were found.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// No duplicates: Scan completed but no duplicates were found.
    NoDuplicates = 2,
    /// Invalid path: The root does not exist or is not a directory.
    InvalidPath = 3,
    /// Cancelled: The user declined to provide a directory.
    Cancelled = 4,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DC000",
            Self::GeneralError => "DC001",
            Self::NoDuplicates => "DC002",
            Self::InvalidPath => "DC003",
            Self::Cancelled => "DC004",
        }
    }

    /// Map an application error to its exit code.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        if err
            .downcast_ref::<crate::duplicates::FinderError>()
            .is_some()
        {
            Self::InvalidPath
        } else {
            Self::GeneralError
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DC001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
