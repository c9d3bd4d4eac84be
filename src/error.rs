//! Structured error handling and exit codes.

use serde::Serialize;

use crate::catalog::{CatalogError, CatalogSummary};

/// Exit codes for the filehub application.
///
/// - 0: Success (completed normally, files listed)
/// - 1: General error (unexpected failure, bad input)
/// - 2: No files (completed normally, nothing matched)
/// - 3: Upstream error (the catalog backend failed or was unreachable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the command completed and files were listed.
    Success = 0,
    /// General error: an unexpected error occurred.
    GeneralError = 1,
    /// No files: the listing completed but nothing matched.
    NoFiles = 2,
    /// Upstream error: the catalog backend request failed.
    UpstreamError = 3,
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
            Self::Success => "FH000",
            Self::GeneralError => "FH001",
            Self::NoFiles => "FH002",
            Self::UpstreamError => "FH003",
        }
    }

    /// Exit code for a listing that completed.
    #[must_use]
    pub fn for_listing(summary: &CatalogSummary) -> Self {
        if summary.is_empty() {
            Self::NoFiles
        } else {
            Self::Success
        }
    }

    /// Exit code for a failed run.
    ///
    /// Any [`CatalogError`] or [`UpstreamFailure`] in the chain counts as an
    /// upstream failure.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        let upstream = err
            .chain()
            .any(|cause| cause.is::<CatalogError>() || cause.is::<UpstreamFailure>());
        if upstream {
            Self::UpstreamError
        } else {
            Self::GeneralError
        }
    }
}

/// The newest catalog fetch settled with a failure.
///
/// Fetches run on worker threads, so only the message reaches the caller.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct UpstreamFailure(pub String);

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "FH003")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including context
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

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::NoFiles.as_i32(), 2);
        assert_eq!(ExitCode::UpstreamError.as_i32(), 3);
        assert_eq!(ExitCode::UpstreamError.code_prefix(), "FH003");
    }

    #[test]
    fn test_for_listing() {
        assert_eq!(ExitCode::for_listing(&CatalogSummary::default()), ExitCode::NoFiles);
        let summary = CatalogSummary {
            total_files: 1,
            unique_files: 1,
            ..CatalogSummary::default()
        };
        assert_eq!(ExitCode::for_listing(&summary), ExitCode::Success);
    }

    #[test]
    fn test_catalog_error_is_upstream() {
        let err: anyhow::Error = Err::<(), _>(CatalogError::Status {
            status: 500,
            body: String::new(),
        })
        .context("Failed to list files")
        .unwrap_err();
        assert_eq!(ExitCode::for_error(&err), ExitCode::UpstreamError);

        let failed = anyhow::Error::new(UpstreamFailure("request failed: timeout".into()));
        assert_eq!(ExitCode::for_error(&failed), ExitCode::UpstreamError);

        let other = anyhow::anyhow!("bad input");
        assert_eq!(ExitCode::for_error(&other), ExitCode::GeneralError);
    }

    #[test]
    fn test_structured_error_includes_context() {
        let err = anyhow::anyhow!("connection refused").context("Failed to list files");
        let structured = StructuredError::new(&err, ExitCode::UpstreamError);
        assert_eq!(structured.code, "FH003");
        assert_eq!(structured.exit_code, 3);
        assert_eq!(structured.message, "Failed to list files: connection refused");
    }
}
