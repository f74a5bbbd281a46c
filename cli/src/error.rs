#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate, each mapped onto a process exit code.

use derive_more::{Display, From};
use structgen_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// No invocation argument was given.
    #[display("missing invocation: expected a JSON object with inputPath, outputPath and config")]
    #[from(ignore)]
    MissingInvocation,

    /// The invocation argument is not valid JSON of the expected shape.
    #[display("Error parsing invocation JSON: {}", _0)]
    InvalidInvocation(serde_json::Error),

    /// `inputPath` is empty.
    #[display("Input path is required")]
    #[from(ignore)]
    MissingInputPath,

    /// `outputPath` is empty.
    #[display("Output path is required")]
    #[from(ignore)]
    MissingOutputPath,

    /// A section's `PackagePath` is empty.
    #[display("{} package path is required", section)]
    #[from(ignore)]
    MissingPackagePath {
        /// Section name as it appears in the invocation.
        section: &'static str,
    },

    /// Loading, compiling or writing failed.
    #[display("Compilation failed: {}", _0)]
    Compile(AppError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::MissingInvocation => 3,
            CliError::InvalidInvocation(_) => 4,
            CliError::MissingInputPath => 12,
            CliError::MissingOutputPath => 13,
            CliError::MissingPackagePath { .. } => 14,
            CliError::Compile(_) => 1,
        }
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::InvalidInvocation(e) => Some(e),
            CliError::Compile(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
