// Dweve benchlog - Benchmark log extraction and reporting
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Structured error types for the benchlog CLI.
//!
//! This module provides type-safe, composable error handling using `thiserror`.
//! All CLI operations return `Result<T, CliError>` for consistent error reporting.

use benchlog_core::BenchlogError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for benchlog CLI operations.
///
/// # Cloning
///
/// Implements `Clone` to support parallel error handling in multi-threaded
/// operations.
///
/// # Examples
///
/// ```rust,no_run
/// use benchlog_cli::error::CliError;
///
/// fn write_report(path: &str, report: &str) -> Result<(), CliError> {
///     std::fs::write(path, report).map_err(|e| CliError::io_error(path, e))?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Extraction, configuration or rendering error from the core library.
    #[error(transparent)]
    Core(#[from] BenchlogError),

    /// I/O operation failed outside of extraction (writing output, reading
    /// an allow-list).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Glob pattern could not be compiled or expanded.
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern {
        /// The pattern as given
        pattern: String,
        /// Why it was rejected
        message: String,
    },

    /// Requested profile is neither built in nor loaded from a file.
    #[error("Unknown profile '{name}' (available: {available})")]
    UnknownProfile {
        /// Requested name
        name: String,
        /// Comma-separated built-in names
        available: String,
    },

    /// CSV serialization error.
    #[error("CSV output error: {0}")]
    Csv(String),

    /// JSON serialization error.
    #[error("JSON output error: {message}")]
    Json {
        /// The error message
        message: String,
    },

    /// One or more sources failed extraction.
    ///
    /// Records from the other sources have already been written.
    #[error("{failed} of {total} sources failed extraction")]
    ExtractionFailed {
        /// Number of failed sources
        failed: usize,
        /// Number of sources processed
        total: usize,
    },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    ///
    /// Missing files map to the core `NotFound` error so they are reported
    /// the same way wherever they are detected.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            return Self::Core(BenchlogError::not_found(path));
        }
        Self::Io {
            path,
            message: source.to_string(),
        }
    }

    /// Create a pattern error.
    pub fn pattern(pattern: impl Into<String>, message: impl ToString) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the error only concerns one source of a batch.
    pub fn is_per_source(&self) -> bool {
        match self {
            Self::Core(e) => e.is_per_source(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json {
            message: source.to_string(),
        }
    }
}

impl From<csv::Error> for CliError {
    fn from(source: csv::Error) -> Self {
        Self::Csv(source.to_string())
    }
}
