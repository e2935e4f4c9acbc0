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

//! CLI command definitions and argument parsing.
//!
//! Commands are organized into the following modules:
//!
//! - [`report`]: Report commands (table, changes)
//! - [`utility`]: Utility commands (profiles, completion)
//!
//! Argument groups shared by the report commands live in [`args`].

pub mod args;
mod report;
mod utility;

use crate::error::CliError;
use clap::{Parser, Subcommand};

pub use report::ReportCommands;
pub use utility::UtilityCommands;

/// benchlog - Benchmark log extraction and reporting
///
/// Extracts one record per benchmark log from the first line starting with a
/// marker, and renders the records as a Markdown table.
///
/// # Examples
///
/// ```bash
/// # Table of every *.txt log in ./performance
/// benchlog table --dir performance
///
/// # Only curated runs, written to a file
/// benchlog table --dir performance --allow-list curated.txt -o report.md
///
/// # Relative change in memory between consecutive runs
/// benchlog changes --dir performance --metric Memory
/// ```
#[derive(Parser)]
#[command(name = "benchlog")]
#[command(author, version, about = "benchlog - Benchmark log extraction and reporting", long_about = None)]
pub struct Cli {
    /// Show per-file progress and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands enum.
///
/// ```text
/// Commands
/// ├── Report (table, changes)
/// └── Utility (profiles, completion)
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Report commands - flattened to appear at top level
    #[command(flatten)]
    Report(ReportCommands),

    // Utility commands - flattened to appear at top level
    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if sources cannot be resolved, the profile is invalid,
    /// output cannot be written, or any source failed extraction.
    pub fn execute(self, verbose: bool) -> Result<(), CliError> {
        match self {
            Commands::Report(cmd) => cmd.execute(verbose),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_table_defaults() {
        let cli = Cli::try_parse_from(["benchlog", "table"]).unwrap();
        assert!(!cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Report(ReportCommands::Table { .. })
        ));
    }

    #[test]
    fn test_global_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["benchlog", "changes", "-v", "--metric", "Memory"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_dir_conflicts_with_files() {
        let result = Cli::try_parse_from(["benchlog", "table", "a.txt", "--dir", "logs"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_field_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["benchlog", "table", "--field", "Time"]);
        assert!(result.is_err());
    }
}
