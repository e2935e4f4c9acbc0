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

//! Report commands: tables of extracted records and of relative changes.

use super::args::{BatchArgs, ProfileArgs, SourceArgs};
use crate::commands;
use crate::error::CliError;
use crate::output::OutputFormat;
use clap::Subcommand;
use std::path::PathBuf;

/// Report commands.
///
/// Both commands resolve their sources, extract at most one record per
/// source, and write the report even when some sources failed; the failures
/// are then listed on stderr and the command exits with an error.
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Render extracted records as a table
    ///
    /// One row per source whose log contains a line starting with the
    /// marker, in source order.
    Table {
        #[command(flatten)]
        sources: SourceArgs,

        #[command(flatten)]
        profile: ProfileArgs,

        #[command(flatten)]
        batch: BatchArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render the relative change of one field between consecutive sources
    Changes {
        #[command(flatten)]
        sources: SourceArgs,

        #[command(flatten)]
        profile: ProfileArgs,

        #[command(flatten)]
        batch: BatchArgs,

        /// Field to compare
        #[arg(long, value_name = "FIELD", default_value = "Time")]
        metric: String,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl ReportCommands {
    /// Execute the report command.
    pub fn execute(self, verbose: bool) -> Result<(), CliError> {
        match self {
            ReportCommands::Table {
                sources,
                profile,
                batch,
                format,
                output,
            } => commands::table(
                &sources.selection()?,
                &profile.resolve()?,
                &commands::RunOptions::new(batch.config(verbose), batch.show_progress(verbose)),
                format,
                output.as_deref(),
            ),
            ReportCommands::Changes {
                sources,
                profile,
                batch,
                metric,
                output,
            } => commands::changes(
                &sources.selection()?,
                &profile.resolve()?,
                &commands::RunOptions::new(batch.config(verbose), batch.show_progress(verbose)),
                &metric,
                output.as_deref(),
            ),
        }
    }
}
