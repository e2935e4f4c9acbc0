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

//! benchlog CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! ## Reports
//!
//! - **table**: One row per benchmark log, as Markdown, CSV or JSON
//! - **changes**: Relative change of one field between consecutive logs
//!
//! ## Utilities
//!
//! - **profiles**: List the built-in extraction profiles
//! - **completion**: Generate shell completion scripts (bash, zsh, fish, powershell, elvish)
//!
//! # Sources
//!
//! Logs are either named on the command line or discovered in a directory
//! with a glob pattern (sorted by path), optionally narrowed by an
//! allow-list file. Each log is processed independently; see [`batch`].
//!
//! # Examples
//!
//! ```no_run
//! use benchlog_cli::commands::{table, RunOptions};
//! use benchlog_cli::discovery::{AllowList, SourceSelection};
//! use benchlog_cli::output::OutputFormat;
//! use benchlog_core::ExtractProfile;
//! use std::path::{Path, PathBuf};
//!
//! # fn main() -> Result<(), benchlog_cli::error::CliError> {
//! let selection = SourceSelection {
//!     dir: PathBuf::from("performance"),
//!     allow_list: Some(AllowList::load(Path::new("curated.txt"))?),
//!     ..Default::default()
//! };
//!
//! table(
//!     &selection,
//!     &ExtractProfile::default(),
//!     &RunOptions::default(),
//!     OutputFormat::Markdown,
//!     Some(Path::new("report.md")),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod cli;
pub mod commands;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod output;
