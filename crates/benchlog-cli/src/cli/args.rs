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

//! Argument groups shared by the report commands.

use crate::batch::BatchConfig;
use crate::discovery::{AllowList, SourceSelection, DEFAULT_PATTERN};
use crate::error::CliError;
use benchlog_core::{ExtractProfile, FieldIndexMap, FieldSpec, DEFAULT_PROFILE};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

/// Which log files to read.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Log files to read; skips directory discovery when given
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Directory to scan for logs [default: .]
    #[arg(short, long, value_name = "DIR", conflicts_with = "files")]
    pub dir: Option<PathBuf>,

    /// Glob pattern for log file names within the directory
    #[arg(long, value_name = "GLOB", default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// File listing the exact file names to include, one per line
    #[arg(long, value_name = "FILE")]
    pub allow_list: Option<PathBuf>,
}

impl SourceArgs {
    /// Build the source selection, loading the allow-list if one was given.
    pub fn selection(&self) -> Result<SourceSelection, CliError> {
        let allow_list = self
            .allow_list
            .as_deref()
            .map(AllowList::load)
            .transpose()?;

        Ok(SourceSelection {
            files: self.files.clone(),
            dir: self.dir.clone().unwrap_or_else(|| PathBuf::from(".")),
            pattern: self.pattern.clone(),
            allow_list,
        })
    }
}

/// How to find and split the relevant line.
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Built-in extraction profile [default: go-bench]
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Load the extraction profile from a JSON file
    #[arg(long, value_name = "FILE", conflicts_with = "profile")]
    pub profile_file: Option<PathBuf>,

    /// Override the marker the relevant line starts with
    #[arg(long, value_name = "MARKER")]
    pub marker: Option<String>,

    /// Replace the field map; repeat for each field in column order
    #[arg(long = "field", value_name = "NAME=INDEX[:LABEL]")]
    pub fields: Vec<FieldSpec>,
}

impl ProfileArgs {
    /// Resolve the base profile and apply the inline overrides.
    ///
    /// # Errors
    ///
    /// - `UnknownProfile` if the name is not a built-in
    /// - `NotFound`/`InvalidConfig` if the profile file is missing or invalid
    /// - `InvalidConfig` if an override is empty or has duplicate fields
    pub fn resolve(&self) -> Result<ExtractProfile, CliError> {
        let mut profile = match &self.profile_file {
            Some(path) => ExtractProfile::from_file(path)?,
            None => {
                let name = self.profile.as_deref().unwrap_or(DEFAULT_PROFILE);
                ExtractProfile::builtin(name).ok_or_else(|| CliError::UnknownProfile {
                    name: name.to_string(),
                    available: ExtractProfile::builtins()
                        .iter()
                        .map(|p| p.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                })?
            }
        };

        if let Some(marker) = &self.marker {
            profile = profile.with_marker(marker.clone())?;
        }
        if !self.fields.is_empty() {
            profile = profile.with_fields(FieldIndexMap::new(self.fields.clone())?);
        }

        debug!(
            profile = %profile.name,
            marker = %profile.marker,
            fields = profile.fields.len(),
            "resolved extraction profile"
        );
        Ok(profile)
    }
}

/// Batch execution tuning.
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Force parallel processing
    #[arg(short, long)]
    pub parallel: bool,

    /// Maximum worker threads for parallel processing
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Report progress on stderr
    #[arg(long)]
    pub progress: bool,
}

impl BatchArgs {
    /// Batch configuration for these arguments.
    pub fn config(&self, verbose: bool) -> BatchConfig {
        let defaults = BatchConfig::default();
        BatchConfig {
            parallel_threshold: if self.parallel {
                1
            } else {
                defaults.parallel_threshold
            },
            max_threads: self.threads,
            verbose,
            ..defaults
        }
    }

    /// Whether progress should be shown.
    pub fn show_progress(&self, verbose: bool) -> bool {
        self.progress || verbose
    }
}
