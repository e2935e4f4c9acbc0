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

//! Source selection: explicit files, or a directory plus a glob pattern,
//! optionally narrowed by an allow-list of exact file names.
//!
//! Allow-lists are plain text files with one file name per line. Blank
//! lines and lines starting with `#` are ignored and entries are trimmed:
//!
//! ```text
//! # curated runs
//! 2024-08-02_18-55-50_Assignment.txt
//! 2024-08-06_14-22-05.txt
//! ```

use crate::error::CliError;
use benchlog_core::{source_id_for, BenchlogError};
use glob::MatchOptions;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Pattern used when none is given.
pub const DEFAULT_PATTERN: &str = "*.txt";

/// Exact file names a source must match to be processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    names: BTreeSet<String>,
}

impl AllowList {
    /// Parse allow-list text.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchlog_cli::discovery::AllowList;
    ///
    /// let list = AllowList::parse("# runs\n a.txt \n\nb.txt\n");
    /// assert_eq!(list.len(), 2);
    /// assert!(list.contains("a.txt"));
    /// assert!(!list.contains("c.txt"));
    /// ```
    pub fn parse(text: &str) -> Self {
        let names = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { names }
    }

    /// Load an allow-list file.
    ///
    /// # Errors
    ///
    /// A missing file is a `NotFound` error.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))?;
        Ok(Self::parse(&text))
    }

    /// Build from names directly.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `name` is allowed.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Keep only allowed paths, preserving order.
    ///
    /// Entries that matched nothing are logged, since a typo in a curated
    /// list otherwise silently drops a run.
    pub fn filter(&self, paths: Vec<PathBuf>) -> Vec<PathBuf> {
        let mut seen = BTreeSet::new();
        let kept: Vec<PathBuf> = paths
            .into_iter()
            .filter(|path| {
                let name = source_id_for(path);
                let allowed = self.contains(&name);
                if allowed {
                    seen.insert(name);
                } else {
                    debug!(path = %path.display(), "skipping source not in allow-list");
                }
                allowed
            })
            .collect();

        for missing in self.names.difference(&seen) {
            warn!(name = %missing, "allow-list entry matched no source");
        }
        kept
    }
}

/// Where sources come from.
#[derive(Debug, Clone)]
pub struct SourceSelection {
    /// Explicit files; when non-empty, directory discovery is skipped.
    pub files: Vec<PathBuf>,
    /// Directory scanned for `pattern`.
    pub dir: PathBuf,
    /// Glob pattern relative to `dir`.
    pub pattern: String,
    /// Optional allow-list applied to every source.
    pub allow_list: Option<AllowList>,
}

impl Default for SourceSelection {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            dir: PathBuf::from("."),
            pattern: DEFAULT_PATTERN.to_string(),
            allow_list: None,
        }
    }
}

impl SourceSelection {
    /// Resolve the selection into an ordered list of files.
    ///
    /// Explicit files are kept in the order given; discovered files are
    /// sorted by path.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the directory or an explicit file does not exist
    /// - `Pattern` if the glob pattern is invalid
    pub fn resolve(&self) -> Result<Vec<PathBuf>, CliError> {
        let paths = if self.files.is_empty() {
            discover(&self.dir, &self.pattern)?
        } else {
            for file in &self.files {
                if !file.is_file() {
                    return Err(BenchlogError::not_found(file).into());
                }
            }
            self.files.clone()
        };

        Ok(match &self.allow_list {
            Some(list) => list.filter(paths),
            None => paths,
        })
    }
}

/// Find regular files in `dir` matching `pattern`, sorted by path.
///
/// # Examples
///
/// ```no_run
/// use benchlog_cli::discovery::discover;
/// use std::path::Path;
///
/// # fn main() -> Result<(), benchlog_cli::error::CliError> {
/// for path in discover(Path::new("performance"), "*.txt")? {
///     println!("{}", path.display());
/// }
/// # Ok(())
/// # }
/// ```
pub fn discover(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, CliError> {
    if !dir.is_dir() {
        return Err(BenchlogError::not_found(dir).into());
    }
    if pattern.contains('/') || pattern.contains(std::path::MAIN_SEPARATOR) {
        return Err(CliError::pattern(
            pattern,
            "pattern must match file names within the directory",
        ));
    }

    // The directory part is literal; only the file-name part is a pattern.
    let full = format!(
        "{}{}{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        std::path::MAIN_SEPARATOR,
        pattern
    );
    // Hidden files only match when the pattern itself starts with a dot.
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let entries = glob::glob_with(&full, options).map_err(|e| CliError::pattern(pattern, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            CliError::io_error(path, e.into_error())
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    debug!(dir = %dir.display(), pattern, count = paths.len(), "discovered sources");
    Ok(paths)
}
