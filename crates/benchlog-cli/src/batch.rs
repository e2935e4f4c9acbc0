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

//! Batch extraction over many log files with parallel execution and progress
//! reporting.
//!
//! Every file is processed independently: a failure in one file is recorded
//! in its [`FileResult`] and processing continues with the others. Results
//! are always returned in input order, whether the batch ran serially or in
//! parallel.
//!
//! # Examples
//!
//! ```rust,no_run
//! use benchlog_cli::batch::{BatchConfig, BatchProcessor, ExtractOperation};
//! use benchlog_core::{ExtractProfile, LogRecordExtractor};
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let processor = BatchProcessor::new(BatchConfig::default());
//! let extractor = LogRecordExtractor::new(ExtractProfile::default())?;
//!
//! let files = vec![
//!     PathBuf::from("performance/2024-08-05_22-23-57_NULL.txt"),
//!     PathBuf::from("performance/2024-08-06_14-22-05.txt"),
//! ];
//!
//! let results = processor.process(&files, ExtractOperation::new(extractor), true)?;
//! println!(
//!     "Processed {} files, {} succeeded, {} failed",
//!     results.total_files(),
//!     results.success_count(),
//!     results.failure_count()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All progress tracking uses atomic operations for lock-free concurrent access.
//! Operations are required to be Send + Sync for parallel execution.

use crate::error::CliError;
use benchlog_core::{BenchmarkRecord, LogRecordExtractor};
use colored::Colorize;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

/// Configuration for batch processing operations.
///
/// # Examples
///
/// ```rust
/// use benchlog_cli::batch::BatchConfig;
///
/// let config = BatchConfig {
///     parallel_threshold: 5,  // Parallelize if >= 5 files
///     max_threads: Some(4),   // Use at most 4 threads
///     progress_interval: 10,  // Update progress every 10 files
///     verbose: true,          // Show each file
/// };
/// ```
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Minimum number of files to trigger parallel processing.
    ///
    /// Default: 10
    pub parallel_threshold: usize,

    /// Maximum number of threads to use for parallel processing.
    ///
    /// None means use Rayon's default (typically number of CPU cores).
    pub max_threads: Option<usize>,

    /// Number of files between progress updates. Set to 0 to disable.
    ///
    /// Default: 1
    pub progress_interval: usize,

    /// Show file names and status for each file.
    pub verbose: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 10,
            max_threads: None,
            progress_interval: 1,
            verbose: false,
        }
    }
}

/// Result of processing a single file in a batch operation.
#[derive(Debug, Clone)]
pub struct FileResult<T> {
    /// The file path that was processed
    pub path: PathBuf,
    /// The result of processing (Ok or Err)
    pub result: Result<T, CliError>,
}

impl<T> FileResult<T> {
    /// Create a successful file result.
    pub fn success(path: PathBuf, value: T) -> Self {
        Self {
            path,
            result: Ok(value),
        }
    }

    /// Create a failed file result.
    pub fn failure(path: PathBuf, error: CliError) -> Self {
        Self {
            path,
            result: Err(error),
        }
    }

    /// Check if the result is successful.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Check if the result is a failure.
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Aggregated results from a batch processing operation, in input order.
#[derive(Debug, Clone)]
pub struct BatchResults<T> {
    /// Individual results for each processed file
    pub results: Vec<FileResult<T>>,
    /// Total processing time in milliseconds
    pub elapsed_ms: u128,
}

impl<T> BatchResults<T> {
    /// Create new batch results from a vector of file results.
    pub fn new(results: Vec<FileResult<T>>, elapsed_ms: u128) -> Self {
        Self { results, elapsed_ms }
    }

    /// Get the total number of files processed.
    pub fn total_files(&self) -> usize {
        self.results.len()
    }

    /// Get the number of successfully processed files.
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Get the number of failed files.
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    /// Check if all files were processed successfully.
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.is_success())
    }

    /// Check if any files failed.
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.is_failure())
    }

    /// Get an iterator over successful results.
    pub fn successes(&self) -> impl Iterator<Item = &FileResult<T>> {
        self.results.iter().filter(|r| r.is_success())
    }

    /// Get an iterator over failed results.
    pub fn failures(&self) -> impl Iterator<Item = &FileResult<T>> {
        self.results.iter().filter(|r| r.is_failure())
    }

    /// Get processing throughput in files per second.
    pub fn throughput(&self) -> f64 {
        if self.elapsed_ms == 0 {
            0.0
        } else {
            (self.total_files() as f64) / (self.elapsed_ms as f64 / 1000.0)
        }
    }
}

impl BatchResults<Option<BenchmarkRecord>> {
    /// Extracted records in input order. Files without a matching line and
    /// failed files contribute nothing.
    pub fn records(&self) -> Vec<BenchmarkRecord> {
        self.results
            .iter()
            .filter_map(|r| r.result.as_ref().ok().and_then(Clone::clone))
            .collect()
    }
}

/// Trait for batch operations on log files.
///
/// The operation must be thread-safe (Send + Sync) to support parallel
/// processing.
///
/// # Examples
///
/// ```rust
/// use benchlog_cli::batch::BatchOperation;
/// use benchlog_cli::error::CliError;
/// use std::path::Path;
///
/// struct CountLinesOperation;
///
/// impl BatchOperation for CountLinesOperation {
///     type Output = usize;
///
///     fn process_file(&self, path: &Path) -> Result<Self::Output, CliError> {
///         let content = std::fs::read_to_string(path)
///             .map_err(|e| CliError::io_error(path, e))?;
///         Ok(content.lines().count())
///     }
///
///     fn name(&self) -> &str {
///         "count-lines"
///     }
/// }
/// ```
pub trait BatchOperation: Send + Sync {
    /// The output type for successful processing
    type Output: Send;

    /// Process a single file and return the result.
    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError>;

    /// Get a human-readable name for this operation.
    fn name(&self) -> &str;
}

/// Progress tracker for batch operations.
///
/// Uses atomic counters for lock-free concurrent progress tracking. All
/// output goes to stderr so stdout carries only the rendered report.
#[derive(Debug)]
struct ProgressTracker {
    total: usize,
    processed: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    interval: usize,
    verbose: bool,
    start_time: Instant,
}

impl ProgressTracker {
    fn new(total: usize, interval: usize, verbose: bool) -> Self {
        Self {
            total,
            processed: AtomicUsize::new(0),
            succeeded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            interval,
            verbose,
            start_time: Instant::now(),
        }
    }

    fn record_success(&self, path: &Path) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        self.succeeded.fetch_add(1, Ordering::Relaxed);

        if self.should_report(processed) {
            self.report_progress(path, true);
        }
    }

    fn record_failure(&self, path: &Path, error: &CliError) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        self.failed.fetch_add(1, Ordering::Relaxed);

        if self.verbose {
            eprintln!("{} {} - {}", "✗".red().bold(), path.display(), error);
        }

        if self.should_report(processed) {
            self.report_progress(path, false);
        }
    }

    fn should_report(&self, processed: usize) -> bool {
        self.interval > 0 && (processed % self.interval == 0 || processed == self.total)
    }

    fn report_progress(&self, current_file: &Path, success: bool) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let rate = processed as f64 / self.start_time.elapsed().as_secs_f64();

        if self.verbose {
            let status = if success {
                "✓".green().bold()
            } else {
                "✗".red().bold()
            };
            eprintln!(
                "{} [{}/{}] {} ({:.1} files/s)",
                status,
                processed,
                self.total,
                current_file.display(),
                rate
            );
        } else {
            eprintln!(
                "Progress: [{}/{}] {} succeeded, {} failed ({:.1} files/s)",
                processed, self.total, succeeded, failed, rate
            );
        }
    }

    fn print_summary(&self, operation_name: &str, throughput: f64) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let elapsed = self.start_time.elapsed();

        eprintln!();
        eprintln!("{}", "═".repeat(60).bright_blue());
        eprintln!(
            "{} {}",
            "Batch Operation:".bright_blue().bold(),
            operation_name.bright_white()
        );
        eprintln!("{}", "═".repeat(60).bright_blue());
        eprintln!(
            "  {} {}",
            "Total files:".bright_cyan(),
            processed.to_string().bright_white()
        );
        eprintln!(
            "  {} {}",
            "Succeeded:".green().bold(),
            succeeded.to_string().bright_white()
        );
        eprintln!(
            "  {} {}",
            "Failed:".red().bold(),
            failed.to_string().bright_white()
        );
        eprintln!("  {} {:.2}s", "Elapsed:".bright_cyan(), elapsed.as_secs_f64());
        eprintln!("  {} {:.1} files/s", "Throughput:".bright_cyan(), throughput);
        eprintln!("{}", "═".repeat(60).bright_blue());
    }
}

/// Batch processor for log files.
///
/// Runs serially below the configured threshold and on the Rayon pool above
/// it.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a new batch processor with the given configuration.
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Create a batch processor with default configuration.
    pub fn default_config() -> Self {
        Self::new(BatchConfig::default())
    }

    /// Process multiple files with the given operation.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchResults)` - One result per file, in input order
    /// * `Err(CliError)` - Only if a dedicated thread pool cannot be built
    pub fn process<O>(
        &self,
        files: &[PathBuf],
        operation: O,
        show_progress: bool,
    ) -> Result<BatchResults<O::Output>, CliError>
    where
        O: BatchOperation,
    {
        let start_time = Instant::now();

        if files.is_empty() {
            return Ok(BatchResults::new(vec![], 0));
        }

        let tracker = show_progress.then(|| {
            ProgressTracker::new(
                files.len(),
                self.config.progress_interval,
                self.config.verbose,
            )
        });

        let results: Vec<FileResult<O::Output>> = if files.len() < self.config.parallel_threshold {
            debug!(files = files.len(), operation = operation.name(), "processing serially");
            files
                .iter()
                .map(|path| run_one(&operation, path, tracker.as_ref()))
                .collect()
        } else {
            debug!(files = files.len(), operation = operation.name(), "processing in parallel");
            self.process_parallel(files, &operation, tracker.as_ref())?
        };

        let results = BatchResults::new(results, start_time.elapsed().as_millis());
        if let Some(tracker) = &tracker {
            tracker.print_summary(operation.name(), results.throughput());
        }

        Ok(results)
    }

    fn process_parallel<O>(
        &self,
        files: &[PathBuf],
        operation: &O,
        tracker: Option<&ProgressTracker>,
    ) -> Result<Vec<FileResult<O::Output>>, CliError>
    where
        O: BatchOperation,
    {
        let run = || -> Vec<FileResult<O::Output>> {
            files
                .par_iter()
                .map(|path| run_one(operation, path, tracker))
                .collect()
        };

        match self.config.max_threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| CliError::invalid_input(format!("thread pool: {}", e)))?;
                Ok(pool.install(run))
            }
            None => Ok(run()),
        }
    }
}

fn run_one<O>(operation: &O, path: &Path, tracker: Option<&ProgressTracker>) -> FileResult<O::Output>
where
    O: BatchOperation,
{
    let result = operation.process_file(path);

    if let Some(t) = tracker {
        match &result {
            Ok(_) => t.record_success(path),
            Err(e) => t.record_failure(path, e),
        }
    }

    FileResult {
        path: path.to_path_buf(),
        result,
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Extract at most one record from each file.
#[derive(Debug, Clone)]
pub struct ExtractOperation {
    extractor: LogRecordExtractor,
}

impl ExtractOperation {
    /// Wrap an extractor.
    pub fn new(extractor: LogRecordExtractor) -> Self {
        Self { extractor }
    }
}

impl BatchOperation for ExtractOperation {
    type Output = Option<BenchmarkRecord>;

    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError> {
        match self.extractor.extract_path(path) {
            Ok(Some(record)) => {
                debug!(path = %path.display(), "extracted record");
                Ok(Some(record))
            }
            Ok(None) => {
                debug!(
                    path = %path.display(),
                    marker = self.extractor.marker(),
                    "no line starts with marker"
                );
                Ok(None)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "extraction failed");
                Err(e.into())
            }
        }
    }

    fn name(&self) -> &str {
        "extract"
    }
}
