use futures::stream::{FuturesUnordered, StreamExt};
use regex::Regex;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio::time::Instant;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::core::error::{CheckFailure, Result};
use crate::core::types::{Check, Reference};
use crate::discovery::extractor;
use crate::reporting::logging;
use crate::reporting::report::Report;
use crate::ui::progress::ProgressReporter;
use crate::validation::classifier::{Target, classify};
use crate::validation::race::{Deadline, race};
use crate::validation::validator::{ValidateReference, Validator};

/// What happened to one input file.
#[derive(Debug)]
pub enum FileOutcome {
    Checked {
        file: String,
        references: usize,
        failing: Vec<Check>,
    },
    Unreadable {
        file: String,
        error: String,
    },
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub report: Report,
    /// Files that could not be read, with the reason.
    pub unreadable: Vec<(String, String)>,
    /// Files never started because the run deadline had passed.
    pub skipped: Vec<String>,
    pub files_checked: usize,
    pub references_checked: usize,
}

impl RunSummary {
    /// True when nothing failed and every file was read.
    pub fn is_clean(&self) -> bool {
        self.report.is_empty() && self.unreadable.is_empty() && self.skipped.is_empty()
    }
}

/// Runs checks for references, files and whole file sets.
///
/// All clones share one validator, one concurrency limit and one deadline,
/// so checks started from different files still count against the same cap.
pub struct Checker<V> {
    validator: Arc<V>,
    permits: Arc<Semaphore>,
    deadline: Deadline,
    excludes: Arc<Vec<Regex>>,
}

impl<V> Clone for Checker<V> {
    fn clone(&self) -> Self {
        Self {
            validator: Arc::clone(&self.validator),
            permits: Arc::clone(&self.permits),
            deadline: self.deadline,
            excludes: Arc::clone(&self.excludes),
        }
    }
}

impl Checker<Validator> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let validator = Validator::from_config(config)?;

        let mut deadline = Deadline::new(config.timeout_duration());
        if let Some(run) = config.deadline_duration() {
            deadline = deadline.with_run_deadline(Instant::now() + run);
        }

        Ok(Self::new(validator, config.concurrency_limit(), deadline)
            .with_excludes(config.compile_exclude_patterns()?))
    }
}

impl<V: ValidateReference + 'static> Checker<V> {
    pub fn new(validator: V, concurrency: usize, deadline: Deadline) -> Self {
        Self {
            validator: Arc::new(validator),
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
            deadline,
            excludes: Arc::new(Vec::new()),
        }
    }

    pub fn with_excludes(mut self, excludes: Vec<Regex>) -> Self {
        self.excludes = Arc::new(excludes);
        self
    }

    pub fn is_excluded(&self, url: &str) -> bool {
        self.excludes.iter().any(|pattern| pattern.is_match(url))
    }

    /// Classify and check a single reference. Never fails: every problem
    /// becomes the message of the returned [`Check`].
    pub async fn check_reference(&self, reference: Reference) -> Check {
        let outcome = match classify(reference.url()) {
            Err(failure) => Err(failure),
            Ok(target) => self.run_check(&target).await,
        };

        let check = Check::new(reference, outcome);
        logging::log_check_result(&check);
        check
    }

    async fn run_check(&self, target: &Target<'_>) -> std::result::Result<(), CheckFailure> {
        // Time spent waiting for a permit counts against the check's timeout
        let expires = self.deadline.expiry();

        race(&self.deadline, target.kind(), expires, async {
            let Ok(_permit) = self.permits.acquire().await else {
                return Err(CheckFailure::Cancelled);
            };
            self.validator.validate_target(target).await
        })
        .await
    }

    /// Check every reference concurrently and keep the failing ones, in
    /// completion order.
    pub async fn check_references(&self, references: Vec<Reference>) -> Vec<Check> {
        if references.is_empty() {
            return Vec::new();
        }

        let mut pending: FuturesUnordered<_> = references
            .into_iter()
            .filter(|reference| {
                let excluded = self.is_excluded(reference.url());
                if excluded {
                    log::debug!("Excluded {reference}");
                }
                !excluded
            })
            .map(|reference| self.check_reference(reference))
            .collect();

        let mut failing = Vec::new();
        while let Some(check) = pending.next().await {
            if check.is_not_ok() {
                failing.push(check);
            }
        }
        failing
    }

    /// Extract references from one file and check them.
    pub async fn check_file(&self, path: PathBuf) -> FileOutcome {
        let file = path.display().to_string();

        let extracted = tokio::task::spawn_blocking(move || extractor::extract_file(&path)).await;
        let references = match extracted {
            Ok(Ok(references)) => references,
            Ok(Err(err)) => {
                return FileOutcome::Unreadable {
                    file,
                    error: err.to_string(),
                };
            }
            Err(err) => {
                return FileOutcome::Unreadable {
                    file,
                    error: err.to_string(),
                };
            }
        };

        logging::log_file_references(&file, references.len());
        let count = references.len();
        let failing = self.check_references(references).await;

        FileOutcome::Checked {
            file,
            references: count,
            failing,
        }
    }

    /// Check a set of files concurrently and fold every failing check into
    /// one report.
    ///
    /// Each file runs in its own task; a single loop owns the report, so
    /// folding needs no lock.
    pub async fn check_files(
        &self,
        paths: Vec<PathBuf>,
        progress: Option<&ProgressReporter>,
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        if paths.is_empty() {
            return summary;
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = JoinSet::new();

        for path in paths {
            if self.deadline.run_expired() {
                summary.skipped.push(path.display().to_string());
                continue;
            }

            let checker = self.clone();
            let tx = tx.clone();
            tasks.spawn(async move {
                let outcome = checker.check_file(path).await;
                // The receiver only closes once every sender is gone
                let _ = tx.send(outcome);
            });
        }
        drop(tx);

        while let Some(outcome) = rx.recv().await {
            match outcome {
                FileOutcome::Checked {
                    references,
                    failing,
                    ..
                } => {
                    summary.files_checked += 1;
                    summary.references_checked += references;
                    summary.report.extend(failing);
                    if let Some(progress) = progress {
                        progress.file_done(references, summary.report.warning_count());
                    }
                }
                FileOutcome::Unreadable { file, error } => {
                    logging::log_unreadable_file(&file, &error);
                    if let Some(progress) = progress {
                        progress.log_warning(&format!("could not read {file}: {error}"));
                        progress.file_done(0, summary.report.warning_count());
                    }
                    summary.unreadable.push((file, error));
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                logging::log_error("File task failed", Some(&err));
            }
        }

        logging::log_skipped_files(summary.skipped.len());
        summary
    }

    /// Check references found in a block of text under the given file name.
    pub async fn check_text(&self, file: &str, text: &str) -> Report {
        let references = extractor::extract_text(file, text);
        logging::log_file_references(file, references.len());
        self.check_references(references).await.into_iter().collect()
    }
}
