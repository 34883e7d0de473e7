use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

/// Progress bars for a run, drawn on stderr so stdout stays pure JSON.
pub struct ProgressReporter {
    multi_progress: Arc<MultiProgress>,
    file_progress: Option<ProgressBar>,
    reference_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: Arc::new(MultiProgress::with_draw_target(ProgressDrawTarget::stderr())),
            file_progress: None,
            reference_progress: None,
            enabled,
        }
    }

    /// Enabled only when requested and stderr is a terminal.
    pub fn for_terminal(requested: bool) -> Self {
        Self::new(requested && std::io::stderr().is_terminal())
    }

    pub fn start_file_processing(&mut self, total_files: usize) {
        if !self.enabled {
            return;
        }

        let pb = self
            .multi_progress
            .add(ProgressBar::new(total_files as u64));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files checked ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        self.file_progress = Some(pb);
    }

    pub fn start_reference_counter(&mut self) {
        if !self.enabled {
            return;
        }

        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.yellow} {pos} references checked, {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("0 failing");
        self.reference_progress = Some(pb);
    }

    pub fn file_done(&self, references: usize, failing_so_far: usize) {
        if let Some(ref pb) = self.file_progress {
            pb.inc(1);
        }
        if let Some(ref pb) = self.reference_progress {
            pb.inc(references as u64);
            pb.set_message(format!("{failing_so_far} failing"));
        }
    }

    pub fn finish(&self, failing: usize) {
        if let Some(ref pb) = self.file_progress {
            pb.finish_with_message("done");
        }
        if let Some(ref pb) = self.reference_progress {
            let message = if failing == 0 {
                "✓ no broken references".to_string()
            } else {
                format!("✗ {failing} failing")
            };
            pb.finish_with_message(message);
        }
    }

    pub fn finish_and_clear(&self) {
        if self.enabled {
            self.multi_progress.clear().unwrap_or(());
        }
    }

    pub fn log_warning(&self, message: &str) {
        if self.enabled {
            self.multi_progress
                .println(format!("⚠ {message}"))
                .unwrap_or(());
        }
    }
}
