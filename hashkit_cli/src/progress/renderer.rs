//! Progress rendering for the CLI
//!
//! Turns the core's `ProgressUpdate` stream into an indicatif bar on stderr.

use colored::*;
use hashkit_core::ProgressUpdate;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

const BAR_TEMPLATE: &str = "{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] \
                            {percent}% | {bytes}/{total_bytes} | {bytes_per_sec} | ETA: {eta}";

/// Render progress updates from a channel until it closes
pub async fn render_progress(mut rx: mpsc::Receiver<ProgressUpdate>, label: String) {
    let mut renderer = ProgressRenderer::new(label);

    while let Some(update) = rx.recv().await {
        renderer.handle_update(update);
    }

    renderer.finish();
}

/// Progress renderer for a single file hash
pub struct ProgressRenderer {
    label: String,
    bar: Option<ProgressBar>,
}

impl ProgressRenderer {
    /// Create a renderer; the bar appears with the first update
    pub fn new(label: String) -> Self {
        Self { label, bar: None }
    }

    /// Handle a progress update
    pub fn handle_update(&mut self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::HashProgress {
                algorithm,
                bytes_processed,
                total_bytes,
            } => {
                let label = &self.label;
                let bar = self.bar.get_or_insert_with(|| {
                    let bar = ProgressBar::new(total_bytes);
                    let style = ProgressStyle::default_bar()
                        .template(BAR_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("#>-");
                    bar.set_style(style);
                    bar.set_message(format!(
                        "{}: {} [{}]",
                        "Hashing".bold(),
                        label.cyan(),
                        algorithm.to_string().yellow()
                    ));
                    bar
                });

                // The file may have grown since it was opened
                if total_bytes > bar.length().unwrap_or(0) {
                    bar.set_length(total_bytes);
                }
                bar.set_position(bytes_processed);
            }

            ProgressUpdate::Status { message } => {
                let line = format!("{} {}", "→".green(), message);
                match &self.bar {
                    Some(bar) => bar.println(line),
                    None => eprintln!("{line}"),
                }
            }
        }
    }

    /// Bytes reported so far
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map(ProgressBar::position).unwrap_or(0)
    }

    /// Clear the bar once the job ends
    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
