use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal};
use std::time::Duration;

/// Progress indicator manager. The spinner only appears on an interactive
/// stdout and is suppressed while verbose logging streams to the terminal.
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(suppress: bool) -> Self {
        Self {
            enabled: !suppress && io::stdout().is_terminal(),
        }
    }

    /// Create a spinner shown while a lookup request is in flight
    pub fn create_lookup_spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap()
                .tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Some(pb)
    }
}
