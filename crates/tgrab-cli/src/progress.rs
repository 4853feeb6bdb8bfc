//! Progress bar implementation for grab runs.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use tgrab_core::GrabProgress;

/// CLI progress bar wrapper implementing `GrabProgress`.
///
/// Shows ticket-level progress with the attachment currently being
/// downloaded as the message. Cleans itself up on drop.
pub struct GrabBar {
    bar: ProgressBar,
    current_ticket: u64,
}

impl GrabBar {
    /// Creates a new progress bar; the length is learned from the first
    /// ticket callback.
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} tickets")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );

        Self {
            bar,
            current_ticket: 0,
        }
    }

    /// Checks if a progress bar should be drawn (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for GrabBar {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl GrabProgress for GrabBar {
    fn on_ticket_start(&mut self, ticket_id: u64, current: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current.saturating_sub(1) as u64);
        self.current_ticket = ticket_id;
        self.bar.set_message(format!("Ticket {ticket_id}"));
    }

    fn on_attachment_start(&mut self, file_name: &str) {
        self.bar
            .set_message(format!("Ticket {}: {file_name}", self.current_ticket));
    }

    fn on_attachment_complete(&mut self, _file_name: &str) {
        self.bar
            .set_message(format!("Ticket {}", self.current_ticket));
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl Default for GrabBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_tracks_current_ticket() {
        let mut progress = GrabBar::new();

        progress.on_ticket_start(7399, 1, 3);
        assert_eq!(progress.current_ticket, 7399);

        progress.on_attachment_start("logs.tar.gz");
        progress.on_attachment_complete("logs.tar.gz");

        progress.on_ticket_start(7400, 2, 3);
        assert_eq!(progress.current_ticket, 7400);

        progress.on_complete();
    }
}
