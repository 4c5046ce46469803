use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::{green, yellow};

/// Spinner for the two fetch phases. Draws to stderr only, so the report on
/// stdout stays clean.
pub struct PhaseProgress {
    pb: ProgressBar,
}

impl PhaseProgress {
    pub fn start_listing() -> Self {
        let pb = create_spinner(yellow("Fetching merge requests").to_string());
        Self { pb }
    }

    pub fn finish_listing_start_notes(self, count: usize) -> Self {
        self.pb
            .finish_with_message(green(format!("Fetched {count} merge requests ✓")).to_string());
        let pb = create_spinner(yellow("Fetching review notes").to_string());
        Self { pb }
    }

    pub fn finish_notes(self) {
        self.pb
            .finish_with_message(green("Review status collected ✓").to_string());
    }
}

fn create_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    // Literal template, always valid
    if let Ok(style) = ProgressStyle::default_spinner().template("  {msg} {spinner}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
