mod progress;
mod report;
mod styling;

pub use progress::PhaseProgress;
pub use report::{render, RenderOptions};
pub use styling::state_colored_title;
use styling::{dim, magenta_bold};

/// Prints the banner to stderr.
pub fn print_banner() {
    eprintln!(
        "{} {}",
        magenta_bold("my-mr"),
        dim(env!("CARGO_PKG_VERSION")),
    );
}
