use console::{style, StyledObject};

use crate::providers::gitlab::{Approval, MergeRequestState};

/// Styling helpers for terminal output
pub fn red(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).red()
}

pub fn green(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).green()
}

pub fn blue(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).blue()
}

pub fn yellow(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).yellow()
}

pub fn dim(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).dim()
}

pub fn magenta_bold(text: impl std::fmt::Display) -> StyledObject<String> {
    style(text.to_string()).magenta().bold()
}

/// Review glyph for the report. `None` means the notes could not be fetched;
/// it renders as rejected unless `mark_unknown` is set.
pub fn approval_glyph(approval: Option<Approval>, mark_unknown: bool) -> StyledObject<String> {
    match approval {
        Some(Approval::Approved) => green("✔"),
        Some(Approval::Rejected) => red("✘"),
        None if mark_unknown => yellow("?"),
        None => red("✘"),
    }
}

/// Closed titles go red, merged green; every other state is left alone.
pub fn state_colored_title(title: &str, state: MergeRequestState) -> String {
    match state {
        MergeRequestState::Closed => red(title).to_string(),
        MergeRequestState::Merged => green(title).to_string(),
        _ => title.to_string(),
    }
}
