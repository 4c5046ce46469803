use std::fmt::Write;

use crate::providers::gitlab::MergeRequest;

use super::styling::{approval_glyph, blue};

const HEADER: &str = "Your merge requests:";
const SEPARATOR: &str = "=====";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Show `?` instead of the rejected glyph when the notes fetch failed
    pub mark_unknown: bool,
}

/// Sorts newest first and renders one numbered line per merge request.
///
/// `created_at` is compared as a string; GitLab's fixed-width ISO-8601
/// timestamps order the same way lexicographically and chronologically.
pub fn render(mut items: Vec<MergeRequest>, options: RenderOptions) -> String {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut output = String::new();
    let _ = writeln!(output, "{HEADER}");
    let _ = writeln!(output, "{SEPARATOR}");

    for (idx, mr) in items.iter().enumerate() {
        let _ = writeln!(
            output,
            "{}: {} [ review: {} ] ({})",
            idx + 1,
            mr.title,
            approval_glyph(mr.approval, options.mark_unknown),
            blue(&mr.url)
        );
    }

    let _ = writeln!(output, "{SEPARATOR}");
    output
}
