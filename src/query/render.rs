//! Column layout for KWIC lines
//!
//! A rendered line is `<line id> <left context><   term   ><right context>`.
//! The left context is right-justified into `width * center` characters, a
//! fixed budget rather than a measured column, so output lines up with
//! concordances produced by earlier versions of the tool.

use crate::index::types::{Occurrence, WindowWidth};
use std::fmt;

/// Spaces placed on each side of the center term
const CENTER_PADDING: usize = 3;

/// One occurrence laid out for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub line_id: String,
    /// Left context, already right-justified
    pub left: String,
    /// Center term, already padded
    pub center: String,
    pub right: String,
}

impl RenderedLine {
    /// The window text without the line id prefix
    pub fn window_text(&self) -> String {
        format!("{}{}{}", self.left, self.center, self.right)
    }
}

impl fmt::Display for RenderedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}{}", self.line_id, self.left, self.center, self.right)
    }
}

/// Lay out one occurrence.
///
/// With `replace_separators`, every separator character in the window text
/// (term, context tokens and sentinels alike) becomes a space. The line id is
/// left untouched.
pub fn render_occurrence(
    occurrence: &Occurrence,
    width: WindowWidth,
    separator: char,
    replace_separators: bool,
) -> RenderedLine {
    let center = width.center();
    let window = &occurrence.window;
    let split = center.min(window.len());

    let left = window[..split].join(" ");
    let term = window.get(center).map(String::as_str).unwrap_or("");
    let right = window.get(center + 1..).map(|r| r.join(" ")).unwrap_or_default();

    let left = format!("{:>budget$}", left, budget = width.get() * center);
    let pad = " ".repeat(CENTER_PADDING);
    let center = format!("{pad}{term}{pad}");

    let (left, center, right) = if replace_separators {
        let swap = |s: String| s.replace(separator, " ");
        (swap(left), swap(center), swap(right))
    } else {
        (left, center, right)
    };

    RenderedLine {
        line_id: occurrence.line_id.clone(),
        left,
        center,
        right,
    }
}
