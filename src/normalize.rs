//! Markdown clean-up before chunking.
//!
//! Extracted question papers are full of answer space: lines of dot
//! leaders where candidates write.
//!
//! ```text
//! 2(a) State two features of RAM. [2 marks]
//! ...........................................
//! ...........................................
//! ...................................... [2]
//! ```
//!
//! These carry nothing worth embedding. [`prepare`] strips the leaders,
//! keeps any trailing text on the same line (`[2]`), and collapses the
//! resulting blank runs to a single paragraph break. Lines inside fenced
//! code are left as they are. The chunkers never call this themselves;
//! it is the caller's choice.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::is_fence;

static DOT_LEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*\.{5,}[ \t]*").expect("dot leader pattern is valid"));

static BLANK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("blank run pattern is valid"));

/// Remove dot-leader answer space at the start of lines outside fenced
/// code.
#[must_use]
pub fn clean_answer_placeholders(md: &str) -> String {
    let mut out = String::with_capacity(md.len());
    let mut in_code = false;
    for line in md.split_inclusive('\n') {
        if is_fence(line) {
            in_code = !in_code;
            out.push_str(line);
        } else if in_code {
            out.push_str(line);
        } else {
            out.push_str(&DOT_LEADER.replace(line, ""));
        }
    }
    out
}

/// Collapse three or more consecutive newlines into one blank line and
/// trim the ends.
#[must_use]
pub fn collapse_blank_lines(md: &str) -> String {
    BLANK_RUN.replace_all(md, "\n\n").trim().to_string()
}

/// Full clean-up: strip answer space, then collapse blank runs.
///
/// Blank-run collapsing applies everywhere, fenced code included.
///
/// ```rust
/// use rubric::normalize::prepare;
///
/// let md = "1. Name a protocol.\n..........\n..........\n\n\n2. Next.";
/// assert_eq!(prepare(md), "1. Name a protocol.\n\n2. Next.");
/// ```
#[must_use]
pub fn prepare(md: &str) -> String {
    collapse_blank_lines(&clean_answer_placeholders(md))
}
