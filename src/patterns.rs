//! Pattern matchers for question headings, subparts and marks.
//!
//! Each matcher is a small pure function over one line (or one table
//! cell) returning a typed result, so the scanner never slices strings
//! itself.
//!
//! ## Recognized Forms
//!
//! ```text
//! 1.                       question "1"
//! Question 3               question "3"
//! ## Question 4            question "4"   (hashes need the keyword)
//! # 2024 Examination       no match
//! Q5                       question "5"
//! 1(a)                     question "1", subpart "a"
//! 2(b)(i)                  question "2", subpart "b(i)"
//! 3.c                      question "3", subpart "c"
//! | 6 | (ii) | ... |       question "6", subpart "ii"  (table strategy)
//! [4 marks]  (1 mark)      marks 4, marks 1
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:#{1,6}\s*(?:question|q\.?)\s*|(?:question|q\.?)\s*)?(?P<num>\d+)(?P<sub>(?:\s*\((?:[ivx]{1,4}|[a-z])\))+|(?:\.(?:[ivx]{1,4}|[a-z]))+)?(?:$|[^\w])",
    )
    .expect("heading pattern is valid")
});

static SUBPART_CELL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\(?(?P<tok>[ivx]{1,4}|[a-z])\)?$").expect("subpart pattern is valid")
});

static MARKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[\[(]\s*(?P<n>\d+)\s*marks?\s*[\])]").expect("marks pattern is valid")
});

/// A matched question heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Question number without leading zeros.
    pub question: String,
    /// Lowercased subpart, if the heading named one.
    pub subpart: Option<String>,
}

impl Heading {
    /// Whether this heading names a bare top-level question.
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.subpart.is_none()
    }
}

/// Match a question heading at the start of `line`.
///
/// ```rust
/// use rubric::patterns::match_heading;
///
/// let h = match_heading("2(b)(i) Explain caching.").unwrap();
/// assert_eq!(h.question, "2");
/// assert_eq!(h.subpart.as_deref(), Some("b(i)"));
///
/// assert!(match_heading("It is a protocol.").is_none());
/// ```
#[must_use]
pub fn match_heading(line: &str) -> Option<Heading> {
    let caps = HEADING.captures(line.trim())?;
    let question = normalize_number(caps.name("num")?.as_str());
    let subpart = caps.name("sub").and_then(|m| join_subpart(m.as_str()));
    Some(Heading { question, subpart })
}

/// Match a question reference in the cells of a table row.
///
/// The first non-empty cell is tested as a heading; if it matches, a
/// standalone subpart in the second non-empty cell overrides whatever
/// subpart the first cell carried.
///
/// ```rust
/// use rubric::patterns::match_table_heading;
///
/// let h = match_table_heading("| 2 | (a) | Explain UDP |").unwrap();
/// assert_eq!(h.question, "2");
/// assert_eq!(h.subpart.as_deref(), Some("a"));
/// ```
#[must_use]
pub fn match_table_heading(line: &str) -> Option<Heading> {
    let mut cells = line.split('|').map(str::trim).filter(|c| !c.is_empty());
    let mut heading = match_heading(cells.next()?)?;
    if let Some(subpart) = cells.next().and_then(match_subpart_cell) {
        heading.subpart = Some(subpart);
    }
    Some(heading)
}

/// Match a cell holding nothing but a subpart token, such as `(a)`,
/// `b` or `(iii)`.
#[must_use]
pub fn match_subpart_cell(cell: &str) -> Option<String> {
    SUBPART_CELL
        .captures(cell.trim())
        .and_then(|caps| caps.name("tok"))
        .map(|m| m.as_str().to_lowercase())
}

/// Find a bracketed marks declaration anywhere in `line`.
///
/// ```rust
/// use rubric::patterns::match_marks;
///
/// assert_eq!(match_marks("Define TCP. [4 marks]"), Some(4));
/// assert_eq!(match_marks("(1 mark)"), Some(1));
/// assert_eq!(match_marks("worth 4 marks"), None);
/// ```
#[must_use]
pub fn match_marks(line: &str) -> Option<u32> {
    MARKS
        .captures(line)
        .and_then(|caps| caps.name("n"))
        .and_then(|m| m.as_str().parse().ok())
}

fn normalize_number(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `"(b)(i)"` or `".b.i"` -> `"b(i)"`.
fn join_subpart(raw: &str) -> Option<String> {
    let mut tokens = raw
        .split(|c: char| c == '(' || c == ')' || c == '.' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);
    let mut joined = tokens.next()?;
    for token in tokens {
        joined.push('(');
        joined.push_str(&token);
        joined.push(')');
    }
    Some(joined)
}
