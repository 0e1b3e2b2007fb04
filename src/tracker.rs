//! Sticky question context.
//!
//! ## Stickiness
//!
//! Exam documents state the question number once and then run on for
//! pages. The tracker carries the last seen question, subpart and marks
//! forward across chunk boundaries until the text says otherwise:
//!
//! ```text
//! 3.                      question=3  subpart=-  marks=-
//! 3(a) Define X. [4 marks] question=3  subpart=a  marks=4
//! More answer text.        question=3  subpart=a  marks=4   <- sticky
//! 4.                      question=4  subpart=-  marks=-   <- reset
//! ```
//!
//! A bare top-level question clears subpart and marks so that context
//! from one question never leaks into the next.
//!
//! Detection is split from application: [`Evidence::scan`] inspects a
//! line without touching state, which lets the scanner flush the pending
//! chunk under the *old* context before [`StickyMetadata::apply`] moves
//! to the new one.

use crate::classify::{is_table_row, Regime};
use crate::patterns::{match_heading, match_marks, match_table_heading, Heading};

/// The question context in force at a point of the scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StickyMetadata {
    /// Current question number.
    pub question: Option<String>,
    /// Current subpart.
    pub subpart: Option<String>,
    /// Marks declared for the current question or subpart.
    pub marks: Option<u32>,
}

/// What one line says about question context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evidence {
    /// A question heading, from the line itself or its first table cell.
    pub heading: Option<Heading>,
    /// A bracketed marks declaration.
    pub marks: Option<u32>,
}

impl Evidence {
    /// Inspect `line` under `regime`.
    ///
    /// Headings are looked for on the trimmed line first, then (for table
    /// rows only) in the row's cells. Code blocks are never read for
    /// headings. The marks scan runs in every regime, code included.
    #[must_use]
    pub fn scan(line: &str, regime: Regime) -> Self {
        let heading = match regime {
            Regime::CodeBlock => None,
            _ => match_heading(line).or_else(|| {
                if is_table_row(line) {
                    match_table_heading(line)
                } else {
                    None
                }
            }),
        };
        Self {
            heading,
            marks: match_marks(line),
        }
    }

    /// Whether the line names a question (top-level or subpart).
    #[must_use]
    pub fn names_question(&self) -> bool {
        self.heading.is_some()
    }
}

impl StickyMetadata {
    /// Fold `evidence` into the context.
    ///
    /// The heading (if any) is applied before the marks, so a line like
    /// `4. Define X. [2 marks]` first resets question 4's marks and then
    /// sets them to 2.
    pub fn apply(&mut self, evidence: &Evidence) {
        if let Some(heading) = &evidence.heading {
            self.question = Some(heading.question.clone());
            match &heading.subpart {
                // Marks stay: a subpart may declare its value later on.
                Some(subpart) => self.subpart = Some(subpart.clone()),
                None => {
                    self.subpart = None;
                    self.marks = None;
                }
            }
        }
        if let Some(marks) = evidence.marks {
            self.marks = Some(marks);
        }
    }
}
