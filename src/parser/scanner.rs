//! Comment block scanner: a line-by-line state machine.
//!
//! Splits stylesheet source into contiguous comment regions (`//` runs and
//! `/* ... */` regions) and classifies the code line that ends each one.

use super::{normalize::normalize, subject};
use crate::model::{CommentStyle, RawCommentBlock, SubjectMetadata};
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*//").unwrap());

static RE_DELIMITED_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*/\*").unwrap());

static RE_DELIMITED_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*/\*").unwrap());

static RE_DELIMITED_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*/").unwrap());

// -- Scanner state ------------------------------------------------------------

struct Pending {
    style: CommentStyle,
    text: String,
    line: usize,
}

#[derive(Default)]
struct ScannerState {
    blocks: Vec<RawCommentBlock>,
    current: Option<Pending>,
    in_line_run: bool,
    in_delimited: bool,
}

impl ScannerState {
    fn start(&mut self, style: CommentStyle, text: String, line: usize) {
        self.current = Some(Pending { style, text, line });
    }

    fn append(&mut self, text: &str) {
        if let Some(ref mut pending) = self.current {
            pending.text.push('\n');
            pending.text.push_str(text);
        }
    }

    /// Close the pending block; blocks that normalize to nothing are dropped.
    fn flush(&mut self, subject: SubjectMetadata) {
        if let Some(pending) = self.current.take() {
            let text = normalize(&pending.text);
            if !text.is_empty() {
                self.blocks.push(RawCommentBlock {
                    style: pending.style,
                    text,
                    subject,
                    line: pending.line,
                });
            }
        }
    }
}

// -- Public API ---------------------------------------------------------------

/// Scan `source` into normalized comment blocks, in source order.
pub fn scan(source: &str) -> Vec<RawCommentBlock> {
    let mut state = ScannerState::default();

    for (idx, line) in source.lines().enumerate() {
        process_line(&mut state, line, idx + 1);
    }

    // An unterminated region is flushed with whatever it holds
    state.flush(SubjectMetadata::default());
    state.blocks
}

// -- Line processing ----------------------------------------------------------

fn process_line(s: &mut ScannerState, line: &str, line_no: usize) {
    let is_line_comment = RE_LINE_COMMENT.is_match(line);

    // 1. `//` comment outside a delimited region
    if is_line_comment && !s.in_delimited {
        let text = RE_LINE_COMMENT.replace(line, "");
        if s.in_line_run {
            s.append(&text);
        } else {
            // The following line is a comment, so the block has no subject
            s.flush(SubjectMetadata::default());
            s.start(CommentStyle::Line, text.into_owned(), line_no);
            s.in_line_run = true;
        }
        return;
    }

    // 2. `/*` opener, or any line inside an open region
    if s.in_delimited || RE_DELIMITED_START.is_match(line) {
        let opened = RE_DELIMITED_OPEN.replace(line, "");
        let text = RE_DELIMITED_END.replace(&opened, "");

        if s.in_delimited || s.in_line_run {
            // Inside the region, or a region directly under a `//` run
            s.append(&text);
        } else {
            // A closed region followed by another one has no subject
            s.flush(SubjectMetadata::default());
            s.start(CommentStyle::Delimited, text.into_owned(), line_no);
        }
        s.in_line_run = false;
        s.in_delimited = true;

        if RE_DELIMITED_END.is_match(line) && !is_line_comment {
            s.in_delimited = false;
        }
        return;
    }

    // 3. Code line: ends the block and names its subject
    if s.current.is_some() {
        s.flush(subject::classify(line));
    }
    s.in_line_run = false;
}
