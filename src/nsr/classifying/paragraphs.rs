//! Paragraph reclassification
//!
//! Headings and cut markers are written as ordinary paragraphs and only recognised once the
//! paragraph is complete:
//!
//!     =====          Title          Title          Title
//!     Title          =====          -----          ~~~~~
//!     =====
//!     (H1)           (H2)           (H3)           (H4)
//!
//! An underline must be exactly as long as the title (in characters, ignoring trailing
//! whitespace). The two rules of an H1 must match each other, whatever the title's width.
//! A paragraph made of a single `<--->` line (three or more dashes) is a cut.

use crate::nsr::block::{BlockData, BlockType};
use once_cell::sync::Lazy;
use regex::Regex;

static CUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<-{3,}>\s*$").expect("cut pattern is valid"));

/// Classify a complete paragraph. `text` is the joined body.
pub fn classify_paragraph(text: &str) -> (BlockType, BlockData) {
    let text = text.trim_end();
    let lines: Vec<&str> = text.split('\n').map(str::trim_end).collect();

    match lines.as_slice() {
        [over, title, under]
            if is_rule(over, '=') && is_rule(under, '=') && same_width(&[*over, *under]) =>
        {
            return (BlockType::H1, BlockData::Text(title.to_string()));
        }
        [title, under] if same_width(&[*title, *under]) => {
            let kind = if is_rule(under, '=') {
                Some(BlockType::H2)
            } else if is_rule(under, '-') {
                Some(BlockType::H3)
            } else if is_rule(under, '~') {
                Some(BlockType::H4)
            } else {
                None
            };
            if let Some(kind) = kind {
                return (kind, BlockData::Text(title.to_string()));
            }
        }
        [single] if CUT.is_match(single) => {
            return (BlockType::Cut, BlockData::Empty);
        }
        _ => {}
    }

    (BlockType::Paragraph, BlockData::Text(text.to_string()))
}

/// Non-empty line made only of `ch`
fn is_rule(line: &str, ch: char) -> bool {
    !line.is_empty() && line.chars().all(|c| c == ch)
}

fn same_width(lines: &[&str]) -> bool {
    let mut widths = lines.iter().map(|l| l.chars().count());
    match widths.next() {
        Some(first) => widths.all(|w| w == first),
        None => true,
    }
}
