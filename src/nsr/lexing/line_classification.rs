//! Line Classification
//!
//! Core classification logic for determining line types outside of a block.
//! Inside a block the lexer only distinguishes blank, indented and column-zero lines; see
//! [`LineLexer`](super::LineLexer).
//!
//! Classification follows this specific order (important for correctness):
//! 1. Block begin lines: `name[options]:` with nothing after the colon
//! 2. Single-line blocks: `name[options]: data`
//! 3. List item lines: `* ` after optional indentation
//! 4. Blank lines
//! 5. Default to text
//!
//! Comments (lines whose content starts with `##`) are filtered by the lexer before any of
//! this runs.

use once_cell::sync::Lazy;
use regex::Regex;

use super::lines::is_blank;

static BLOCK_BEGIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[-A-Za-z_.]*)(?:\[(?P<opts>.*?)\])?:\s*$")
        .expect("block begin pattern is valid")
});

static BLOCK_SINGLE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[-A-Za-z_.]*)(?:\[(?P<opts>.*?)\])?:\s*(?P<data>.+)$")
        .expect("single-line block pattern is valid")
});

const COMMENT_PREFIX: &str = "##";
const LIST_MARKER: &str = "* ";

/// What a line is, when read outside of any block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    BlockBegin {
        name: &'a str,
        options: Option<&'a str>,
    },
    BlockSingleLine {
        name: &'a str,
        options: Option<&'a str>,
        data: &'a str,
    },
    ListItem {
        text: &'a str,
    },
    Blank,
    Text,
}

/// Check if line is a comment (`##` after optional indentation)
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT_PREFIX)
}

/// Determine the class of a line read outside of a block
pub fn classify_line(line: &str) -> LineClass<'_> {
    if let Some(caps) = BLOCK_BEGIN.captures(line) {
        return LineClass::BlockBegin {
            name: caps.name("name").map_or("", |m| m.as_str()),
            options: caps.name("opts").map(|m| m.as_str()),
        };
    }

    if let Some(caps) = BLOCK_SINGLE_LINE.captures(line) {
        return LineClass::BlockSingleLine {
            name: caps.name("name").map_or("", |m| m.as_str()),
            options: caps.name("opts").map(|m| m.as_str()),
            data: caps.name("data").map_or("", |m| m.as_str().trim()),
        };
    }

    if let Some(text) = list_item_text(line) {
        return LineClass::ListItem { text };
    }

    if is_blank(line) {
        return LineClass::Blank;
    }

    LineClass::Text
}

/// Text after a `* ` marker, if the line starts with one
fn list_item_text(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix(LIST_MARKER)
        .map(str::trim)
}
