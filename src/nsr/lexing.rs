//! Lexer
//!
//! This module turns nsr source text into a lazy stream of [`LexEvent`]s, one per
//! physical line.
//!
//! Structure:
//!     - `lines`: splitting into numbered physical lines, tab expansion, whitespace helpers
//!     - `line_classification`: what a line is when read outside of a block
//!     - `events`: the event type handed to the block assembler
//!
//! Indentation Handling
//!
//!     The lexer carries a single bit of state: whether it is inside a named block or a list
//!     item. Inside a block, blank lines are reported as empty lines and never end the block,
//!     indented lines are content whatever their depth, and the first line back at column zero
//!     ends the block. That line produces a `DEINDENT` event and is then lexed again as if it
//!     had been read outside of the block, so a block can be followed directly by another
//!     block or by text.
//!
//!     Paragraphs do not put the lexer in block mode; it is the assembler that decides when
//!     a paragraph ends.
//!
//!     Comment lines (`##`) are dropped before anything else, including inside blocks.

pub mod events;
pub mod line_classification;
pub mod lines;

pub use events::{LexEvent, LexEventKind};
pub use line_classification::{classify_line, is_comment, LineClass};
pub use lines::{expand_tabs, indent_level, is_blank, PhysicalLines, DEFAULT_TAB_WIDTH};

use crate::nsr::error::Result;
use crate::nsr::options::{parse_option_list, OptionMap};

/// Lex a document with the default tab width
pub fn lex(source: &str) -> LineLexer<'_> {
    LineLexer::new(source)
}

/// The line lexer: an iterator of lexer events over a source document.
///
/// After an error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct LineLexer<'a> {
    lines: PhysicalLines<'a>,
    tab_width: usize,
    in_block: bool,
    /// Event of a line re-evaluated after a `DEINDENT`
    queued: Option<Result<LexEvent>>,
    failed: bool,
}

impl<'a> LineLexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: PhysicalLines::new(source),
            tab_width: DEFAULT_TAB_WIDTH,
            in_block: false,
            queued: None,
            failed: false,
        }
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Lex one line read outside of a block
    fn lex_outside(&mut self, line_no: usize, line: &str) -> Result<LexEvent> {
        let event = match classify_line(line) {
            LineClass::BlockBegin { name, options } => {
                self.in_block = true;
                LexEvent::BlockBegin {
                    line: line_no,
                    name: name.to_string(),
                    options: parse_options(options, line_no, line)?,
                }
            }
            LineClass::BlockSingleLine {
                name,
                options,
                data,
            } => LexEvent::BlockSingleLine {
                line: line_no,
                name: name.to_string(),
                options: parse_options(options, line_no, line)?,
                data: data.to_string(),
            },
            LineClass::ListItem { text } => {
                self.in_block = true;
                LexEvent::ListItemBegin {
                    line: line_no,
                    text: text.to_string(),
                }
            }
            LineClass::Blank => LexEvent::EmptyLine { line: line_no },
            LineClass::Text => LexEvent::Line {
                line: line_no,
                text: line.to_string(),
            },
        };
        Ok(event)
    }

    fn emit(&mut self, event: Result<LexEvent>) -> Option<Result<LexEvent>> {
        match &event {
            Ok(ev) => tracing::trace!(line = ev.line(), kind = %ev.kind(), "lexed line"),
            Err(err) => {
                tracing::debug!(line = err.line(), error = %err, "lexing failed");
                self.failed = true;
            }
        }
        Some(event)
    }
}

impl Iterator for LineLexer<'_> {
    type Item = Result<LexEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.queued.take() {
            return self.emit(event);
        }
        if self.failed {
            return None;
        }

        loop {
            let (line_no, raw) = self.lines.next()?;
            let line = expand_tabs(raw, self.tab_width);

            if is_comment(&line) {
                tracing::trace!(line = line_no, "skipped comment");
                continue;
            }

            if self.in_block {
                if is_blank(&line) {
                    return self.emit(Ok(LexEvent::EmptyLine { line: line_no }));
                }
                if indent_level(&line) > 0 {
                    return self.emit(Ok(LexEvent::Line {
                        line: line_no,
                        text: line.into_owned(),
                    }));
                }

                self.in_block = false;
                self.queued = Some(self.lex_outside(line_no, &line));
                return self.emit(Ok(LexEvent::Deindent { line: line_no }));
            }

            let event = self.lex_outside(line_no, &line);
            return self.emit(event);
        }
    }
}

fn parse_options(options: Option<&str>, line_no: usize, line: &str) -> Result<OptionMap> {
    match options {
        Some(contents) => parse_option_list(contents, line_no, line),
        None => Ok(OptionMap::new()),
    }
}
