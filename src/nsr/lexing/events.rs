//! Lexer events
//!
//! The line lexer turns each physical line into one of six events. Events are transient:
//! they are produced and consumed within a single parse.

use crate::nsr::options::OptionMap;
use std::fmt;

/// One classified line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexEvent {
    /// Plain content line, kept verbatim (tab-expanded)
    Line { line: usize, text: String },

    /// Header opening a named block: `name[options]:`
    BlockBegin {
        line: usize,
        name: String,
        options: OptionMap,
    },

    /// Header carrying its whole content on the same line: `name[options]: data`
    BlockSingleLine {
        line: usize,
        name: String,
        options: OptionMap,
        data: String,
    },

    /// `* ` list marker, with the text that follows it
    ListItemBegin { line: usize, text: String },

    /// Empty or whitespace-only line
    EmptyLine { line: usize },

    /// Return to column zero from inside a block; the same line is lexed again right after
    Deindent { line: usize },
}

impl LexEvent {
    pub fn kind(&self) -> LexEventKind {
        match self {
            LexEvent::Line { .. } => LexEventKind::Line,
            LexEvent::BlockBegin { .. } => LexEventKind::BlockBegin,
            LexEvent::BlockSingleLine { .. } => LexEventKind::BlockSingleLine,
            LexEvent::ListItemBegin { .. } => LexEventKind::ListItemBegin,
            LexEvent::EmptyLine { .. } => LexEventKind::EmptyLine,
            LexEvent::Deindent { .. } => LexEventKind::Deindent,
        }
    }

    /// 1-based number of the physical line that produced this event
    pub fn line(&self) -> usize {
        match self {
            LexEvent::Line { line, .. }
            | LexEvent::BlockBegin { line, .. }
            | LexEvent::BlockSingleLine { line, .. }
            | LexEvent::ListItemBegin { line, .. }
            | LexEvent::EmptyLine { line }
            | LexEvent::Deindent { line } => *line,
        }
    }

    pub fn options(&self) -> Option<&OptionMap> {
        match self {
            LexEvent::BlockBegin { options, .. } | LexEvent::BlockSingleLine { options, .. } => {
                Some(options)
            }
            LexEvent::Line { .. }
            | LexEvent::ListItemBegin { .. }
            | LexEvent::EmptyLine { .. }
            | LexEvent::Deindent { .. } => None,
        }
    }
}

impl fmt::Display for LexEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4} {}", self.line(), self.kind())?;
        match self {
            LexEvent::Line { text, .. } | LexEvent::ListItemBegin { text, .. } => {
                write!(f, " {text:?}")
            }
            LexEvent::BlockBegin { name, options, .. } => {
                write!(f, " {name:?}")?;
                if !options.is_empty() {
                    write!(f, " [{options}]")?;
                }
                Ok(())
            }
            LexEvent::BlockSingleLine {
                name,
                options,
                data,
                ..
            } => {
                write!(f, " {name:?}")?;
                if !options.is_empty() {
                    write!(f, " [{options}]")?;
                }
                write!(f, " {data:?}")
            }
            LexEvent::EmptyLine { .. } | LexEvent::Deindent { .. } => Ok(()),
        }
    }
}

/// The classification of a lexer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexEventKind {
    Line,
    BlockBegin,
    BlockSingleLine,
    ListItemBegin,
    EmptyLine,
    Deindent,
}

impl fmt::Display for LexEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LexEventKind::Line => "LINE",
            LexEventKind::BlockBegin => "BLOCK_BEGIN",
            LexEventKind::BlockSingleLine => "BLOCK_SLINE",
            LexEventKind::ListItemBegin => "LIST_ITEM_BEGIN",
            LexEventKind::EmptyLine => "EMPTY_LINE",
            LexEventKind::Deindent => "DEINDENT",
        };
        write!(f, "{name}")
    }
}
