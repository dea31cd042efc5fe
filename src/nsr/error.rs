//! Error types for the nsr core
//!
//!     The grammar is permissive: anything that is not recognised degrades into a text
//!     paragraph. The only fatal condition is a block header that repeats an option key,
//!     which aborts the whole document.

/// Errors that can occur while parsing a document
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A bracketed option list repeated a key
    #[error("{message} at line {line}: {raw_line:?}")]
    OptionSyntax {
        message: String,
        line: usize,
        raw_line: String,
    },
}

impl Error {
    pub(crate) fn duplicate_option(key: &str, line: usize, raw_line: &str) -> Self {
        Error::OptionSyntax {
            message: format!("duplicate option '{key}'"),
            line,
            raw_line: raw_line.to_string(),
        }
    }

    /// 1-based line number of the offending line
    pub fn line(&self) -> usize {
        match self {
            Error::OptionSyntax { line, .. } => *line,
        }
    }

    /// The offending line, tab-expanded
    pub fn raw_line(&self) -> &str {
        match self {
            Error::OptionSyntax { raw_line, .. } => raw_line,
        }
    }
}

/// Result alias used across the core stages
pub type Result<T> = std::result::Result<T, Error>;
