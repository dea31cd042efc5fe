//! Block types
//!
//!     A block is one classified unit of the output stream: a paragraph, a heading, a list,
//!     a named (code, raw, image...) block or a cut marker. Renderers dispatch on the block
//!     type, which is a closed set of built-in kinds plus `Named` for any other name found in
//!     a block header.
//!
//!     Type tags are plain strings on the wire:
//!         text, list_item, list, text_h1, text_h2, text_h3, text_h4, cut, <name>
//!
//!     A header whose name equals a built-in tag opens a block of that built-in kind, so
//!     `text:` behaves like a paragraph and `list_item:` joins the surrounding list. Header
//!     names never contain digits, so the heading tags are only reachable as style targets.

use crate::nsr::options::OptionMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// The type of a block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// Plain text paragraph
    Paragraph,
    /// One `* ` item, before list coalescing
    ListItem,
    /// Consecutive list items merged together
    List,
    /// Title overlined and underlined with `=`
    H1,
    /// Title underlined with `=`
    H2,
    /// Title underlined with `-`
    H3,
    /// Title underlined with `~`
    H4,
    /// Section break marker (`<--->`)
    Cut,
    /// Any other block, named by its header
    Named(String),
}

impl BlockType {
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Paragraph => "text",
            BlockType::ListItem => "list_item",
            BlockType::List => "list",
            BlockType::H1 => "text_h1",
            BlockType::H2 => "text_h2",
            BlockType::H3 => "text_h3",
            BlockType::H4 => "text_h4",
            BlockType::Cut => "cut",
            BlockType::Named(name) => name,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, BlockType::Named(_))
    }

    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            BlockType::H1 | BlockType::H2 | BlockType::H3 | BlockType::H4
        )
    }
}

impl From<&str> for BlockType {
    fn from(tag: &str) -> Self {
        match tag {
            "text" => BlockType::Paragraph,
            "list_item" => BlockType::ListItem,
            "list" => BlockType::List,
            "text_h1" => BlockType::H1,
            "text_h2" => BlockType::H2,
            "text_h3" => BlockType::H3,
            "text_h4" => BlockType::H4,
            "cut" => BlockType::Cut,
            other => BlockType::Named(other.to_string()),
        }
    }
}

impl From<String> for BlockType {
    fn from(tag: String) -> Self {
        BlockType::from(tag.as_str())
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for BlockType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Payload of a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BlockData {
    /// Single string, used by every type except lists and cuts
    Text(String),
    /// One right-trimmed string per list item
    Items(Vec<String>),
    /// No payload (cut markers)
    Empty,
}

/// A classified block, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: BlockType,
    /// 1-based line of the header (named blocks) or of the first content line
    pub start_line: usize,
    #[serde(skip_serializing_if = "OptionMap::is_empty")]
    pub options: OptionMap,
    /// Set by a style hook, never by the parser
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub data: BlockData,
}

impl Block {
    pub fn new(kind: BlockType, start_line: usize, data: BlockData) -> Self {
        Self {
            kind,
            start_line,
            options: OptionMap::new(),
            style: None,
            data,
        }
    }

    pub fn with_options(mut self, options: OptionMap) -> Self {
        self.options = options;
        self
    }

    /// Text payload, for every block type other than lists and cuts
    pub fn text(&self) -> Option<&str> {
        match &self.data {
            BlockData::Text(text) => Some(text),
            BlockData::Items(_) | BlockData::Empty => None,
        }
    }

    /// Item payloads, for lists
    pub fn items(&self) -> Option<&[String]> {
        match &self.data {
            BlockData::Items(items) => Some(items),
            BlockData::Text(_) | BlockData::Empty => None,
        }
    }
}
