//! Fluent assertion API for parsed blocks
//!
//! Checking a whole block stream with plain `assert_eq!` means building every expected
//! [`Block`] by hand. The builders here let a test state only what it cares about, one
//! block at a time, and report the offending block with the whole stream on failure:
//!
//! ```rust-example
//! use nsr::nsr::pipeline::parse_document;
//! use nsr::nsr::testing::assert_blocks;
//!
//! let blocks = parse_document("Title\n=====\n\n* a\n* b\n")?;
//! assert_blocks(&blocks)
//!     .count(2)
//!     .block(0, |b| {
//!         b.kind("text_h2").text("Title");
//!     })
//!     .block(1, |b| {
//!         b.kind("list").items(&["a", "b"]).start_line(4);
//!     });
//! ```

use crate::nsr::block::{Block, BlockData};
use crate::nsr::options::OptionValue;

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a block stream
pub fn assert_blocks(blocks: &[Block]) -> BlocksAssertion<'_> {
    BlocksAssertion { blocks }
}

fn summarize(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|b| format!("{}@{}", b.kind, b.start_line))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Stream Assertions
// ============================================================================

pub struct BlocksAssertion<'a> {
    blocks: &'a [Block],
}

impl<'a> BlocksAssertion<'a> {
    /// Assert the number of blocks
    pub fn count(self, expected: usize) -> Self {
        assert_eq!(
            self.blocks.len(),
            expected,
            "Expected {} blocks, found {}: [{}]",
            expected,
            self.blocks.len(),
            summarize(self.blocks)
        );
        self
    }

    /// Assert the block types, in order
    pub fn kinds(self, expected: &[&str]) -> Self {
        let actual: Vec<_> = self.blocks.iter().map(|b| b.kind.as_str()).collect();
        assert_eq!(actual, expected, "Block types differ");
        self
    }

    /// Assert on a specific block by index
    pub fn block<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        assert!(
            index < self.blocks.len(),
            "Block index {} out of bounds ({} blocks: [{}])",
            index,
            self.blocks.len(),
            summarize(self.blocks)
        );

        assertion(BlockAssertion {
            block: &self.blocks[index],
            context: format!("blocks[{}]", index),
        });
        self
    }
}

// ============================================================================
// Block Assertions
// ============================================================================

pub struct BlockAssertion<'a> {
    block: &'a Block,
    context: String,
}

impl BlockAssertion<'_> {
    /// Assert the block type tag (`text`, `list`, `text_h1`, `python`...)
    pub fn kind(&self, expected: &str) -> &Self {
        assert_eq!(
            self.block.kind.as_str(),
            expected,
            "{}: Expected block type {:?}, found {:?}",
            self.context,
            expected,
            self.block.kind.as_str()
        );
        self
    }

    pub fn start_line(&self, expected: usize) -> &Self {
        assert_eq!(
            self.block.start_line, expected,
            "{}: Expected start line {}, found {}",
            self.context, expected, self.block.start_line
        );
        self
    }

    /// Assert the block carries exactly this text
    pub fn text(&self, expected: &str) -> &Self {
        match &self.block.data {
            BlockData::Text(text) => assert_eq!(
                text, expected,
                "{}: Expected text {:?}, found {:?}",
                self.context, expected, text
            ),
            other => panic!("{}: Expected text data, found {:?}", self.context, other),
        }
        self
    }

    /// Assert the block carries exactly these list items
    pub fn items(&self, expected: &[&str]) -> &Self {
        match &self.block.data {
            BlockData::Items(items) => assert_eq!(
                items, expected,
                "{}: Expected items {:?}, found {:?}",
                self.context, expected, items
            ),
            other => panic!("{}: Expected list items, found {:?}", self.context, other),
        }
        self
    }

    /// Assert the block carries no data
    pub fn empty(&self) -> &Self {
        assert_eq!(
            self.block.data,
            BlockData::Empty,
            "{}: Expected no data",
            self.context
        );
        self
    }

    /// Assert an option is set to `expected`
    pub fn option(&self, key: &str, expected: &str) -> &Self {
        assert_eq!(
            self.block.options.value(key),
            Some(expected),
            "{}: Expected option {}={:?}, options are [{}]",
            self.context,
            key,
            expected,
            self.block.options
        );
        self
    }

    /// Assert a bare flag option is set
    pub fn flag(&self, key: &str) -> &Self {
        assert_eq!(
            self.block.options.get(key),
            Some(&OptionValue::Flag(true)),
            "{}: Expected flag {}, options are [{}]",
            self.context,
            key,
            self.block.options
        );
        self
    }

    pub fn no_options(&self) -> &Self {
        assert!(
            self.block.options.is_empty(),
            "{}: Expected no options, found [{}]",
            self.context,
            self.block.options
        );
        self
    }

    pub fn style(&self, expected: Option<&str>) -> &Self {
        assert_eq!(
            self.block.style.as_deref(),
            expected,
            "{}: Unexpected style",
            self.context
        );
        self
    }
}
