//! Classifying module
//!
//!     The last stage of the core turns raw blocks into final [`Block`]s. Two independent
//!     transforms run here:
//!
//!         - list coalescing: consecutive list items become one `list` block whose data is
//!           the sequence of item bodies, each right-trimmed;
//!         - paragraph reclassification: a paragraph shaped like an underlined title or a
//!           `<--->` marker becomes a heading or a cut (see [`paragraphs`]).
//!
//!     Every other block has its body joined into a single right-trimmed string, with the
//!     indentation of named block bodies handled according to [`IndentPolicy`].
//!
//!     A few built-in types can also be opened by name from a header (`list:`, `cut:`,
//!     `text_h2: Title`...). They keep their built-in shape: a named list has one item per
//!     non-blank line and a named cut carries no data.

pub mod indentation;
pub mod paragraphs;

pub use indentation::{strip_common_indent, IndentPolicy};
pub use paragraphs::classify_paragraph;

use crate::nsr::assembling::RawBlock;
use crate::nsr::block::{Block, BlockData, BlockType};
use crate::nsr::error::Result;

/// Classify raw blocks into final blocks
pub fn classify<I>(raw_blocks: I) -> BlockClassifier<I::IntoIter>
where
    I: IntoIterator<Item = Result<RawBlock>>,
{
    BlockClassifier::new(raw_blocks.into_iter())
}

/// List items seen so far, waiting for the end of the list
#[derive(Debug, Clone)]
struct ListBuffer {
    start_line: usize,
    items: Vec<String>,
}

/// Iterator of final blocks over a stream of raw blocks
#[derive(Debug)]
pub struct BlockClassifier<I> {
    raw_blocks: I,
    indent_policy: IndentPolicy,
    list: Option<ListBuffer>,
    /// Block that ended a list, emitted right after it
    queued: Option<Block>,
    finished: bool,
}

impl<I> BlockClassifier<I>
where
    I: Iterator<Item = Result<RawBlock>>,
{
    pub fn new(raw_blocks: I) -> Self {
        Self {
            raw_blocks,
            indent_policy: IndentPolicy::default(),
            list: None,
            queued: None,
            finished: false,
        }
    }

    pub fn with_indent_policy(mut self, indent_policy: IndentPolicy) -> Self {
        self.indent_policy = indent_policy;
        self
    }

    fn push_item(&mut self, raw: RawBlock) {
        let item = raw.joined().trim_end().to_string();
        self.list
            .get_or_insert_with(|| ListBuffer {
                start_line: raw.start_line,
                items: Vec::new(),
            })
            .items
            .push(item);
    }

    fn take_list(&mut self) -> Option<Block> {
        self.list.take().map(|list| {
            tracing::debug!(
                start_line = list.start_line,
                items = list.items.len(),
                "coalesced list"
            );
            Block::new(BlockType::List, list.start_line, BlockData::Items(list.items))
        })
    }

    fn classify_block(&self, raw: RawBlock) -> Block {
        let RawBlock {
            kind,
            start_line,
            options,
            body,
        } = raw;

        let (kind, data) = match kind {
            BlockType::Paragraph => classify_paragraph(&body.join("\n")),
            BlockType::List => {
                let items = body
                    .iter()
                    .map(|line| line.trim())
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect();
                (BlockType::List, BlockData::Items(items))
            }
            BlockType::Cut => (BlockType::Cut, BlockData::Empty),
            kind @ (BlockType::ListItem
            | BlockType::H1
            | BlockType::H2
            | BlockType::H3
            | BlockType::H4
            | BlockType::Named(_)) => {
                let text = self.indent_policy.join(&body);
                (kind, BlockData::Text(text.trim_end().to_string()))
            }
        };

        tracing::debug!(kind = %kind, start_line, "classified block");
        Block::new(kind, start_line, data).with_options(options)
    }
}

impl<I> Iterator for BlockClassifier<I>
where
    I: Iterator<Item = Result<RawBlock>>,
{
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(block) = self.queued.take() {
            return Some(Ok(block));
        }

        loop {
            if self.finished {
                return None;
            }

            match self.raw_blocks.next() {
                Some(Ok(raw)) if raw.kind == BlockType::ListItem => self.push_item(raw),
                Some(Ok(raw)) => {
                    let block = self.classify_block(raw);
                    return match self.take_list() {
                        Some(list) => {
                            self.queued = Some(block);
                            Some(Ok(list))
                        }
                        None => Some(Ok(block)),
                    };
                }
                Some(Err(err)) => {
                    self.finished = true;
                    self.list = None;
                    return Some(Err(err));
                }
                None => {
                    self.finished = true;
                    return self.take_list().map(Ok);
                }
            }
        }
    }
}
