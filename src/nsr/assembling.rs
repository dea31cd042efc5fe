//! Assembling module
//!
//!     The assembler consumes lexer events and groups lines into raw blocks: a type, the line
//!     the block starts on, its options and its body lines, still untouched. It is the second
//!     state machine of the pipeline and is where blank lines get their meaning:
//!
//!         - inside a paragraph, a blank line ends the paragraph;
//!         - inside any other block (code, list items...), a blank line is content and is kept
//!           as an empty body line.
//!
//!     Blocks other than paragraphs end on a `DEINDENT` event.
//!
//! Deindent glue
//!
//!     A block that ends with a blank line followed by one more indented line is ambiguous:
//!
//!         python:
//!             x = 1
//!
//!           This line starts the next paragraph
//!         and this one continues it.
//!
//!     The trailing line shares indentation with the block, so the lexer reports it as block
//!     content, but it really is the start of what follows. When the block closes, that line
//!     is taken out of its body and carried over as the first line of the next block.
//!     [`DeindentGlue`] decides when this happens; the default only carries lines indented
//!     less than the rest of the block, so a code block whose last paragraph is a normal
//!     indented line keeps it. List items always give up such a line: their first body line
//!     is stored without its marker, so there is no block indentation to compare against.

use crate::nsr::block::BlockType;
use crate::nsr::error::Result;
use crate::nsr::lexing::{indent_level, is_blank, LexEvent};
use crate::nsr::options::OptionMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A block as grouped by the assembler, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub kind: BlockType,
    /// 1-based line of the header, or of the first content line
    pub start_line: usize,
    pub options: OptionMap,
    pub body: Vec<String>,
}

impl RawBlock {
    pub fn new(kind: BlockType, start_line: usize) -> Self {
        Self {
            kind,
            start_line,
            options: OptionMap::new(),
            body: Vec::new(),
        }
    }

    /// Body lines joined with `\n`
    pub fn joined(&self) -> String {
        self.body.join("\n")
    }
}

/// When a closing block gives its last line to the block that follows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeindentGlue {
    /// Carry the line only when it is indented less than the rest of the body
    #[default]
    Shallower,
    /// Carry any non-blank line that follows a blank line at the end of a body
    Always,
}

/// A line taken from a closing block, waiting for the next one
#[derive(Debug, Clone, PartialEq, Eq)]
struct CarriedLine {
    line: usize,
    text: String,
}

/// Assemble lexer events into raw blocks
pub fn assemble<I>(events: I) -> BlockAssembler<I::IntoIter>
where
    I: IntoIterator<Item = Result<LexEvent>>,
{
    BlockAssembler::new(events.into_iter())
}

/// Iterator of raw blocks over a stream of lexer events.
///
/// Lexer errors are passed through and end the stream.
#[derive(Debug)]
pub struct BlockAssembler<I> {
    events: I,
    glue: DeindentGlue,
    current: Option<RawBlock>,
    pending: Option<CarriedLine>,
    /// Line number of the last content line appended to `current`
    last_line: usize,
    ready: VecDeque<RawBlock>,
    finished: bool,
}

impl<I> BlockAssembler<I>
where
    I: Iterator<Item = Result<LexEvent>>,
{
    pub fn new(events: I) -> Self {
        Self {
            events,
            glue: DeindentGlue::default(),
            current: None,
            pending: None,
            last_line: 0,
            ready: VecDeque::new(),
            finished: false,
        }
    }

    pub fn with_glue(mut self, glue: DeindentGlue) -> Self {
        self.glue = glue;
        self
    }

    fn handle(&mut self, event: LexEvent) {
        match event {
            LexEvent::BlockSingleLine {
                line,
                name,
                options,
                data,
            } => {
                self.close_current();
                self.flush_pending();
                let mut block = RawBlock::new(BlockType::from(name), line);
                block.options = options;
                block.body.push(data);
                self.push_ready(block);
            }
            LexEvent::BlockBegin {
                line,
                name,
                options,
            } => {
                self.close_current();
                let mut block = RawBlock::new(BlockType::from(name), line);
                block.options = options;
                if let Some(carried) = self.pending.take() {
                    block.body.push(carried.text);
                }
                self.last_line = line;
                self.current = Some(block);
            }
            LexEvent::ListItemBegin { line, text } => {
                self.close_current();
                self.open_with_pending(BlockType::ListItem, line, text);
            }
            LexEvent::Line { line, text } => match self.current.as_mut() {
                Some(block) => {
                    block.body.push(text);
                    self.last_line = line;
                }
                None => self.open_with_pending(BlockType::Paragraph, line, text),
            },
            LexEvent::EmptyLine { .. } => {
                match self.current.as_ref().map(|b| b.kind == BlockType::Paragraph) {
                    Some(true) => self.close_current(),
                    Some(false) => {
                        if let Some(block) = self.current.as_mut() {
                            block.body.push(String::new());
                        }
                    }
                    None => self.flush_pending(),
                }
            }
            LexEvent::Deindent { line } => match self.current.take() {
                Some(mut block) => {
                    self.pending = self.split_glue(&mut block);
                    self.push_ready(block);
                }
                None => tracing::debug!(line, "deindent with no open block"),
            },
        }
    }

    /// Open a paragraph or list item whose first line is `text`, after any carried line
    fn open_with_pending(&mut self, kind: BlockType, line: usize, text: String) {
        let mut block = match self.pending.take() {
            Some(carried) => {
                let mut block = RawBlock::new(kind, carried.line);
                block.body.push(carried.text);
                block
            }
            None => RawBlock::new(kind, line),
        };
        block.body.push(text);
        self.last_line = line;
        self.current = Some(block);
    }

    /// Close the open block because another one starts.
    ///
    /// Only paragraphs can be open at that point; the lexer ends every other block with a
    /// deindent first.
    fn close_current(&mut self) {
        if let Some(block) = self.current.take() {
            if block.kind != BlockType::Paragraph {
                tracing::warn!(
                    kind = %block.kind,
                    start_line = block.start_line,
                    "block closed without a deindent"
                );
            }
            self.push_ready(block);
        }
    }

    /// Emit a carried line on its own, as a paragraph
    fn flush_pending(&mut self) {
        if let Some(carried) = self.pending.take() {
            let mut block = RawBlock::new(BlockType::Paragraph, carried.line);
            block.body.push(carried.text);
            self.push_ready(block);
        }
    }

    /// Apply the deindent-glue correction to a closing block
    fn split_glue(&self, block: &mut RawBlock) -> Option<CarriedLine> {
        let [.., before, last] = block.body.as_slice() else {
            return None;
        };
        if block.body.len() < 3 || is_blank(last) || !is_blank(before) {
            return None;
        }

        if self.glue == DeindentGlue::Shallower && block.kind != BlockType::ListItem {
            let head = &block.body[..block.body.len() - 2];
            let base = head
                .iter()
                .filter(|l| !is_blank(l))
                .map(|l| indent_level(l))
                .filter(|&indent| indent > 0)
                .min();
            match base {
                Some(base) if indent_level(last) < base => {}
                _ => return None,
            }
        }

        let text = block.body.pop()?;
        tracing::debug!(
            kind = %block.kind,
            line = self.last_line,
            "carrying trailing line over to the next block"
        );
        Some(CarriedLine {
            line: self.last_line,
            text,
        })
    }

    fn finish(&mut self) {
        if let Some(block) = self.current.take() {
            if block.body.is_empty() {
                tracing::debug!(kind = %block.kind, "dropping empty block at end of input");
            } else {
                self.push_ready(block);
            }
        }
        self.flush_pending();
    }

    fn push_ready(&mut self, block: RawBlock) {
        tracing::debug!(
            kind = %block.kind,
            start_line = block.start_line,
            lines = block.body.len(),
            "assembled block"
        );
        self.ready.push_back(block);
    }
}

impl<I> Iterator for BlockAssembler<I>
where
    I: Iterator<Item = Result<LexEvent>>,
{
    type Item = Result<RawBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(block) = self.ready.pop_front() {
                return Some(Ok(block));
            }
            if self.finished {
                return None;
            }

            match self.events.next() {
                Some(Ok(event)) => self.handle(event),
                Some(Err(err)) => {
                    self.finished = true;
                    self.current = None;
                    self.pending = None;
                    return Some(Err(err));
                }
                None => {
                    self.finish();
                    self.finished = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nsr::lexing::lex;
    use rstest::rstest;

    fn raw_blocks(source: &str) -> Vec<RawBlock> {
        assemble(lex(source)).collect::<Result<_>>().unwrap()
    }

    fn raw_blocks_with(source: &str, glue: DeindentGlue) -> Vec<RawBlock> {
        assemble(lex(source))
            .with_glue(glue)
            .collect::<Result<_>>()
            .unwrap()
    }

    fn summary(blocks: &[RawBlock]) -> Vec<(String, usize, Vec<String>)> {
        blocks
            .iter()
            .map(|b| (b.kind.to_string(), b.start_line, b.body.clone()))
            .collect()
    }

    fn s(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_blank_line_ends_paragraph() {
        let blocks = raw_blocks("one\ntwo\n\nthree\n");
        assert_eq!(
            summary(&blocks),
            vec![
                ("text".to_string(), 1, s(&["one", "two"])),
                ("text".to_string(), 4, s(&["three"])),
            ]
        );
    }

    #[test]
    fn test_blank_line_kept_inside_named_block() {
        let blocks = raw_blocks("python:\n    a\n\n    b\n");
        assert_eq!(
            summary(&blocks),
            vec![("python".to_string(), 1, s(&["    a", "", "    b"]))]
        );
    }

    #[test]
    fn test_single_line_block() {
        let blocks = raw_blocks("Autor: koder\n");
        assert_eq!(
            summary(&blocks),
            vec![("Autor".to_string(), 1, s(&["koder"]))]
        );
    }

    #[test]
    fn test_single_line_block_closes_paragraph() {
        let blocks = raw_blocks("Some prose\nimg: a.png\n");
        assert_eq!(
            summary(&blocks),
            vec![
                ("text".to_string(), 1, s(&["Some prose"])),
                ("img".to_string(), 2, s(&["a.png"])),
            ]
        );
    }

    #[test]
    fn test_block_begin_closes_paragraph() {
        let blocks = raw_blocks("Intro\npython:\n    x\n");
        assert_eq!(
            summary(&blocks),
            vec![
                ("text".to_string(), 1, s(&["Intro"])),
                ("python".to_string(), 2, s(&["    x"])),
            ]
        );
    }

    #[test]
    fn test_list_item_closes_paragraph() {
        let blocks = raw_blocks("Some text:\n    * X1\n    * X2\n");
        assert_eq!(
            summary(&blocks),
            vec![
                ("text".to_string(), 1, s(&["Some text:"])),
                ("list_item".to_string(), 2, s(&["X1", "    * X2"])),
            ]
        );
    }

    #[test]
    fn test_list_item_continuation() {
        let blocks = raw_blocks("* first\n  more\n* second\n");
        assert_eq!(
            summary(&blocks),
            vec![
                ("list_item".to_string(), 1, s(&["first", "  more"])),
                ("list_item".to_string(), 3, s(&["second"])),
            ]
        );
    }

    #[test]
    fn test_deindent_closes_empty_block() {
        let blocks = raw_blocks("toc:\nNext\n");
        assert_eq!(
            summary(&blocks),
            vec![
                ("toc".to_string(), 1, Vec::new()),
                ("text".to_string(), 2, s(&["Next"])),
            ]
        );
    }

    #[test]
    fn test_empty_block_at_end_of_input_is_dropped() {
        assert!(raw_blocks("toc:\n").is_empty());
    }

    #[test]
    fn test_same_indentation_is_not_glued() {
        let blocks = raw_blocks("python:\n    x = 1\n\n    more\nNext para\n");
        assert_eq!(
            summary(&blocks),
            vec![
                ("python".to_string(), 1, s(&["    x = 1", "", "    more"])),
                ("text".to_string(), 5, s(&["Next para"])),
            ]
        );
    }

    #[test]
    fn test_shallower_line_is_glued_to_next_paragraph() {
        let blocks = raw_blocks("python:\n    x = 1\n\n  New para\ncontinues\n");
        assert_eq!(
            summary(&blocks),
            vec![
                ("python".to_string(), 1, s(&["    x = 1", ""])),
                ("text".to_string(), 4, s(&["  New para", "continues"])),
            ]
        );
    }

    #[test]
    fn test_always_glue() {
        let blocks = raw_blocks_with(
            "python:\n    x = 1\n\n    more\nNext para\n",
            DeindentGlue::Always,
        );
        assert_eq!(
            summary(&blocks),
            vec![
                ("python".to_string(), 1, s(&["    x = 1", ""])),
                ("text".to_string(), 4, s(&["    more", "Next para"])),
            ]
        );
    }

    #[test]
    fn test_glue_needs_three_lines() {
        let blocks = raw_blocks_with("raw:\n\n  a\nb\n", DeindentGlue::Always);
        assert_eq!(
            summary(&blocks),
            vec![
                ("raw".to_string(), 1, s(&["", "  a"])),
                ("text".to_string(), 4, s(&["b"])),
            ]
        );
    }

    #[test]
    fn test_carried_line_opens_named_block_body() {
        let blocks = raw_blocks_with("raw:\n    a\n\n    b\nc:\n    d\n", DeindentGlue::Always);
        assert_eq!(
            summary(&blocks),
            vec![
                ("raw".to_string(), 1, s(&["    a", ""])),
                ("c".to_string(), 5, s(&["    b", "    d"])),
            ]
        );
    }

    #[test]
    fn test_trailing_blank_line_prevents_glue() {
        let blocks = raw_blocks_with("raw:\n    a\n\n    b\n\nc\n", DeindentGlue::Always);
        assert_eq!(
            summary(&blocks),
            vec![
                ("raw".to_string(), 1, s(&["    a", "", "    b", ""])),
                ("text".to_string(), 6, s(&["c"])),
            ]
        );
    }

    #[test]
    fn test_carried_line_before_single_line_block() {
        let blocks = raw_blocks_with("raw:\n    a\n\n    b\nimg: x.png\n", DeindentGlue::Always);
        assert_eq!(
            summary(&blocks),
            vec![
                ("raw".to_string(), 1, s(&["    a", ""])),
                ("text".to_string(), 4, s(&["    b"])),
                ("img".to_string(), 5, s(&["x.png"])),
            ]
        );
    }

    #[test]
    fn test_carried_line_opens_list_item() {
        let blocks = raw_blocks_with("* item\n\n  tail\n* next\n", DeindentGlue::Always);
        assert_eq!(
            summary(&blocks),
            vec![
                ("list_item".to_string(), 1, s(&["item", ""])),
                ("list_item".to_string(), 3, s(&["  tail", "next"])),
            ]
        );
    }

    #[rstest]
    #[case("* a\n\n  tail\nNext\n", &["a", ""], 3, &["  tail", "Next"])]
    #[case("* a\n  cont\n\n tail\nNext\n", &["a", "  cont", ""], 4, &[" tail", "Next"])]
    fn test_list_item_glue_by_default(
        #[case] source: &str,
        #[case] item: &[&str],
        #[case] carried_line: usize,
        #[case] paragraph: &[&str],
    ) {
        let blocks = raw_blocks(source);
        assert_eq!(
            summary(&blocks),
            vec![
                ("list_item".to_string(), 1, s(item)),
                ("text".to_string(), carried_line, s(paragraph)),
            ]
        );
    }

    #[test]
    fn test_options_are_kept() {
        let blocks = raw_blocks("python[linenos]:\n    x\n");
        assert!(blocks[0].options.flag("linenos"));
    }

    #[test]
    fn test_error_ends_stream() {
        let results: Vec<_> = assemble(lex("Intro\n\nx[a,a]:\n    y\n")).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert_eq!(results[1].as_ref().unwrap_err().line(), 3);
    }
}
