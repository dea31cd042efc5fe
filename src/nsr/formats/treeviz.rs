//! Treeviz formatter for block streams
//!
//! One line per block, which makes it quick to see how a document was cut into blocks.
//! The document is the root, blocks hang below it and list items one level below their
//! list:
//!
//!     <line number>? <indentation><connector> <icon> <type> <label>
//!
//! Labels are the block text on a single line, truncated to 30 characters.
//!
//! Example:
//!
//!     ⧉ 3 blocks
//!     ├─ § text_h2 Title
//!     ├─ ☰ list 2 items
//!     │ ├─ • first
//!     │ └─ • second
//!     └─ 𝒱 python x = 1 y = 2
//!
//! Icons
//!     Document: ⧉
//!     Paragraph: ¶
//!     Heading: §
//!     List: ☰
//!     ListItem: •
//!     Cut: ✂
//!     Named block: 𝒱

use super::registry::{FormatError, Formatter};
use crate::nsr::block::{Block, BlockData, BlockType};

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn get_icon(kind: &BlockType) -> &'static str {
    if kind.is_heading() {
        return "§";
    }
    match kind {
        BlockType::Paragraph => "¶",
        BlockType::List => "☰",
        BlockType::ListItem => "•",
        BlockType::Cut => "✂",
        _ => "𝒱",
    }
}

fn label(block: &Block) -> String {
    let label = match &block.data {
        BlockData::Text(text) => single_line(text),
        BlockData::Items(items) if items.len() == 1 => "1 item".to_string(),
        BlockData::Items(items) => format!("{} items", items.len()),
        BlockData::Empty => String::new(),
    };
    truncate(&label, LABEL_WIDTH)
}

fn format_block(block: &Block, is_last: bool, show_linum: bool) -> String {
    let mut output = String::new();

    let connector = if is_last { "└─" } else { "├─" };
    let linum_prefix = if show_linum {
        format!("{:02} ", block.start_line)
    } else {
        String::new()
    };

    let line = format!(
        "{}{} {} {} {}",
        linum_prefix,
        connector,
        get_icon(&block.kind),
        block.kind,
        label(block)
    );
    output.push_str(line.trim_end());
    output.push('\n');

    if let BlockData::Items(items) = &block.data {
        let pad = " ".repeat(linum_prefix.chars().count());
        let child_prefix = if is_last { "  " } else { "│ " };
        for (i, item) in items.iter().enumerate() {
            let connector = if i == items.len() - 1 { "└─" } else { "├─" };
            output.push_str(&format!(
                "{}{}{} {} {}\n",
                pad,
                child_prefix,
                connector,
                get_icon(&BlockType::ListItem),
                truncate(&single_line(item), LABEL_WIDTH)
            ));
        }
    }

    output
}

fn format_blocks(blocks: &[Block], show_linum: bool) -> String {
    let noun = if blocks.len() == 1 { "block" } else { "blocks" };
    let mut output = format!("⧉ {} {}\n", blocks.len(), noun);

    for (i, block) in blocks.iter().enumerate() {
        output.push_str(&format_block(block, i == blocks.len() - 1, show_linum));
    }

    output
}

pub fn to_treeviz_str(blocks: &[Block]) -> String {
    format_blocks(blocks, false)
}

/// Formatter implementation for treeviz format
#[derive(Debug, Clone, Copy, Default)]
pub struct TreevizFormatter {
    show_line_numbers: bool,
}

impl TreevizFormatter {
    pub fn with_line_numbers(show_line_numbers: bool) -> Self {
        Self { show_line_numbers }
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, blocks: &[Block]) -> Result<String, FormatError> {
        Ok(format_blocks(blocks, self.show_line_numbers))
    }

    fn description(&self) -> &str {
        "Visual tree representation with one line per block"
    }
}
