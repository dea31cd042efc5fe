//! Parsing pipeline
//!
//! Wires the three core stages into a single lazy iterator:
//!
//!     text → LineLexer → BlockAssembler → BlockClassifier → [BlockHook] → Block
//!
//! Nothing is read ahead beyond what each stage needs: the lexer looks at one line at a time,
//! the assembler holds the current block, and the classifier holds the list being coalesced.
//! The first error ends the stream.

use crate::nsr::assembling::{BlockAssembler, DeindentGlue};
use crate::nsr::block::Block;
use crate::nsr::classifying::{BlockClassifier, IndentPolicy};
use crate::nsr::error::Result;
use crate::nsr::lexing::{LineLexer, DEFAULT_TAB_WIDTH};
use crate::nsr::styles::BlockHook;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Knobs of the core parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    pub tab_width: usize,
    pub deindent_glue: DeindentGlue,
    pub indent_policy: IndentPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            deindent_glue: DeindentGlue::default(),
            indent_policy: IndentPolicy::default(),
        }
    }
}

type Stages<'a> = BlockClassifier<BlockAssembler<LineLexer<'a>>>;

/// Lazy stream of blocks for one document
pub struct Blocks<'a> {
    stages: Stages<'a>,
    hook: Option<Box<dyn BlockHook + 'a>>,
}

impl<'a> Blocks<'a> {
    fn new(source: &'a str, options: &ParseOptions) -> Self {
        let lexer = LineLexer::new(source).with_tab_width(options.tab_width);
        let assembler = BlockAssembler::new(lexer).with_glue(options.deindent_glue);
        let stages = BlockClassifier::new(assembler).with_indent_policy(options.indent_policy);
        Self { stages, hook: None }
    }

    /// Run `hook` on every block before it is yielded. Replaces any previous hook.
    pub fn with_hook(mut self, hook: impl BlockHook + 'a) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for Blocks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blocks")
            .field("stages", &self.stages)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl Iterator for Blocks<'_> {
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.stages.next()?;
        Some(block.map(|block| match &self.hook {
            Some(hook) => hook.apply(block),
            None => block,
        }))
    }
}

/// Parse a document with default options
pub fn parse(source: &str) -> Blocks<'_> {
    Blocks::new(source, &ParseOptions::default())
}

/// Parse a document with explicit options
pub fn parse_with<'a>(source: &'a str, options: &ParseOptions) -> Blocks<'a> {
    Blocks::new(source, options)
}

/// Parse a document, running `hook` on every block
pub fn parse_with_hook<'a>(
    source: &'a str,
    options: &ParseOptions,
    hook: impl BlockHook + 'a,
) -> Blocks<'a> {
    Blocks::new(source, options).with_hook(hook)
}

/// Parse a whole document eagerly
#[tracing::instrument(skip_all, fields(len = source.len()))]
pub fn parse_document(source: &str) -> Result<Vec<Block>> {
    parse_document_with(source, &ParseOptions::default())
}

/// Parse a whole document eagerly with explicit options
#[tracing::instrument(skip_all, fields(len = source.len()))]
pub fn parse_document_with(source: &str, options: &ParseOptions) -> Result<Vec<Block>> {
    let blocks = parse_with(source, options).collect::<Result<Vec<_>>>()?;
    tracing::debug!(blocks = blocks.len(), "parsed document");
    Ok(blocks)
}
