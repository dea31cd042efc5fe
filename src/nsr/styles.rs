//! Style remapping
//!
//!     Renderers dispatch on block types, so a document can introduce its own block names and
//!     have them rendered as an existing type with extra options. A style file declares one
//!     alias per line:
//!
//!         # new name  = rendered as [options]
//!         shell       = code [lang=bash, linenos]
//!         warning     = text [class=warn]
//!
//!     Blank lines and lines starting with `#` are ignored, and a rule may end with a `#`
//!     comment. Applying the map to a `shell:` block turns it into a `code` block with
//!     `style = Some("shell")`; the rule's options fill in whatever the block does not set.
//!
//!     The core never loads style files itself. A [`StyleMap`] is one [`BlockHook`], the
//!     last stage of the pipeline.

use crate::nsr::block::{Block, BlockType};
use crate::nsr::error::Error;
use crate::nsr::options::{parse_option_list, OptionMap};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A transformation applied to every block before it reaches the caller
pub trait BlockHook {
    fn apply(&self, block: Block) -> Block;
}

impl<F> BlockHook for F
where
    F: Fn(Block) -> Block,
{
    fn apply(&self, block: Block) -> Block {
        self(block)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("malformed style rule at line {line}: {text:?}")]
    Syntax { line: usize, text: String },
    #[error("invalid style options: {0}")]
    Option(#[from] Error),
    #[error("cannot read style file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

static RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<alias>[-A-Za-z0-9_.]+)\s*=\s*(?P<target>[-A-Za-z0-9_.]+)\s*(?:\[(?P<opts>[^\]]*)\])?\s*(?:#.*)?$",
    )
    .expect("style rule pattern is valid")
});

/// Block type and default options an alias is rendered as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub target: BlockType,
    pub options: OptionMap,
}

/// Aliases declared by one or more style files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    rules: BTreeMap<String, StyleRule>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the text of a style file
    pub fn parse(text: &str) -> Result<Self, StyleError> {
        let mut map = StyleMap::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line_no = index + 1;
            let caps = RULE.captures(line).ok_or_else(|| StyleError::Syntax {
                line: line_no,
                text: raw.to_string(),
            })?;

            let options = match caps.name("opts") {
                Some(opts) => parse_option_list(opts.as_str(), line_no, raw)?,
                None => OptionMap::new(),
            };
            map.insert(
                &caps["alias"],
                StyleRule {
                    target: BlockType::from(&caps["target"]),
                    options,
                },
            );
        }

        tracing::debug!(rules = map.len(), "parsed style rules");
        Ok(map)
    }

    /// Read and parse a style file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StyleError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| StyleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Load several style files; a later file overrides the rules of an earlier one
    pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<Self, StyleError> {
        let mut map = StyleMap::new();
        for path in paths {
            map.extend(Self::load(path)?);
        }
        Ok(map)
    }

    pub fn insert(&mut self, alias: impl Into<String>, rule: StyleRule) -> Option<StyleRule> {
        self.rules.insert(alias.into(), rule)
    }

    pub fn get(&self, alias: &str) -> Option<&StyleRule> {
        self.rules.get(alias)
    }

    /// Add every rule of `other`, replacing rules with the same alias
    pub fn extend(&mut self, other: StyleMap) {
        self.rules.extend(other.rules);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl BlockHook for StyleMap {
    fn apply(&self, mut block: Block) -> Block {
        let Some(rule) = self.rules.get(block.kind.as_str()) else {
            return block;
        };

        tracing::trace!(alias = %block.kind, target = %rule.target, "applied style");
        block.style = Some(block.kind.as_str().to_string());
        block.kind = rule.target.clone();
        block.options.merge_defaults(&rule.options);
        block
    }
}
