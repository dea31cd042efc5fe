//! Block options
//!
//!     Options are the per-block settings written in brackets between a block's name and
//!     its colon:
//!
//!         python[linenos, start=10]:
//!             ...
//!
//!     Each comma-separated token is either `key=value` or a bare flag. Whitespace around
//!     tokens, keys and values is ignored and a value wrapped in double quotes loses its
//!     quotes. Empty tokens are skipped. Keys are unique per block.

use crate::nsr::error::{Error, Result};
use serde::Serialize;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// The value half of an option: either an explicit value or a bare flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Flag(bool),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            OptionValue::Flag(_) => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Text(s) => write!(f, "{s}"),
            OptionValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Options attached to a block, sorted by key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionMap(BTreeMap<String, OptionValue>);

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    /// Text value of `key`, if it was given as `key=value`
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_str)
    }

    /// Whether `key` was given as a bare flag
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some(OptionValue::Flag(true)))
    }

    /// Insert an option, returning the previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: OptionValue) -> Option<OptionValue> {
        self.0.insert(key.into(), value)
    }

    /// Fill in every key from `defaults` that this map does not set itself
    pub fn merge_defaults(&mut self, defaults: &OptionMap) {
        for (key, value) in defaults.iter() {
            self.0
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, OptionValue> {
        self.0.iter()
    }
}

impl fmt::Display for OptionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            match value {
                OptionValue::Flag(true) => write!(f, "{key}")?,
                other => write!(f, "{key}={other}")?,
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a OptionMap {
    type Item = (&'a String, &'a OptionValue);
    type IntoIter = btree_map::Iter<'a, String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parse the contents of a bracketed option list (without the brackets).
///
/// `line` and `raw_line` are only used to locate a duplicate-key error.
pub fn parse_option_list(contents: &str, line: usize, raw_line: &str) -> Result<OptionMap> {
    let mut options = OptionMap::new();

    for token in contents.split(',').map(str::trim) {
        if token.is_empty() {
            continue;
        }

        let (key, value) = match token.split_once('=') {
            Some((key, value)) => (key.trim(), OptionValue::Text(unquote(value.trim()))),
            None => (token, OptionValue::Flag(true)),
        };

        if options.insert(key, value).is_some() {
            return Err(Error::duplicate_option(key, line, raw_line));
        }
    }

    Ok(options)
}

fn unquote(value: &str) -> String {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
        .to_string()
}
