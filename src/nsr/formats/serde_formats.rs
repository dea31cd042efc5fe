//! Serde backed formats
//!
//! Blocks serialize as `{"type", "start_line", "options"?, "style"?, "data"}` objects. Lists
//! carry an array of items as data and cuts carry `null`.

use super::registry::{FormatError, Formatter};
use crate::nsr::block::Block;

/// Pretty printed JSON array of blocks
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, blocks: &[Block]) -> Result<String, FormatError> {
        serde_json::to_string_pretty(blocks)
            .map_err(|err| FormatError::Serialization(err.to_string()))
    }

    fn description(&self) -> &str {
        "JSON array of blocks"
    }
}

/// YAML sequence of blocks
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, blocks: &[Block]) -> Result<String, FormatError> {
        serde_yaml::to_string(blocks).map_err(|err| FormatError::Serialization(err.to_string()))
    }

    fn description(&self) -> &str {
        "YAML sequence of blocks"
    }
}
