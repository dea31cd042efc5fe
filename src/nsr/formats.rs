//! Output formats for block streams
//!
//! This module contains the serializers used to print parsed documents:
//! - `json` and `yaml`: the block list through serde, one object per block
//! - `treeviz`: a one line per block view for eyeballing a parse

pub mod registry;
pub mod serde_formats;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serde_formats::{JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
