//! Named block indentation
//!
//! The body of a named block is indented under its header. [`IndentPolicy`] decides whether
//! that indentation is part of the content.

use crate::nsr::lexing::{indent_level, is_blank};
use serde::{Deserialize, Serialize};

/// What happens to the indentation of named block bodies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndentPolicy {
    /// Remove the indentation shared by every non-blank line, keep relative indentation
    #[default]
    StripCommon,
    /// Keep every line exactly as written
    Preserve,
}

impl IndentPolicy {
    /// Join body lines with `\n` according to the policy
    pub fn join(self, body: &[String]) -> String {
        match self {
            IndentPolicy::StripCommon => strip_common_indent(body).join("\n"),
            IndentPolicy::Preserve => body.join("\n"),
        }
    }
}

/// Remove the smallest indentation found among non-blank lines from every line
pub fn strip_common_indent(lines: &[String]) -> Vec<&str> {
    let common = lines
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| indent_level(l))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if is_blank(line) {
                ""
            } else {
                let start = line
                    .char_indices()
                    .nth(common)
                    .map_or(line.len(), |(i, _)| i);
                &line[start..]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_strip_common_keeps_relative_indentation() {
        let body = s(&["    with y:", "        pass", "", "    x = y + 1"]);
        assert_eq!(
            strip_common_indent(&body),
            vec!["with y:", "    pass", "", "x = y + 1"]
        );
    }

    #[test]
    fn test_blank_lines_do_not_count() {
        let body = s(&["", "      a", "   ", "    b"]);
        assert_eq!(strip_common_indent(&body), vec!["", "  a", "", "b"]);
    }

    #[test]
    fn test_unindented_line_keeps_everything() {
        let body = s(&["koder"]);
        assert_eq!(strip_common_indent(&body), vec!["koder"]);
    }

    #[test]
    fn test_policies() {
        let body = s(&["    x = 1", "    y = 2"]);
        assert_eq!(IndentPolicy::StripCommon.join(&body), "x = 1\ny = 2");
        assert_eq!(IndentPolicy::Preserve.join(&body), "    x = 1\n    y = 2");
    }
}
