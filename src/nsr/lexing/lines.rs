//! Physical lines
//!
//! Splits source text into numbered physical lines and provides the whitespace helpers the
//! classifier works with. Every line ending convention is accepted (`\n`, `\r\n` and a bare
//! `\r`); a final line terminator does not start an extra empty line.

use std::borrow::Cow;

/// Default number of spaces a tab expands to
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Iterator over `(line_number, line)` pairs, line numbers starting at 1
#[derive(Debug, Clone)]
pub struct PhysicalLines<'a> {
    rest: &'a str,
    line: usize,
}

impl<'a> PhysicalLines<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            rest: source,
            line: 0,
        }
    }
}

impl<'a> Iterator for PhysicalLines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        self.line += 1;

        match self.rest.find(['\n', '\r']) {
            Some(end) => {
                let text = &self.rest[..end];
                let after = &self.rest[end..];
                let terminator = if after.starts_with("\r\n") { 2 } else { 1 };
                self.rest = &after[terminator..];
                Some((self.line, text))
            }
            None => {
                let text = self.rest;
                self.rest = "";
                Some((self.line, text))
            }
        }
    }
}

/// Replace every tab with `width` spaces
pub fn expand_tabs(line: &str, width: usize) -> Cow<'_, str> {
    if line.contains('\t') {
        Cow::Owned(line.replace('\t', &" ".repeat(width)))
    } else {
        Cow::Borrowed(line)
    }
}

/// Number of leading whitespace characters
pub fn indent_level(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Whether the line holds nothing but whitespace
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(source: &str) -> Vec<(usize, &str)> {
        PhysicalLines::new(source).collect()
    }

    #[test]
    fn test_unix_line_endings() {
        assert_eq!(collect("a\nb\n"), vec![(1, "a"), (2, "b")]);
    }

    #[test]
    fn test_missing_final_newline() {
        assert_eq!(collect("a\nb"), vec![(1, "a"), (2, "b")]);
    }

    #[test]
    fn test_windows_and_mac_line_endings() {
        assert_eq!(collect("a\r\nb\rc"), vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn test_blank_lines_are_kept() {
        assert_eq!(collect("a\n\n\nb"), vec![(1, "a"), (2, ""), (3, ""), (4, "b")]);
    }

    #[test]
    fn test_empty_source() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("\tx = 1", 4), "    x = 1");
        assert_eq!(expand_tabs("a\tb", 2), "a  b");
        assert!(matches!(expand_tabs("no tabs", 4), Cow::Borrowed(_)));
    }

    #[test]
    fn test_indent_level() {
        assert_eq!(indent_level("    x"), 4);
        assert_eq!(indent_level("x  "), 0);
        assert_eq!(indent_level("   "), 3);
    }
}
