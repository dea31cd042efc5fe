//! Property-based tests for the parsing pipeline
//!
//! - paragraphs of plain words come out exactly as written, in order
//! - named block data survives being wrapped back under its header
//! - arbitrary input never panics and errors point at a real line

use nsr::nsr::block::{BlockData, BlockType};
use nsr::nsr::pipeline::{parse, parse_document};
use proptest::prelude::*;

/// A line of plain words: never a header, list item, rule or comment
fn word_line_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-z]{1,8}){0,3}"
}

fn paragraph_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word_line_strategy(), 1..4)
}

/// Block names that never collide with built-in types
fn block_name_strategy() -> impl Strategy<Value = String> {
    "blk[a-z_]{0,6}"
}

/// Body lines of a named block, relative to the block indentation.
/// Starts and ends with a non-blank line.
fn body_strategy() -> impl Strategy<Value = Vec<String>> {
    let inner = prop_oneof![
        3 => (0usize..3, word_line_strategy()).prop_map(|(depth, l)| format!("{}{l}", "  ".repeat(depth))),
        1 => Just(String::new()),
    ];
    (
        word_line_strategy(),
        prop::collection::vec(inner, 0..5),
        (0usize..3, word_line_strategy()),
    )
        .prop_map(|(first, mut middle, (depth, last))| {
            middle.insert(0, first);
            middle.push(format!("{}{last}", "  ".repeat(depth)));
            middle
        })
}

fn wrap(name: &str, body: &[String]) -> String {
    let mut out = format!("{name}:\n");
    for line in body {
        if !line.is_empty() {
            out.push_str("    ");
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn paragraphs_are_conserved(paragraphs in prop::collection::vec(paragraph_strategy(), 1..6)) {
            let source = paragraphs
                .iter()
                .map(|p| p.join("\n"))
                .collect::<Vec<_>>()
                .join("\n\n");

            let blocks = parse_document(&source).unwrap();

            prop_assert_eq!(blocks.len(), paragraphs.len());
            for (block, lines) in blocks.iter().zip(&paragraphs) {
                let expected = lines.join("\n");
                prop_assert_eq!(&block.kind, &BlockType::Paragraph);
                prop_assert_eq!(block.text(), Some(expected.as_str()));
            }
        }

        #[test]
        fn named_blocks_round_trip(name in block_name_strategy(), body in body_strategy()) {
            let blocks = parse_document(&wrap(&name, &body)).unwrap();

            prop_assert_eq!(blocks.len(), 1);
            prop_assert_eq!(&blocks[0].kind, &BlockType::Named(name.clone()));
            prop_assert_eq!(&blocks[0].data, &BlockData::Text(body.join("\n")));

            let lines: Vec<String> = body.join("\n").split('\n').map(str::to_string).collect();
            let again = parse_document(&wrap(&name, &lines)).unwrap();
            prop_assert_eq!(again, blocks);
        }

        #[test]
        fn arbitrary_input_never_panics(source in "[ a-z*:=~<>#,\\[\\]\\-\t\n]{0,200}") {
            let line_count = source.split(['\n']).count();
            for result in parse(&source) {
                if let Err(err) = result {
                    prop_assert!(err.line() >= 1 && err.line() <= line_count);
                }
            }
        }
    }
}
