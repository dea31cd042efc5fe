//! Paragraphs, headings and cut markers
//!
//! Headings and cuts are written as plain paragraphs and only recognised once the paragraph
//! is complete, so these tests go through the whole pipeline.

use nsr::nsr::pipeline::parse_document;
use nsr::nsr::testing::assert_blocks;
use rstest::rstest;

const HEADINGS: &str = "
====
_h1_
====

_h2_
====

_h3_
----

_h4_
~~~~

    MyParax
yyyy

";

#[test]
fn test_heading_levels_and_paragraph() {
    let blocks = parse_document(HEADINGS).unwrap();

    assert_blocks(&blocks)
        .kinds(&["text_h1", "text_h2", "text_h3", "text_h4", "text"])
        .block(0, |b| {
            b.text("_h1_").start_line(2);
        })
        .block(1, |b| {
            b.text("_h2_").start_line(6);
        })
        .block(2, |b| {
            b.text("_h3_").start_line(9);
        })
        .block(3, |b| {
            b.text("_h4_").start_line(12);
        })
        .block(4, |b| {
            b.text("    MyParax\nyyyy").start_line(15);
        });
}

#[rstest]
#[case("====\nTitle\n====\n", "text_h1")]
#[case("Title\n=====\n", "text_h2")]
#[case("Title\n-----", "text_h3")]
#[case("Title\n~~~~~", "text_h4")]
fn test_heading_detection(#[case] source: &str, #[case] kind: &str) {
    let blocks = parse_document(source).unwrap();
    assert_blocks(&blocks).count(1).block(0, |b| {
        b.kind(kind).text("Title").start_line(1);
    });
}

#[test]
fn test_rule_of_wrong_length_is_a_paragraph() {
    let blocks = parse_document("Title\n---\n").unwrap();
    assert_blocks(&blocks).count(1).block(0, |b| {
        b.kind("text").text("Title\n---");
    });
}

#[test]
fn test_paragraphs_split_on_blank_lines() {
    let blocks = parse_document("first line\nsecond line\n\n\nthird\n").unwrap();
    assert_blocks(&blocks)
        .count(2)
        .block(0, |b| {
            b.kind("text").text("first line\nsecond line").start_line(1);
        })
        .block(1, |b| {
            b.kind("text").text("third").start_line(5);
        });
}

#[test]
fn test_indented_paragraph_lines_are_kept() {
    let blocks = parse_document("  indented start\nflush\n").unwrap();
    assert_blocks(&blocks).count(1).block(0, |b| {
        b.text("  indented start\nflush");
    });
}

#[test]
fn test_cut_marker() {
    let blocks = parse_document("Intro\n\n<--->\n\nMore\n").unwrap();
    assert_blocks(&blocks)
        .kinds(&["text", "cut", "text"])
        .block(1, |b| {
            b.empty().start_line(3);
        });
}

#[test]
fn test_comments_are_invisible() {
    let blocks = parse_document("## a comment\nvisible\n## another\nstill visible\n").unwrap();
    assert_blocks(&blocks).count(1).block(0, |b| {
        b.text("visible\nstill visible").start_line(2);
    });
}

#[test]
fn test_line_endings() {
    let unix = parse_document("Title\n=====\n\nText\n").unwrap();
    let windows = parse_document("Title\r\n=====\r\n\r\nText\r\n").unwrap();
    let classic = parse_document("Title\r=====\r\rText\r").unwrap();
    assert_eq!(unix, windows);
    assert_eq!(unix, classic);
}
