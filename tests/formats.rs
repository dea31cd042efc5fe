//! Serializing parsed documents through the format registry

use nsr::nsr::formats::{FormatError, FormatRegistry};
use nsr::nsr::pipeline::parse_document;

const SOURCE: &str = "\
Title
=====

* a
* b

code[lang=c]:
    int x;

<--->
";

#[test]
fn test_json_output() {
    let blocks = parse_document(SOURCE).unwrap();
    let out = FormatRegistry::with_defaults()
        .serialize(&blocks, "json")
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"type": "text_h2", "start_line": 1, "data": "Title"},
            {"type": "list", "start_line": 4, "data": ["a", "b"]},
            {"type": "code", "start_line": 7, "options": {"lang": "c"}, "data": "int x;"},
            {"type": "cut", "start_line": 10, "data": null}
        ])
    );
}

#[test]
fn test_flag_options_serialize_as_true() {
    let blocks = parse_document("img[border, w=10]: cat.png\n").unwrap();
    let out = FormatRegistry::with_defaults()
        .serialize(&blocks, "json")
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value[0]["options"], serde_json::json!({"border": true, "w": "10"}));
}

#[test]
fn test_yaml_output() {
    let blocks = parse_document("code[lang=c]:\n    int x;\n").unwrap();
    let out = FormatRegistry::with_defaults()
        .serialize(&blocks, "yaml")
        .unwrap();

    insta::assert_snapshot!(out, @r"
    - type: code
      start_line: 1
      options:
        lang: c
      data: int x;
    ");
}

#[test]
fn test_treeviz_output() {
    let blocks = parse_document(SOURCE).unwrap();
    let out = FormatRegistry::with_defaults()
        .serialize(&blocks, "treeviz")
        .unwrap();

    insta::assert_snapshot!(out, @r"
    ⧉ 4 blocks
    ├─ § text_h2 Title
    ├─ ☰ list 2 items
    │ ├─ • a
    │ └─ • b
    ├─ 𝒱 code int x;
    └─ ✂ cut
    ");
}

#[test]
fn test_unknown_format() {
    let err = FormatRegistry::with_defaults()
        .serialize(&[], "html")
        .unwrap_err();
    assert_eq!(err, FormatError::FormatNotFound("html".to_string()));
    assert_eq!(err.to_string(), "Format 'html' not found");
}
