//! Tests for doc-comment extraction.

use esdown_ast::Comment;
use esdown_ast::doc_comments::{clean_doc_comment, doc_comment_text, parameter_doc_comment_text};

#[test]
fn test_doc_comment_classification() {
    assert!(Comment::block("/** doc */").is_doc_comment());
    assert!(!Comment::block("/**/").is_doc_comment());
    assert!(!Comment::block("/* plain */").is_doc_comment());
    assert!(!Comment::line("/// triple slash").is_doc_comment());
}

#[test]
fn test_param_text_is_extracted_and_trimmed() {
    let comments = vec![Comment::block("/** desc\n * @param a the value\n */")];
    assert_eq!(parameter_doc_comment_text("a", &comments), "the value");
    assert_eq!(doc_comment_text(&comments), "desc");
}

#[test]
fn test_param_with_type_annotation() {
    let comments = vec![Comment::block(
        "/**\n * Sums.\n * @param {{ x: number }} point the point\n * @param b other\n */",
    )];
    assert_eq!(parameter_doc_comment_text("point", &comments), "the point");
    assert_eq!(parameter_doc_comment_text("b", &comments), "other");
    assert_eq!(parameter_doc_comment_text("c", &comments), "");
}

#[test]
fn test_param_name_must_match_whole_word() {
    let comments = vec![Comment::block("/**\n * @param ab first\n * @param a second\n */")];
    assert_eq!(parameter_doc_comment_text("a", &comments), "second");
}

#[test]
fn test_param_lookup_requires_block_comment() {
    let comments = vec![Comment::line("// @param a nope")];
    assert_eq!(parameter_doc_comment_text("a", &comments), "");
}

#[test]
fn test_multi_line_doc_text() {
    let comments = vec![Comment::block(
        "/**\n     * First line.\n     *   indented\n     * @param x ignored\n     * @returns kept\n     */",
    )];
    assert_eq!(
        doc_comment_text(&comments),
        "First line.\n  indented\n@returns kept"
    );
}

#[test]
fn test_non_doc_comments_are_skipped_when_joining() {
    let comments = vec![
        Comment::block("/* license */"),
        Comment::block("/** one */"),
        Comment::block("/** two */"),
    ];
    assert_eq!(doc_comment_text(&comments), "one\ntwo");
}

#[test]
fn test_clean_handles_crlf() {
    assert_eq!(clean_doc_comment("/**\r\n * a\r\n * b\r\n */", None), "a\nb");
}
