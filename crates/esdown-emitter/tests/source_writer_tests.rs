use super::*;

fn writer() -> SourceWriter {
    SourceWriter::new("    ".to_string(), NewLineKind::LineFeed)
}

#[test]
fn test_indent_is_applied_lazily() {
    let mut w = writer();
    w.write("{");
    w.write_line();
    w.increase_indent();
    assert_eq!(w.position(), LineAndColumn::new(1, 4));
    w.write_line();
    w.write("x;");
    w.write_line();
    w.decrease_indent();
    w.write("}");
    assert_eq!(w.output(), "{\n\n    x;\n}");
}

#[test]
fn test_embedded_newlines_are_reindented() {
    let mut w = writer();
    w.increase_indent();
    w.write("/**\n* a\r\n*/");
    assert_eq!(w.output(), "    /**\n    * a\n    */");
    assert_eq!(w.line(), 2);
    assert_eq!(w.position(), LineAndColumn::new(2, 6));
}

#[test]
fn test_columns_count_utf16_units() {
    let mut w = writer();
    w.write("\"𝒳\"");
    assert_eq!(w.position().column, 4);
}

#[test]
fn test_crlf_new_lines() {
    let mut w = SourceWriter::new("  ".to_string(), NewLineKind::CarriageReturnLineFeed);
    w.write("a");
    w.write_line();
    w.ensure_line_start();
    w.write("b");
    assert_eq!(w.output(), "a\r\nb");
}
