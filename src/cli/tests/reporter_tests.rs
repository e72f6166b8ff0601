use esdown_common::{Diagnostic, LineMap};

use super::reporter::Reporter;

fn diagnostic(start: u32) -> Diagnostic {
    Diagnostic::error("app.ts", start, 1, "Cannot emit type-only node 'TypeReference'.", 9001)
}

#[test]
fn test_plain_rendering_with_position() {
    let reporter = Reporter::new(false);
    let line_map = LineMap::build("var a;\nT;\n");

    assert_eq!(
        reporter.format_diagnostic(&diagnostic(7), Some(&line_map)),
        "app.ts:2:1 - error ES9001: Cannot emit type-only node 'TypeReference'."
    );
}

#[test]
fn test_rendering_without_line_map_uses_file_name() {
    let reporter = Reporter::new(false);
    assert_eq!(
        reporter.format_diagnostic(&diagnostic(7), None),
        "app.ts - error ES9001: Cannot emit type-only node 'TypeReference'."
    );

    let anonymous = Diagnostic::error("", 0, 0, "boom", 0);
    assert_eq!(reporter.format_diagnostic(&anonymous, None), "<unknown> - error: boom");
}

#[test]
fn test_render_joins_lines() {
    let reporter = Reporter::new(false);
    let rendered = reporter.render(&[diagnostic(0), diagnostic(1)], None);
    assert_eq!(rendered.lines().count(), 2);
}

#[test]
fn test_colored_output_keeps_text() {
    colored::control::set_override(true);
    let reporter = Reporter::new(true);
    let rendered = reporter.format_diagnostic(&diagnostic(0), None);
    colored::control::unset_override();

    assert!(rendered.contains("\u{1b}["));
    assert!(rendered.contains("ES9001"));
    assert!(rendered.contains("Cannot emit type-only node"));
}

#[test]
fn test_summary() {
    let reporter = Reporter::new(false);
    assert_eq!(reporter.summary(1, 0), "Emitted 1 unit.");
    assert_eq!(reporter.summary(3, 0), "Emitted 3 units.");
    assert_eq!(reporter.summary(2, 1), "1 of 3 units failed.");
}
