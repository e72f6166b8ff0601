//! Comment text helpers shared by the AST and the emitter.

/// Check if comment text is a doc comment: `/**` but not the empty `/**/`.
pub fn is_doc_comment_text(text: &str) -> bool {
    text.starts_with("/**") && !text.starts_with("/**/")
}

/// Re-indent the continuation lines of a block comment.
///
/// The first line is written at the current output column, so only the
/// following lines get their common source indentation replaced by `indent`.
pub fn reindent_block_comment(text: &str, indent: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() <= 1 {
        return text.to_string();
    }

    let common = lines[1..]
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let mut result = String::with_capacity(text.len() + indent.len() * lines.len());
    for (i, line) in lines.iter().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if i == 0 {
            result.push_str(line);
            continue;
        }
        result.push('\n');
        if line.trim().is_empty() {
            continue;
        }
        result.push_str(indent);
        result.push_str(&line[common.min(line.len())..]);
    }
    result
}
