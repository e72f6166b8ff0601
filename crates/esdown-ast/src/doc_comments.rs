//! Doc-comment extraction.
//!
//! A doc comment is a block comment starting with `/**` (but not the empty
//! `/**/`). Its text is cleaned line by line: common indentation and one
//! leading `*` are stripped, and `@param` sections are left out of the
//! running text so they can be queried per parameter instead.

use crate::comment::Comment;

/// Cleaned text of every doc comment in `comments`, joined with `\n`.
pub fn doc_comment_text(comments: &[Comment]) -> String {
    let texts: Vec<&str> = comments
        .iter()
        .map(Comment::doc_comment_text)
        .filter(|text| !text.is_empty())
        .collect();
    texts.join("\n")
}

/// Text following `@param [{type}] name` for parameter `param`, cleaned and
/// trimmed. Empty when no such tag exists.
pub fn parameter_doc_comment_text(param: &str, comments: &[Comment]) -> String {
    match comments.first() {
        Some(first) if first.is_block => {}
        _ => return String::new(),
    }

    for comment in comments {
        let content = comment.content.as_str();
        let bytes = content.as_bytes();
        let mut search_from = 0;

        while let Some(found) = content[search_from..].find("@param") {
            let mut j = search_from + found + "@param".len();
            search_from = j;
            if !is_space_or_whitespace(bytes.get(j).copied()) {
                // `@paramfoo` is some other tag.
                continue;
            }

            j = consume_leading_space(content, j, None);

            if bytes.get(j) == Some(&b'{') {
                j += 1;
                let mut last = 0u8;
                let mut curlies = 1;
                while j < bytes.len() {
                    last = bytes[j];
                    if last == b'{' {
                        curlies += 1;
                    } else if last == b'}' {
                        curlies -= 1;
                        if curlies == 0 {
                            break;
                        }
                    } else if last == b'@' {
                        break;
                    }
                    j += 1;
                }

                if j == bytes.len() {
                    break;
                }
                if last == b'@' {
                    // Unterminated type; the next tag starts here.
                    search_from = j;
                    continue;
                }
                j = consume_leading_space(content, j + 1, None);
            }

            let name_end = j + param.len();
            if content.get(j..name_end) != Some(param)
                || !is_space_or_whitespace(bytes.get(name_end).copied())
            {
                search_from = search_from.max(j);
                continue;
            }

            let j = consume_leading_space(content, name_end, None);
            let help_end = content[j..].find('@').map_or(content.len(), |at| j + at);
            let help = &content[j..help_end];

            // Align continuation lines with the `*` column of the tag line.
            let line_start = content[..j].rfind('\n').map_or(0, |nl| nl + 1);
            let star = consume_leading_space(content, line_start, None);
            let spaces_to_remove = if star != j && bytes.get(star) == Some(&b'*') {
                Some(j - star - 1)
            } else {
                None
            };

            return clean_doc_comment(help, spaces_to_remove);
        }
    }

    String::new()
}

/// Strip `/**`, `*/`, per-line decoration and `@param` sections from a doc
/// comment body. `spaces_to_remove` caps the indentation removed after each
/// leading `*`; when absent it is learned from the first non-empty line.
pub fn clean_doc_comment(content: &str, mut spaces_to_remove: Option<usize>) -> String {
    let mut content = content.replacen("/**", "", 1);
    if content.ends_with("*/") {
        content.truncate(content.len() - 2);
    }

    let mut lines = Vec::new();
    let mut in_param_tag = false;

    for line in content.split('\n') {
        let Some(clean) = clean_doc_comment_line(line, true, spaces_to_remove) else {
            continue;
        };

        let mut text = String::new();
        let mut prev = clean.start;
        let mut search = clean.start;
        while let Some(found) = line[search..].find('@') {
            let at = search + found;
            if at >= clean.end {
                break;
            }
            let was_in_param_tag = in_param_tag;
            let is_param = line[at + 1..].starts_with("param")
                && is_space_or_whitespace(line.as_bytes().get(at + 6).copied());
            if is_param {
                if !was_in_param_tag {
                    text.push_str(&line[prev..at]);
                }
                prev = at;
                in_param_tag = true;
            } else if was_in_param_tag {
                prev = at;
                in_param_tag = false;
            }
            search = at + 1;
        }

        if !in_param_tag {
            text.push_str(&line[prev..clean.end]);
        }

        if clean_doc_comment_line(&text, false, None).is_some() {
            if spaces_to_remove.is_none() {
                spaces_to_remove = Some(clean.js_doc_spaces_removed);
            }
            lines.push(text);
        }
    }

    lines.join("\n")
}

struct CleanLine {
    start: usize,
    end: usize,
    js_doc_spaces_removed: usize,
}

fn clean_doc_comment_line(
    line: &str,
    js_doc_style: bool,
    js_doc_spaces_to_remove: Option<usize>,
) -> Option<CleanLine> {
    let mut non_space = consume_leading_space(line, 0, None);
    if non_space == line.len() {
        return None;
    }

    let mut js_doc_spaces_removed = non_space;
    if js_doc_style && line.as_bytes()[non_space] == b'*' {
        let after_star = non_space + 1;
        non_space = consume_leading_space(line, after_star, js_doc_spaces_to_remove);
        if js_doc_spaces_to_remove.is_none() {
            js_doc_spaces_removed = non_space - after_star;
        }
    }

    let end = if line.ends_with('\r') {
        line.len() - 1
    } else {
        line.len()
    };
    Some(CleanLine {
        start: non_space.min(end),
        end,
        js_doc_spaces_removed,
    })
}

/// Index of the first non-space, non-tab byte at or after `start`, looking
/// at no more than `max_spaces` bytes.
fn consume_leading_space(line: &str, start: usize, max_spaces: Option<usize>) -> usize {
    let bytes = line.as_bytes();
    let end = match max_spaces {
        Some(max) => (start + max).min(bytes.len()),
        None => bytes.len(),
    };
    (start..end)
        .find(|&i| bytes[i] != b' ' && bytes[i] != b'\t')
        .unwrap_or(end)
}

fn is_space_or_whitespace(byte: Option<u8>) -> bool {
    matches!(
        byte,
        Some(b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
    )
}
