//! Source Map documents (revision 3).
//!
//! The emitter records nested mapping records while it prints; when the pass
//! finishes they are flattened into `Segment`s and encoded here as the
//! base64-VLQ `mappings` string of a v3 source map.

use crate::position::LineAndColumn;
use serde::{Deserialize, Serialize};

/// Base64 VLQ encoding as used by the `mappings` field.
pub mod vlq {
    const BASE64_CHARS: &[u8; 64] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    const VLQ_BASE_SHIFT: u32 = 5;
    const VLQ_BASE: i64 = 1 << VLQ_BASE_SHIFT;
    const VLQ_BASE_MASK: i64 = VLQ_BASE - 1;
    const VLQ_CONTINUATION_BIT: i64 = VLQ_BASE;

    /// Append the VLQ encoding of `value` to `out`.
    pub fn encode(value: i64, out: &mut String) {
        let mut vlq = if value < 0 {
            ((-value) << 1) | 1
        } else {
            value << 1
        };
        loop {
            let mut digit = vlq & VLQ_BASE_MASK;
            vlq >>= VLQ_BASE_SHIFT;
            if vlq > 0 {
                digit |= VLQ_CONTINUATION_BIT;
            }
            out.push(BASE64_CHARS[digit as usize] as char);
            if vlq == 0 {
                break;
            }
        }
    }

    fn base64_value(ch: u8) -> Option<i64> {
        match ch {
            b'A'..=b'Z' => Some((ch - b'A') as i64),
            b'a'..=b'z' => Some((ch - b'a') as i64 + 26),
            b'0'..=b'9' => Some((ch - b'0') as i64 + 52),
            b'+' => Some(62),
            b'/' => Some(63),
            _ => None,
        }
    }

    /// Decode one value from the front of `text`.
    /// Returns the value and the number of bytes consumed.
    pub fn decode(text: &str) -> Option<(i64, usize)> {
        let mut result = 0i64;
        let mut shift = 0u32;
        for (i, &byte) in text.as_bytes().iter().enumerate() {
            let digit = base64_value(byte)?;
            result += (digit & VLQ_BASE_MASK) << shift;
            if digit & VLQ_CONTINUATION_BIT == 0 {
                let negative = result & 1 == 1;
                let magnitude = result >> 1;
                return Some((if negative { -magnitude } else { magnitude }, i + 1));
            }
            shift += VLQ_BASE_SHIFT;
        }
        None
    }
}

/// One flattened mapping point: a generated position correlated with an
/// original position and an optional name-table index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub generated: LineAndColumn,
    pub original: LineAndColumn,
    pub name_index: Option<u32>,
}

/// A v3 source map document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u32,
    pub file: String,
    pub source_root: String,
    pub sources: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    /// Build a document for a single source file. Segments are stably sorted
    /// by generated position before encoding.
    pub fn from_segments(
        file: impl Into<String>,
        source: impl Into<String>,
        names: Vec<String>,
        mut segments: Vec<Segment>,
    ) -> Self {
        segments.sort_by_key(|s| s.generated);
        SourceMap {
            version: 3,
            file: file.into(),
            source_root: String::new(),
            sources: vec![source.into()],
            names,
            mappings: encode_mappings(&segments),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Encode sorted segments into the `mappings` string. All segments refer to
/// source index 0.
pub fn encode_mappings(segments: &[Segment]) -> String {
    let mut out = String::new();
    let mut line = 0u32;
    let mut prev_generated_column = 0i64;
    let mut prev_original_line = 0i64;
    let mut prev_original_column = 0i64;
    let mut prev_name_index = 0i64;
    let mut first_in_line = true;

    for segment in segments {
        while line < segment.generated.line {
            out.push(';');
            line += 1;
            prev_generated_column = 0;
            first_in_line = true;
        }
        if !first_in_line {
            out.push(',');
        }
        first_in_line = false;

        let column = segment.generated.column as i64;
        vlq::encode(column - prev_generated_column, &mut out);
        prev_generated_column = column;

        // Single source: the source index delta is always zero.
        vlq::encode(0, &mut out);

        let original_line = segment.original.line as i64;
        vlq::encode(original_line - prev_original_line, &mut out);
        prev_original_line = original_line;

        let original_column = segment.original.column as i64;
        vlq::encode(original_column - prev_original_column, &mut out);
        prev_original_column = original_column;

        if let Some(name) = segment.name_index {
            let name = name as i64;
            vlq::encode(name - prev_name_index, &mut out);
            prev_name_index = name;
        }
    }

    out
}
