//! ES5 code generation for esdown trees.
//!
//! This crate provides:
//! - [`emit`]: print one compilation unit to a text sink, with an optional
//!   source-map sink
//! - [`emit_to_string`]: the same, collected in memory
//! - The printer itself ([`Emitter`]), its options and its error type
//! - Nested source-map recording ([`SourceMapBuilder`])
//!
//! Semantic questions (which symbol a name resolves to, whether it is
//! exported, which declaration contains it) are answered through
//! [`esdown_binder::SemanticFacts`].

pub mod error;
pub use error::EmitError;

pub mod options;
pub use options::{EmitOptions, base_name, output_file_name};

pub mod source_writer;
pub use source_writer::SourceWriter;

pub mod source_map;
pub use source_map::{MappingRecord, SourceMapBuilder};

pub mod emitter;
pub use emitter::Emitter;

pub use esdown_common::source_map::SourceMap;

use esdown_ast::{Node, NodeData};
use esdown_binder::SemanticFacts;
use std::io::Write;
use tracing::{debug, warn};

/// What a successful [`emit`] produced.
#[derive(Clone, Debug)]
pub struct EmitSummary {
    /// Bytes of text written to the sink.
    pub output_len: usize,
    pub line_count: u32,
    pub source_map: Option<SourceMap>,
    /// The nested mapping tree the source map was flattened from.
    pub mappings: Vec<MappingRecord>,
}

/// In-memory result of [`emit_to_string`].
#[derive(Clone, Debug)]
pub struct EmitOutput {
    pub text: String,
    pub source_map: Option<String>,
    pub summary: EmitSummary,
}

/// Print `root` as ES5 to `sink`. When `source_map_sink` is given, a v3
/// source map is written there and a `sourceMappingURL` trailer is appended
/// to the text.
///
/// Both sinks are written and flushed once, whether or not emission
/// succeeded; a failed emission still leaves its partial text in `sink`.
#[tracing::instrument(level = "debug", skip_all, fields(file = %unit_file_name(root)))]
pub fn emit(
    root: &Node,
    facts: &dyn SemanticFacts,
    options: &EmitOptions,
    sink: &mut dyn Write,
    source_map_sink: Option<&mut dyn Write>,
) -> Result<EmitSummary, EmitError> {
    let file_name = unit_file_name(root);
    let line_map = match &root.data {
        NodeData::Script(script) => Some(&script.line_map),
        _ => None,
    };
    let mut emitter = Emitter::new(facts, options, line_map, source_map_sink.is_some());
    let emitted = emitter.emit_root(root);

    let output_name = output_file_name(file_name);
    if emitted.is_ok() && emitter.source_map.is_some() {
        emitter.ensure_line_start();
        emitter.write(&source_mapping_url(options, &output_name));
        emitter.write_line();
    }
    let line_count = emitter.writer.line();
    let (text, builder) = emitter.finish();

    let mut mappings = Vec::new();
    let mut source_map = None;
    let mut map_json = None;
    let result = emitted.and_then(|()| {
        if let Some(builder) = builder {
            mappings = builder.mappings().to_vec();
            let map = builder.finish(base_name(&output_name), file_name, &options.source_root)?;
            map_json = Some(map.to_json()?);
            source_map = Some(map);
        }
        Ok(())
    });

    let written = write_outputs(sink, source_map_sink, &text, map_json.as_deref());
    match (result, written) {
        (Err(err), Err(io)) => {
            warn!(error = %io, "failed to write partial output");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
        (Ok(()), Err(io)) => Err(io.into()),
        (Ok(()), Ok(())) => {
            debug!(bytes = text.len(), lines = line_count, "emitted unit");
            Ok(EmitSummary {
                output_len: text.len(),
                line_count,
                source_map,
                mappings,
            })
        }
    }
}

/// [`emit`] into memory.
pub fn emit_to_string(
    root: &Node,
    facts: &dyn SemanticFacts,
    options: &EmitOptions,
    with_source_map: bool,
) -> Result<EmitOutput, EmitError> {
    let mut text = Vec::new();
    let mut map = Vec::new();
    let map_sink = with_source_map.then_some(&mut map as &mut dyn Write);
    let summary = emit(root, facts, options, &mut text, map_sink)?;
    Ok(EmitOutput {
        text: String::from_utf8_lossy(&text).into_owned(),
        source_map: with_source_map.then(|| String::from_utf8_lossy(&map).into_owned()),
        summary,
    })
}

fn unit_file_name(root: &Node) -> &str {
    match &root.data {
        NodeData::Script(script) => &script.file_name,
        _ => "",
    }
}

/// `//# sourceMappingURL=out.js.map`, prefixed with the map root when set.
fn source_mapping_url(options: &EmitOptions, output_name: &str) -> String {
    let map_name = format!("{}.map", base_name(output_name));
    let root = options.map_root.trim_end_matches(['/', '\\']);
    if root.is_empty() {
        format!("//# sourceMappingURL={map_name}")
    } else {
        format!("//# sourceMappingURL={root}/{map_name}")
    }
}

fn write_outputs(
    sink: &mut dyn Write,
    source_map_sink: Option<&mut dyn Write>,
    text: &str,
    map_json: Option<&str>,
) -> std::io::Result<()> {
    let text_result = sink.write_all(text.as_bytes()).and_then(|()| sink.flush());
    let map_result = match source_map_sink {
        Some(map_sink) => map_json
            .map_or(Ok(()), |json| map_sink.write_all(json.as_bytes()))
            .and_then(|()| map_sink.flush()),
        None => Ok(()),
    };
    text_result.and(map_result)
}
