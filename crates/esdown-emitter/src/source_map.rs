//! Nested source-map recording.
//!
//! While printing, every positioned node opens a [`MappingRecord`] when its
//! text starts and closes it when its text ends; records opened inside
//! become its children. The finished tree is flattened into segments (one for
//! each start and one for each end) and encoded as a v3 document.

use crate::error::EmitError;
use esdown_common::LineAndColumn;
use esdown_common::source_map::{Segment, SourceMap};
use indexmap::IndexSet;
use tracing::trace;

/// A node's generated extent correlated with its original extent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingRecord {
    pub emitted_start: LineAndColumn,
    pub emitted_end: LineAndColumn,
    pub original_start: LineAndColumn,
    pub original_end: LineAndColumn,
    /// Index into the name table of the declaration enclosing this node.
    pub name_index: Option<u32>,
    pub children: Vec<MappingRecord>,
}

#[derive(Debug, Default)]
pub struct SourceMapBuilder {
    names: IndexSet<String>,
    name_stack: Vec<u32>,
    roots: Vec<MappingRecord>,
    open: Vec<MappingRecord>,
}

impl SourceMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a named declaration. The recorded name is qualified by the
    /// enclosing declaration's name, e.g. `M.C.f`.
    pub fn push_name(&mut self, name: &str) {
        let qualified = match self.name_stack.last() {
            Some(&parent) if !name.is_empty() => match self.names.get_index(parent as usize) {
                Some(parent) => format!("{parent}.{name}"),
                None => name.to_string(),
            },
            _ => name.to_string(),
        };
        let (index, _) = self.names.insert_full(qualified);
        self.name_stack.push(index as u32);
    }

    pub fn pop_name(&mut self) {
        self.name_stack.pop();
    }

    pub fn start(
        &mut self,
        emitted: LineAndColumn,
        original_start: LineAndColumn,
        original_end: LineAndColumn,
    ) {
        self.open.push(MappingRecord {
            emitted_start: emitted,
            emitted_end: emitted,
            original_start,
            original_end,
            name_index: self.name_stack.last().copied(),
            children: Vec::new(),
        });
    }

    pub fn end(&mut self, emitted: LineAndColumn) -> Result<(), EmitError> {
        let Some(mut record) = self.open.pop() else {
            return Err(EmitError::UnbalancedSourceMap {
                detail: "mapping closed with none open".to_string(),
            });
        };
        record.emitted_end = emitted;
        match self.open.last_mut() {
            Some(parent) => parent.children.push(record),
            None => self.roots.push(record),
        }
        Ok(())
    }

    /// Completed top-level records.
    pub fn mappings(&self) -> &[MappingRecord] {
        &self.roots
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn finish(self, file: &str, source: &str, source_root: &str) -> Result<SourceMap, EmitError> {
        if !self.open.is_empty() {
            return Err(EmitError::UnbalancedSourceMap {
                detail: format!("{} mapping(s) still open", self.open.len()),
            });
        }
        let mut segments = Vec::new();
        for record in &self.roots {
            flatten(record, &mut segments);
        }
        trace!(segments = segments.len(), names = self.names.len(), "source map finished");
        let mut map = SourceMap::from_segments(file, source, self.names.into_iter().collect(), segments);
        map.source_root = source_root.to_string();
        Ok(map)
    }
}

fn flatten(record: &MappingRecord, out: &mut Vec<Segment>) {
    out.push(Segment {
        generated: record.emitted_start,
        original: record.original_start,
        name_index: record.name_index,
    });
    for child in &record.children {
        flatten(child, out);
    }
    out.push(Segment {
        generated: record.emitted_end,
        original: record.original_end,
        name_index: None,
    });
}
