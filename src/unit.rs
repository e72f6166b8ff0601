//! Serialized compilation units.
//!
//! A unit is what a front end hands to this backend: the `Script` tree of one
//! source file and the symbol table its binder produced, stored as
//! `{ "script": <Node>, "facts": <SymbolTable> }`.

use anyhow::{Context, Result, bail};
use esdown_ast::{Node, NodeData};
use esdown_binder::SymbolTable;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File suffix the driver searches directories for.
pub const UNIT_SUFFIX: &str = ".unit.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub script: Node,
    #[serde(default)]
    pub facts: SymbolTable,
}

impl CompilationUnit {
    pub fn new(script: Node, facts: SymbolTable) -> Self {
        CompilationUnit { script, facts }
    }

    /// Source file name recorded on the root `Script`.
    pub fn file_name(&self) -> &str {
        match &self.script.data {
            NodeData::Script(script) => &script.file_name,
            _ => "",
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let unit: CompilationUnit =
            serde_json::from_str(text).context("failed to parse compilation unit")?;
        if !matches!(unit.script.data, NodeData::Script(_)) {
            bail!(
                "compilation unit root must be a Script, found {}",
                unit.script.kind()
            );
        }
        Ok(unit)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("failed to serialize compilation unit")
    }
}

/// Whether `path` names a unit file.
pub fn is_unit_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(UNIT_SUFFIX) && name.len() > UNIT_SUFFIX.len())
}

#[cfg(test)]
#[path = "../tests/unit_tests.rs"]
mod tests;
