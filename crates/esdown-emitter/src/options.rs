//! Emitter configuration.

use esdown_common::{ModuleKind, NewLineKind};
use serde::{Deserialize, Serialize};

/// Options for a single emit pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmitOptions {
    /// Code generation target for external modules.
    pub module: ModuleKind,
    pub new_line: NewLineKind,
    /// Spaces per indentation level.
    pub indent_size: u32,
    /// Replace enum member accesses with known constants: `0 /* E.A */`.
    pub propagate_enum_constants: bool,
    /// Carry source comments into the output.
    pub emit_comments: bool,
    /// Written to the map's `sourceRoot` field.
    pub source_root: String,
    /// Prefix for the `sourceMappingURL` trailer. Empty means next to the output.
    pub map_root: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            module: ModuleKind::CommonJS,
            new_line: NewLineKind::LineFeed,
            indent_size: 4,
            propagate_enum_constants: false,
            emit_comments: true,
            source_root: String::new(),
            map_root: String::new(),
        }
    }
}

impl EmitOptions {
    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_size as usize)
    }
}

/// `a/b.ts` -> `a/b.js`; names without a `.ts` extension get `.js` appended.
pub fn output_file_name(source_file: &str) -> String {
    let stem = source_file
        .strip_suffix(".d.ts")
        .or_else(|| source_file.strip_suffix(".ts"))
        .unwrap_or(source_file);
    format!("{stem}.js")
}

/// File component of a slash or backslash separated path.
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
