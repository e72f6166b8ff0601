//! Shared enums that several crates need without depending on each other.

use serde::{Deserialize, Serialize};

/// Module code generation target for dynamic (external) modules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// `exports.x = ...` with `require` calls, no wrapper.
    #[default]
    CommonJS,
    /// Asynchronous module definition: `define([...], function (...) { ... })`.
    AMD,
}

impl ModuleKind {
    pub fn is_amd(self) -> bool {
        matches!(self, ModuleKind::AMD)
    }
}

/// Line terminator written by the emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewLineKind {
    #[default]
    LineFeed,
    CarriageReturnLineFeed,
}

impl NewLineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NewLineKind::LineFeed => "\n",
            NewLineKind::CarriageReturnLineFeed => "\r\n",
        }
    }
}
