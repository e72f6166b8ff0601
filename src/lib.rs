//! esdown: lowers serialized TypeScript-style syntax trees to ES5.
//!
//! The heavy lifting lives in the workspace crates; this package ties them
//! together for the `esdown` binary:
//! - [`unit`]: serialized compilation units (a tree plus its semantic facts)
//! - [`cli`]: argument parsing, `esdown.json` handling, the parallel driver
//!   and diagnostic rendering
//! - [`tracing_config`]: opt-in tracing subscriber setup

pub use esdown_ast as ast;
pub use esdown_binder as binder;
pub use esdown_common as common;
pub use esdown_emitter as emitter;

pub mod unit;
pub use unit::CompilationUnit;

pub mod tracing_config;

pub mod cli;
