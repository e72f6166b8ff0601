use clap::{Parser, ValueEnum};
use esdown_common::{ModuleKind, NewLineKind};
use std::path::PathBuf;

/// CLI arguments for the esdown binary.
#[derive(Parser, Debug)]
#[command(
    name = "esdown",
    version,
    about = "Lowers serialized TypeScript-style syntax trees to ES5 JavaScript"
)]
pub struct CliArgs {
    /// Compilation units (`*.unit.json`) or directories to search for them.
    pub inputs: Vec<PathBuf>,

    /// Path to esdown.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    // ==================== Output ====================
    /// Specify what code is generated for external modules.
    #[arg(short = 'm', long, value_enum, ignore_case = true)]
    pub module: Option<Module>,

    /// Write a `.js.map` file next to every emitted file.
    #[arg(long = "source-map", alias = "sourceMap")]
    pub source_map: bool,

    /// Directory for emitted files. Defaults to the directory of each unit.
    #[arg(long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// Line terminator used in emitted files.
    #[arg(long = "new-line", alias = "newLine", value_enum, ignore_case = true)]
    pub new_line: Option<NewLine>,

    /// Replace enum member accesses with their constant values.
    #[arg(long = "propagate-constants", alias = "propagateConstants")]
    pub propagate_constants: bool,

    /// Do not carry source comments into the output.
    #[arg(long = "no-comments", alias = "removeComments")]
    pub no_comments: bool,

    // ==================== Diagnostics ====================
    /// Colorize diagnostics. Defaults to on when stderr is a terminal.
    #[arg(long, value_name = "BOOL")]
    pub pretty: Option<bool>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Module {
    #[value(name = "commonjs", alias = "common-js")]
    CommonJs,
    Amd,
}

impl Module {
    pub fn to_module_kind(self) -> ModuleKind {
        match self {
            Module::CommonJs => ModuleKind::CommonJS,
            Module::Amd => ModuleKind::AMD,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum NewLine {
    Lf,
    Crlf,
}

impl NewLine {
    pub fn to_new_line_kind(self) -> NewLineKind {
        match self {
            NewLine::Lf => NewLineKind::LineFeed,
            NewLine::Crlf => NewLineKind::CarriageReturnLineFeed,
        }
    }
}
