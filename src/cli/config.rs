//! `esdown.json` project files.
//!
//! ```json
//! {
//!     "extends": "./base",
//!     "compilerOptions": { "module": "amd", "sourceMap": true, "outDir": "out" },
//!     "include": ["units/**"],
//!     "exclude": ["units/legacy/**"]
//! }
//! ```
//!
//! Comments and trailing commas are accepted. Relative paths resolve against
//! the directory of the file that names them.

use anyhow::{Context, Result, anyhow, bail};
use esdown_common::{ModuleKind, NewLineKind};
use esdown_emitter::EmitOptions;
use globset::{Glob, GlobSet, GlobSetBuilder};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "esdown.json";

/// Accepts `true` as well as `"true"`, `"on"`, `"1"` and their negations.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub new_line: Option<String>,
    #[serde(default)]
    pub indent_size: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub source_map: Option<bool>,
    #[serde(default)]
    pub source_root: Option<String>,
    #[serde(default)]
    pub map_root: Option<String>,
    #[serde(default)]
    pub out_dir: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub propagate_enum_constants: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub remove_comments: Option<bool>,
}

/// Settings for one run after the project file and the command line are
/// combined.
#[derive(Debug, Clone, Default)]
pub struct ResolvedOptions {
    pub emit: EmitOptions,
    pub source_map: bool,
    pub out_dir: Option<PathBuf>,
    pub filter: UnitFilter,
}

/// `include` / `exclude` globs, matched against paths relative to the
/// project directory.
#[derive(Debug, Clone, Default)]
pub struct UnitFilter {
    base_dir: PathBuf,
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl UnitFilter {
    pub fn new(base_dir: &Path, include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(UnitFilter {
            base_dir: base_dir.to_path_buf(),
            include: build_glob_set(include)?,
            exclude: build_glob_set(exclude)?,
        })
    }

    pub fn accepts(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.base_dir).unwrap_or(path);
        let included = self
            .include
            .as_ref()
            .is_none_or(|set| set.is_match(relative));
        let excluded = self
            .exclude
            .as_ref()
            .is_some_and(|set| set.is_match(relative));
        included && !excluded
    }
}

fn build_glob_set(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).with_context(|| format!("invalid glob '{pattern}'"))?;
        builder.add(glob);
    }
    Ok(Some(builder.build()?))
}

pub fn parse_config(source: &str) -> Result<ProjectConfig> {
    let normalized = strip_jsonc(source);
    let config = serde_json::from_str(&normalized).context("failed to parse esdown.json")?;
    Ok(config)
}

/// Load `path`, following `extends` chains. Settings in the extending file
/// win; `include` / `exclude` are inherited only when not given.
pub fn load_config(path: &Path) -> Result<ProjectConfig> {
    let mut visited = FxHashSet::default();
    load_config_inner(path, &mut visited)
}

fn load_config_inner(path: &Path, visited: &mut FxHashSet<PathBuf>) -> Result<ProjectConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("esdown.json extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut config =
        parse_config(&source).with_context(|| format!("in {}", path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends)?;
        debug!(base = %base_path.display(), "extending project file");
        let base = load_config_inner(&base_path, visited)?;
        config = merge_configs(base, config);
    }

    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current_path
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent directory", current_path.display()))?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }
    Ok(if candidate.is_absolute() {
        candidate
    } else {
        base_dir.join(candidate)
    })
}

fn merge_configs(base: ProjectConfig, child: ProjectConfig) -> ProjectConfig {
    let compiler_options = match (base.compiler_options, child.compiler_options) {
        (Some(base), Some(child)) => Some(CompilerOptions {
            module: child.module.or(base.module),
            new_line: child.new_line.or(base.new_line),
            indent_size: child.indent_size.or(base.indent_size),
            source_map: child.source_map.or(base.source_map),
            source_root: child.source_root.or(base.source_root),
            map_root: child.map_root.or(base.map_root),
            out_dir: child.out_dir.or(base.out_dir),
            propagate_enum_constants: child
                .propagate_enum_constants
                .or(base.propagate_enum_constants),
            remove_comments: child.remove_comments.or(base.remove_comments),
        }),
        (base, child) => child.or(base),
    };
    ProjectConfig {
        extends: None,
        compiler_options,
        include: child.include.or(base.include),
        exclude: child.exclude.or(base.exclude),
    }
}

/// The project file named by `--project`, or `esdown.json` in `cwd` when
/// present.
pub fn find_config(project: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    let Some(project) = project else {
        let candidate = cwd.join(CONFIG_FILE_NAME);
        return Ok(candidate.is_file().then_some(candidate));
    };
    let path = cwd.join(project);
    if path.is_dir() {
        let candidate = path.join(CONFIG_FILE_NAME);
        if !candidate.is_file() {
            bail!("cannot find {CONFIG_FILE_NAME} in {}", path.display());
        }
        return Ok(Some(candidate));
    }
    if !path.is_file() {
        bail!("project file {} does not exist", path.display());
    }
    Ok(Some(path))
}

/// Turn a parsed project file into run settings. `base_dir` is the
/// directory holding the project file.
pub fn resolve_options(config: Option<&ProjectConfig>, base_dir: &Path) -> Result<ResolvedOptions> {
    let mut resolved = ResolvedOptions {
        filter: UnitFilter::new(base_dir, &[], &[])?,
        ..ResolvedOptions::default()
    };
    let Some(config) = config else {
        return Ok(resolved);
    };

    resolved.filter = UnitFilter::new(
        base_dir,
        config.include.as_deref().unwrap_or_default(),
        config.exclude.as_deref().unwrap_or_default(),
    )?;

    let Some(options) = config.compiler_options.as_ref() else {
        return Ok(resolved);
    };
    if let Some(module) = options.module.as_deref() {
        resolved.emit.module = parse_module_kind(module)?;
    }
    if let Some(new_line) = options.new_line.as_deref() {
        resolved.emit.new_line = parse_new_line(new_line)?;
    }
    if let Some(indent_size) = options.indent_size {
        resolved.emit.indent_size = indent_size;
    }
    if let Some(source_map) = options.source_map {
        resolved.source_map = source_map;
    }
    if let Some(source_root) = &options.source_root {
        resolved.emit.source_root = source_root.clone();
    }
    if let Some(map_root) = &options.map_root {
        resolved.emit.map_root = map_root.clone();
    }
    if let Some(out_dir) = options.out_dir.as_deref() {
        resolved.out_dir = Some(base_dir.join(out_dir));
    }
    if let Some(propagate) = options.propagate_enum_constants {
        resolved.emit.propagate_enum_constants = propagate;
    }
    if let Some(remove_comments) = options.remove_comments {
        resolved.emit.emit_comments = !remove_comments;
    }
    Ok(resolved)
}

/// Command-line flags win over the project file.
pub fn apply_cli_overrides(resolved: &mut ResolvedOptions, args: &CliArgs, cwd: &Path) {
    if let Some(module) = args.module {
        resolved.emit.module = module.to_module_kind();
    }
    if let Some(new_line) = args.new_line {
        resolved.emit.new_line = new_line.to_new_line_kind();
    }
    if let Some(out_dir) = args.out_dir.as_deref() {
        resolved.out_dir = Some(cwd.join(out_dir));
    }
    if args.source_map {
        resolved.source_map = true;
    }
    if args.propagate_constants {
        resolved.emit.propagate_enum_constants = true;
    }
    if args.no_comments {
        resolved.emit.emit_comments = false;
    }
}

pub fn parse_module_kind(value: &str) -> Result<ModuleKind> {
    Ok(match normalize_option(value).as_str() {
        "commonjs" => ModuleKind::CommonJS,
        "amd" => ModuleKind::AMD,
        _ => bail!("unsupported compilerOptions.module '{value}'"),
    })
}

pub fn parse_new_line(value: &str) -> Result<NewLineKind> {
    Ok(match normalize_option(value).as_str() {
        "lf" => NewLineKind::LineFeed,
        "crlf" => NewLineKind::CarriageReturnLineFeed,
        _ => bail!("unsupported compilerOptions.newLine '{value}'"),
    })
}

fn normalize_option(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !matches!(ch, '-' | '_') && !ch.is_whitespace())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Drop `//` and `/* */` comments and commas directly before `}` or `]`,
/// leaving string contents untouched.
fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for next in chars.by_ref() {
                    if previous == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    previous = next;
                }
            }
            _ => out.push(ch),
        }
    }

    remove_trailing_commas(&out)
}

fn remove_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escape = false;
    // Byte offset in `out` of a comma that may still turn out to be trailing.
    let mut pending_comma: Option<usize> = None;

    for ch in input.chars() {
        if in_string {
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            out.push(ch);
            continue;
        }
        match ch {
            ',' => {
                pending_comma = Some(out.len());
                out.push(ch);
                continue;
            }
            '}' | ']' => {
                if let Some(offset) = pending_comma {
                    out.remove(offset);
                }
            }
            '"' => in_string = true,
            _ => {}
        }
        if !ch.is_whitespace() {
            pending_comma = None;
        }
        out.push(ch);
    }

    out
}
