use anyhow::{Context, Result, bail};
use esdown_ast::NodeData;
use esdown_ast::validate::invalid_spans;
use esdown_common::diagnostics::diagnostic_codes;
use esdown_common::{Diagnostic, LineMap};
use esdown_emitter::{EmitError, EmitOptions, base_name, emit, output_file_name};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::args::CliArgs;
use super::config::{self, CONFIG_FILE_NAME, ResolvedOptions, UnitFilter};
use crate::unit::{CompilationUnit, UNIT_SUFFIX, is_unit_file};

/// What happened to one compilation unit.
#[derive(Debug)]
pub struct UnitOutcome {
    pub unit_path: PathBuf,
    /// Set once emission started; a failed unit may leave partial text here.
    pub output_path: Option<PathBuf>,
    /// Only written when emission succeeded.
    pub map_path: Option<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
    pub line_map: Option<LineMap>,
}

impl UnitOutcome {
    fn new(unit_path: &Path) -> Self {
        UnitOutcome {
            unit_path: unit_path.to_path_buf(),
            output_path: None,
            map_path: None,
            diagnostics: Vec::new(),
            line_map: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

#[derive(Debug, Default)]
pub struct BuildResult {
    /// In the order the units were discovered.
    pub outcomes: Vec<UnitOutcome>,
}

impl BuildResult {
    pub fn has_errors(&self) -> bool {
        self.outcomes.iter().any(|outcome| !outcome.succeeded())
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.succeeded())
            .count()
    }

    pub fn succeeded_count(&self) -> usize {
        self.outcomes.len() - self.failed_count()
    }

    /// `.js` and `.js.map` files of the units that succeeded.
    pub fn emitted_files(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.succeeded())
            .flat_map(|outcome| [outcome.output_path.as_deref(), outcome.map_path.as_deref()])
            .flatten()
            .collect()
    }
}

/// Resolve configuration, find the units and emit them.
///
/// `Err` means the run could not start (bad project file, missing input);
/// per-unit failures are reported through [`UnitOutcome::diagnostics`].
pub fn run(args: &CliArgs, cwd: &Path) -> Result<BuildResult> {
    let config_path = config::find_config(args.project.as_deref(), cwd)?;
    let (project, base_dir) = match &config_path {
        Some(path) => {
            debug!(config = %path.display(), "using project file");
            let base_dir = path
                .parent()
                .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
            (Some(config::load_config(path)?), base_dir)
        }
        None => (None, cwd.to_path_buf()),
    };
    let mut resolved = config::resolve_options(project.as_ref(), &base_dir)?;
    config::apply_cli_overrides(&mut resolved, args, cwd);

    let inputs: Vec<PathBuf> = if !args.inputs.is_empty() {
        args.inputs.iter().map(|input| cwd.join(input)).collect()
    } else if config_path.is_some() {
        vec![base_dir]
    } else {
        bail!("no inputs given and no {CONFIG_FILE_NAME} found");
    };

    let units = discover_units(&inputs, &resolved.filter)?;
    debug!(units = units.len(), "discovered units");
    Ok(emit_units(&units, &resolved))
}

/// Unit files named directly are always taken; directories are searched for
/// `*.unit.json` files accepted by `filter`.
pub fn discover_units(inputs: &[PathBuf], filter: &UnitFilter) -> Result<Vec<PathBuf>> {
    let mut units = Vec::new();
    for input in inputs {
        if input.is_file() {
            units.push(input.clone());
            continue;
        }
        if !input.is_dir() {
            bail!("input {} does not exist", input.display());
        }
        for entry in WalkDir::new(input).follow_links(true).sort_by_file_name() {
            let entry = entry.with_context(|| format!("failed to search {}", input.display()))?;
            let path = entry.path();
            if entry.file_type().is_file() && is_unit_file(path) && filter.accepts(path) {
                units.push(path.to_path_buf());
            }
        }
    }
    units.sort();
    units.dedup();
    Ok(units)
}

/// Units are loaded and given output paths first, so two units claiming the
/// same output file are both reported instead of racing on it.
pub fn emit_units(units: &[PathBuf], options: &ResolvedOptions) -> BuildResult {
    let root = options.out_dir.as_ref().and_then(|_| common_unit_dir(units));
    let mut prepared: Vec<PreparedUnit> = units
        .par_iter()
        .map(|path| prepare_unit(path, options.out_dir.as_deref(), root.as_deref()))
        .collect();

    let mut claims: FxHashMap<PathBuf, usize> = FxHashMap::default();
    for unit in &prepared {
        if let Some((_, output_path)) = &unit.unit {
            *claims.entry(output_path.clone()).or_default() += 1;
        }
    }
    for unit in &mut prepared {
        let conflict = unit
            .unit
            .as_ref()
            .is_some_and(|(_, output_path)| claims.get(output_path).is_some_and(|&n| n > 1));
        if conflict {
            unit.reject_conflict();
        }
    }

    let outcomes = prepared
        .into_par_iter()
        .map(|unit| finish_unit(unit, options))
        .collect();
    BuildResult { outcomes }
}

/// Emit a single unit, writing next to it or directly into `out_dir`.
pub fn emit_unit(path: &Path, options: &ResolvedOptions) -> UnitOutcome {
    finish_unit(prepare_unit(path, options.out_dir.as_deref(), None), options)
}

/// A loaded unit and the output file it will write.
struct PreparedUnit {
    outcome: UnitOutcome,
    unit: Option<(CompilationUnit, PathBuf)>,
}

impl PreparedUnit {
    fn reject_conflict(&mut self) {
        let Some((unit, output_path)) = self.unit.take() else {
            return;
        };
        warn!(output = %output_path.display(), "output path claimed by several units");
        self.outcome.diagnostics.push(Diagnostic::error(
            unit.file_name(),
            0,
            0,
            format!(
                "output {} is also written by another unit",
                output_path.display()
            ),
            diagnostic_codes::OUTPUT_PATH_CONFLICT,
        ));
    }
}

fn prepare_unit(path: &Path, out_dir: Option<&Path>, root: Option<&Path>) -> PreparedUnit {
    let mut outcome = UnitOutcome::new(path);
    let unit = match CompilationUnit::load(path) {
        Ok(unit) => unit,
        Err(err) => {
            outcome.diagnostics.push(Diagnostic::error(
                path.display().to_string(),
                0,
                0,
                format!("{err:#}"),
                diagnostic_codes::UNIT_LOAD_FAILED,
            ));
            return PreparedUnit {
                outcome,
                unit: None,
            };
        }
    };

    for issue in invalid_spans(&unit.script) {
        warn!(kind = %issue.kind, span = ?issue.span, problem = ?issue.problem, "invalid span");
    }
    if let NodeData::Script(script) = &unit.script.data {
        outcome.line_map = Some(script.line_map.clone());
    }
    let output_path = output_path_for(path, unit.file_name(), out_dir, root);
    PreparedUnit {
        outcome,
        unit: Some((unit, output_path)),
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(unit = %prepared.outcome.unit_path.display()))]
fn finish_unit(prepared: PreparedUnit, options: &ResolvedOptions) -> UnitOutcome {
    let PreparedUnit { mut outcome, unit } = prepared;
    let Some((unit, output_path)) = unit else {
        return outcome;
    };
    let file_name = unit.file_name().to_string();
    let map_path = options.source_map.then(|| map_path_for(&output_path));
    outcome.output_path = Some(output_path.clone());

    match write_unit(&unit, &output_path, map_path.as_deref(), &options.emit) {
        Ok(()) => outcome.map_path = map_path,
        Err(err) => {
            let diagnostic = match err.downcast_ref::<EmitError>() {
                Some(emit_error) => emit_error.to_diagnostic(&file_name),
                None => Diagnostic::error(
                    &file_name,
                    0,
                    0,
                    format!("{err:#}"),
                    diagnostic_codes::OUTPUT_WRITE_FAILED,
                ),
            };
            debug!(code = diagnostic.code, "unit failed");
            outcome.diagnostics.push(diagnostic);
        }
    }
    outcome
}

/// The text goes straight to its file so a failed emit still leaves its
/// partial output; the map is buffered and written only on success.
fn write_unit(
    unit: &CompilationUnit,
    output_path: &Path,
    map_path: Option<&Path>,
    options: &EmitOptions,
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file = File::create(output_path)
        .with_context(|| format!("failed to create {}", output_path.display()))?;
    let mut sink = BufWriter::new(file);
    let mut map = Vec::new();
    let map_sink = map_path.map(|_| &mut map as &mut dyn Write);

    let summary = emit(&unit.script, &unit.facts, options, &mut sink, map_sink)?;
    debug!(bytes = summary.output_len, lines = summary.line_count, "wrote unit");

    if let Some(map_path) = map_path {
        std::fs::write(map_path, &map)
            .with_context(|| format!("failed to write {}", map_path.display()))?;
    }
    Ok(())
}

/// `<unit dir>/<source base name>.js`, or the same under `out_dir` with the
/// unit's directory relative to `root` kept. Units whose script has no file
/// name are named after the unit file.
fn output_path_for(
    unit_path: &Path,
    file_name: &str,
    out_dir: Option<&Path>,
    root: Option<&Path>,
) -> PathBuf {
    let source_name = match base_name(file_name) {
        "" => unit_path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(UNIT_SUFFIX))
            .unwrap_or("out"),
        name => name,
    };
    let unit_dir = unit_path.parent().unwrap_or_else(|| Path::new(""));
    let dir = match out_dir {
        Some(out_dir) => match root.and_then(|root| unit_dir.strip_prefix(root).ok()) {
            Some(relative) => out_dir.join(relative),
            None => out_dir.to_path_buf(),
        },
        None => unit_dir.to_path_buf(),
    };
    dir.join(output_file_name(source_name))
}

/// Deepest directory containing every unit.
fn common_unit_dir(units: &[PathBuf]) -> Option<PathBuf> {
    let mut dirs = units.iter().filter_map(|unit| unit.parent());
    let mut common = dirs.next()?.to_path_buf();
    for dir in dirs {
        while !dir.starts_with(&common) {
            if !common.pop() {
                return None;
            }
        }
    }
    Some(common)
}

fn map_path_for(output_path: &Path) -> PathBuf {
    let mut name = output_path.as_os_str().to_owned();
    name.push(".map");
    PathBuf::from(name)
}

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod tests;
