//! Target registry
//!
//! A target is one geometry library in one runtime, identified by a display
//! name and a command template. Templates are split on whitespace into a
//! program and its arguments; each token may reference the placeholders
//! `{case}`, `{points}`, `{polygon}` and `{probe_dir}`. Substitution happens
//! per token, so a dataset path containing spaces stays a single argument.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use geobench_common::{AppError, AppResult, CaseId, DatasetPaths};
use serde::Deserialize;

/// Placeholder names recognised inside command templates
pub const PLACEHOLDERS: [&str; 4] = ["case", "points", "polygon", "probe_dir"];

/// Parsed command template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    raw: String,
    tokens: Vec<String>,
}

impl CommandTemplate {
    /// Parse and validate a template string
    pub fn parse(raw: &str) -> AppResult<Self> {
        let tokens: Vec<String> = raw.split_whitespace().map(String::from).collect();
        if tokens.is_empty() {
            return Err(AppError::Template("command template is empty".to_string()));
        }

        for token in &tokens {
            expand(token, |name| {
                PLACEHOLDERS.iter().any(|p| *p == name).then(String::new)
            })
            .map_err(|e| AppError::Template(format!("{} in '{}'", e, raw)))?;
        }

        Ok(Self {
            raw: raw.to_string(),
            tokens,
        })
    }

    /// The template as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Render an invocable command for one case
    pub fn render(&self, case: &CaseId, datasets: &DatasetPaths, probe_dir: &Path) -> ProbeCommand {
        let resolve = |name: &str| -> Option<String> {
            match name {
                "case" => Some(case.as_str().to_string()),
                "points" => Some(datasets.points().to_string_lossy().into_owned()),
                "polygon" => Some(datasets.polygon().to_string_lossy().into_owned()),
                "probe_dir" => Some(probe_dir.to_string_lossy().into_owned()),
                _ => None,
            }
        };

        // Tokens were validated by `parse`, so expansion only fails on a
        // template built by hand; keep such tokens verbatim.
        let mut rendered = self
            .tokens
            .iter()
            .map(|token| expand(token, &resolve).unwrap_or_else(|_| token.clone()));

        let program = rendered.next().unwrap_or_default();
        ProbeCommand {
            program,
            args: rendered.collect(),
        }
    }
}

/// Placeholder syntax problems found while expanding a token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
enum TemplateSyntax {
    #[error("unknown placeholder '{{{0}}}'")]
    Unknown(String),

    #[error("unclosed '{{'")]
    Unclosed,
}

/// Expand `{name}` placeholders in one token in a single left-to-right pass.
///
/// Substituted values are never re-scanned.
fn expand(
    token: &str,
    resolve: impl Fn(&str) -> Option<String>,
) -> Result<String, TemplateSyntax> {
    let mut out = String::with_capacity(token.len());
    let mut rest = token;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or(TemplateSyntax::Unclosed)?;
        let name = &after[..close];
        let value = resolve(name).ok_or_else(|| TemplateSyntax::Unknown(name.to_string()))?;
        out.push_str(&value);
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

/// A fully rendered probe invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl std::fmt::Display for ProbeCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(s: &str) -> String {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        format!("'{}'", s.replace('\'', "'\\''"))
    } else {
        s.to_string()
    }
}

/// One benchmark target: a column of the result table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub command: CommandTemplate,
}

impl Target {
    pub fn new(name: impl Into<String>, command: &str) -> AppResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::Configuration("target name is empty".to_string()));
        }
        Ok(Self {
            name,
            command: CommandTemplate::parse(command)?,
        })
    }
}

/// Target entry as written in a targets file
#[derive(Debug, Deserialize)]
struct TargetSpec {
    name: String,
    command: String,
}

/// Ordered, fixed list of targets for one run
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    probe_dir: PathBuf,
    targets: Vec<Target>,
}

impl TargetRegistry {
    /// Create a registry, rejecting empty lists and duplicate names
    pub fn new(probe_dir: impl Into<PathBuf>, targets: Vec<Target>) -> AppResult<Self> {
        if targets.is_empty() {
            return Err(AppError::Configuration("no benchmark targets configured".to_string()));
        }

        let mut seen = HashSet::new();
        for target in &targets {
            if !seen.insert(target.name.as_str()) {
                return Err(AppError::Configuration(format!(
                    "duplicate target name '{}'",
                    target.name
                )));
            }
        }

        Ok(Self {
            probe_dir: probe_dir.into(),
            targets,
        })
    }

    /// The five library bindings compared by the benchmark
    pub fn defaults(probe_dir: impl Into<PathBuf>) -> AppResult<Self> {
        let targets = vec![
            Target::new("GEOS-WASM (JS)", "bun {probe_dir}/{case}.mjs {points} {polygon}")?,
            Target::new("Shapely (Py)", "python {probe_dir}/{case}.py {points} {polygon}")?,
            Target::new("GEOS (C)", "{probe_dir}/{case}.outc {points} {polygon}")?,
            Target::new("Turf.js (JS)", "node {probe_dir}/{case}.turf.mjs {points} {polygon}")?,
            Target::new("Geo (Rust)", "{probe_dir}/{case}.outrs {points} {polygon}")?,
        ];
        Self::new(probe_dir, targets)
    }

    /// Load targets from a JSON array of `{"name": ..., "command": ...}`
    pub fn from_json(probe_dir: impl Into<PathBuf>, json: &str) -> AppResult<Self> {
        let specs: Vec<TargetSpec> = serde_json::from_str(json)?;
        let targets = specs
            .into_iter()
            .map(|entry| Target::new(entry.name, &entry.command))
            .collect::<AppResult<Vec<_>>>()?;
        Self::new(probe_dir, targets)
    }

    /// Load targets from a JSON file on disk
    pub fn from_file(probe_dir: impl Into<PathBuf>, path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!("cannot read targets file {}: {}", path.display(), e))
        })?;
        Self::from_json(probe_dir, &json)
    }

    pub fn probe_dir(&self) -> &Path {
        &self.probe_dir
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Column names in registry order
    pub fn names(&self) -> Vec<String> {
        self.targets.iter().map(|t| t.name.clone()).collect()
    }

    /// Render the command of `target` for `case`
    pub fn command_for(&self, target: &Target, case: &CaseId, datasets: &DatasetPaths) -> ProbeCommand {
        target.command.render(case, datasets, &self.probe_dir)
    }
}
