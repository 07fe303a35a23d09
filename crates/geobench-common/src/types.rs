//! Common types used across GeoBench binaries.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Identifier of a benchmark case, e.g. `contains`.
///
/// Derived from case file names: everything before the first `.`.
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaseId(String);

impl CaseId {
    /// Create a case id, rejecting empty names and names containing a `.`
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(AppError::InvalidCase("case name is empty".to_string()));
        }
        if name.contains('.') {
            return Err(AppError::InvalidCase(format!(
                "case name '{}' contains a '.'",
                name
            )));
        }
        Ok(Self(name))
    }

    /// Derive a case id from a file name.
    ///
    /// Returns `None` for names whose prefix before the first `.` is empty
    /// (dotfiles such as `.gitkeep`).
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let stem = file_name.split('.').next().unwrap_or_default();
        if stem.is_empty() {
            None
        } else {
            Some(Self(stem.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CaseId {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        Self::new(value)
    }
}

impl From<CaseId> for String {
    fn from(id: CaseId) -> Self {
        id.0
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two input datasets every probe receives, in argument order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    points: PathBuf,
    polygon: PathBuf,
}

impl DatasetPaths {
    pub fn new(points: impl Into<PathBuf>, polygon: impl Into<PathBuf>) -> Self {
        Self {
            points: points.into(),
            polygon: polygon.into(),
        }
    }

    /// Point feature collection
    pub fn points(&self) -> &Path {
        &self.points
    }

    /// Polygon or multipolygon collection
    pub fn polygon(&self) -> &Path {
        &self.polygon
    }
}
