//! Benchmark case discovery
//!
//! A case is named by the part of a file name before its first `.`, so
//! `contains.c`, `contains.py` and `contains.turf.mjs` all belong to the
//! `contains` case. Only regular files directly inside the cases directory
//! are considered. Entries are visited sorted by file name, which makes the
//! case order stable across platforms.

use std::collections::HashSet;
use std::path::PathBuf;

use geobench_common::{AppError, AppResult, CaseId};
use walkdir::WalkDir;

/// Enumerates benchmark cases from a directory
pub struct CaseDiscoverer {
    cases_dir: PathBuf,
}

impl CaseDiscoverer {
    pub fn new(cases_dir: impl Into<PathBuf>) -> Self {
        Self {
            cases_dir: cases_dir.into(),
        }
    }

    /// List the distinct cases in first-occurrence order
    pub fn discover(&self) -> AppResult<Vec<CaseId>> {
        let meta = std::fs::metadata(&self.cases_dir).map_err(|e| {
            AppError::Discovery(format!("cannot read {}: {}", self.cases_dir.display(), e))
        })?;
        if !meta.is_dir() {
            return Err(AppError::Discovery(format!(
                "{} is not a directory",
                self.cases_dir.display()
            )));
        }

        let mut seen = HashSet::new();
        let mut cases = Vec::new();

        let walker = WalkDir::new(&self.cases_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            // Only the directory itself is fatal; a dangling link is skipped
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", self.cases_dir.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                tracing::warn!("Skipping non UTF-8 file name: {:?}", entry.path());
                continue;
            };

            match CaseId::from_file_name(file_name) {
                Some(case) => {
                    if seen.insert(case.clone()) {
                        tracing::debug!("Discovered case '{}' from {}", case, file_name);
                        cases.push(case);
                    }
                }
                None => tracing::debug!("Ignoring {} (empty case name)", file_name),
            }
        }

        tracing::info!(
            "Discovered {} case(s) in {}",
            cases.len(),
            self.cases_dir.display()
        );

        Ok(cases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn names(cases: &[CaseId]) -> Vec<&str> {
        cases.iter().map(CaseId::as_str).collect()
    }

    #[test]
    fn test_discover_dedups_by_prefix() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "contains.c",
            "contains.mjs",
            "contains.py",
            "contains.rs",
            "contains.turf.mjs",
            "within.py",
        ] {
            touch(dir.path(), name);
        }

        let cases = CaseDiscoverer::new(dir.path()).discover().unwrap();
        assert_eq!(names(&cases), vec!["contains", "within"]);
    }

    #[test]
    fn test_discover_skips_empty_names_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), ".gitkeep");
        touch(dir.path(), ".env.local");
        touch(dir.path(), "intersects.c");
        fs::create_dir(dir.path().join("helpers")).unwrap();
        touch(&dir.path().join("helpers"), "nested.c");

        let cases = CaseDiscoverer::new(dir.path()).discover().unwrap();
        assert_eq!(names(&cases), vec!["intersects"]);
    }

    #[test]
    fn test_discover_order_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["within.c", "contains.c", "intersects.py", "contains.py"] {
            touch(dir.path(), name);
        }

        let cases = CaseDiscoverer::new(dir.path()).discover().unwrap();
        assert_eq!(names(&cases), vec!["contains", "intersects", "within"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_skips_dangling_symlink() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "contains.c");
        std::os::unix::fs::symlink(dir.path().join("gone.py"), dir.path().join("stale.py")).unwrap();

        let cases = CaseDiscoverer::new(dir.path()).discover().unwrap();
        assert_eq!(names(&cases), vec!["contains"]);
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cases = CaseDiscoverer::new(dir.path()).discover().unwrap();
        assert!(cases.is_empty());
    }

    #[test]
    fn test_discover_missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = CaseDiscoverer::new(&missing).discover().unwrap_err();
        assert_eq!(err.error_code(), "DISCOVERY_ERROR");

        let file = dir.path().join("file.c");
        touch(dir.path(), "file.c");
        assert!(CaseDiscoverer::new(&file).discover().is_err());
    }
}
