//! Cell outcomes and the result matrix

use geobench_common::{CaseId, ProbeReport, ProtocolError};

/// Why a single (case, target) cell has no timing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeFailure {
    /// Program missing, not executable, or otherwise unspawnable
    #[error("failed to spawn probe: {0}")]
    Spawn(String),

    /// Probe exited with a non-zero status
    #[error("probe exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    /// Probe was terminated by a signal
    #[error("probe killed by signal {0}")]
    Signaled(i32),

    /// Probe exceeded the configured timeout
    #[error("probe timed out after {0} ms")]
    TimedOut(u64),

    /// Probe stdout violated the protocol
    #[error("malformed probe output: {0}")]
    Malformed(#[from] ProtocolError),

    /// Probe reported its own failure
    #[error("probe reported an error: {0}")]
    Reported(String),
}

impl ProbeFailure {
    /// Short sentinel shown in the table cell
    pub fn sentinel(&self) -> String {
        match self {
            ProbeFailure::Spawn(_) => "error: spawn".to_string(),
            ProbeFailure::NonZeroExit { code, .. } => format!("error: exit {}", code),
            ProbeFailure::Signaled(signal) => format!("error: signal {}", signal),
            ProbeFailure::TimedOut(_) => "error: timeout".to_string(),
            ProbeFailure::Malformed(_) => "error: malformed".to_string(),
            ProbeFailure::Reported(reason) => format!("error: {}", reason),
        }
    }

    /// Short code for logs
    pub fn code(&self) -> &'static str {
        match self {
            ProbeFailure::Spawn(_) => "SPAWN",
            ProbeFailure::NonZeroExit { .. } => "EXIT",
            ProbeFailure::Signaled(_) => "SIGNAL",
            ProbeFailure::TimedOut(_) => "TIMEOUT",
            ProbeFailure::Malformed(_) => "MALFORMED",
            ProbeFailure::Reported(_) => "REPORTED",
        }
    }
}

/// Result of one probe invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellOutcome {
    /// Probe reported a timing
    Timing {
        elapsed_ms: u64,
        contained: Option<u64>,
        points: Option<u64>,
    },
    /// Probe could not produce a timing
    Failed(ProbeFailure),
}

impl CellOutcome {
    /// Classify captured stdout of a successfully exited probe
    pub fn from_stdout(stdout: &str) -> Self {
        match ProbeReport::parse(stdout) {
            Ok(ProbeReport::Ok {
                elapsed_ms,
                contained,
                points,
            }) => CellOutcome::Timing {
                elapsed_ms,
                contained,
                points,
            },
            Ok(ProbeReport::Error { reason }) => CellOutcome::Failed(ProbeFailure::Reported(reason)),
            Err(e) => CellOutcome::Failed(ProbeFailure::Malformed(e)),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CellOutcome::Failed(_))
    }

    /// Text shown in the table cell
    pub fn cell_text(&self) -> String {
        match self {
            CellOutcome::Timing { elapsed_ms, .. } => elapsed_ms.to_string(),
            CellOutcome::Failed(failure) => failure.sentinel(),
        }
    }
}

impl From<ProbeFailure> for CellOutcome {
    fn from(failure: ProbeFailure) -> Self {
        CellOutcome::Failed(failure)
    }
}

/// One table row: a case and its outcome per target
#[derive(Debug, Clone)]
pub struct CaseRow {
    pub case: CaseId,
    pub cells: Vec<CellOutcome>,
}

/// Outcomes of a full run, rows in case order, cells in target order
#[derive(Debug, Clone)]
pub struct ResultMatrix {
    targets: Vec<String>,
    rows: Vec<CaseRow>,
}

impl ResultMatrix {
    pub fn new(targets: Vec<String>) -> Self {
        Self {
            targets,
            rows: Vec::new(),
        }
    }

    /// Append a row; the row must have one cell per target
    pub fn push_row(&mut self, row: CaseRow) {
        debug_assert_eq!(row.cells.len(), self.targets.len());
        self.rows.push(row);
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn rows(&self) -> &[CaseRow] {
        &self.rows
    }

    /// Number of cells that did not produce a timing
    pub fn failure_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.is_failure())
            .count()
    }

    /// Failed cells as (case, target, failure)
    pub fn failures(&self) -> impl Iterator<Item = (&CaseId, &str, &ProbeFailure)> {
        self.rows.iter().flat_map(move |row| {
            row.cells
                .iter()
                .zip(self.targets.iter())
                .filter_map(move |(cell, target)| match cell {
                    CellOutcome::Failed(failure) => Some((&row.case, target.as_str(), failure)),
                    CellOutcome::Timing { .. } => None,
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stdout() {
        assert_eq!(
            CellOutcome::from_stdout("17\n"),
            CellOutcome::Timing {
                elapsed_ms: 17,
                contained: None,
                points: None
            }
        );
        assert_eq!(
            CellOutcome::from_stdout("{\"status\":\"ok\",\"elapsed_ms\":4,\"contained\":1,\"points\":1}"),
            CellOutcome::Timing {
                elapsed_ms: 4,
                contained: Some(1),
                points: Some(1)
            }
        );
        assert_eq!(
            CellOutcome::from_stdout("{\"status\":\"error\",\"reason\":\"no data\"}"),
            CellOutcome::Failed(ProbeFailure::Reported("no data".to_string()))
        );
        assert_eq!(
            CellOutcome::from_stdout(""),
            CellOutcome::Failed(ProbeFailure::Malformed(ProtocolError::Empty))
        );
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(ProbeFailure::Spawn("nope".into()).sentinel(), "error: spawn");
        assert_eq!(
            ProbeFailure::NonZeroExit {
                code: 2,
                stderr: String::new()
            }
            .sentinel(),
            "error: exit 2"
        );
        assert_eq!(ProbeFailure::TimedOut(100).sentinel(), "error: timeout");
        assert_eq!(
            ProbeFailure::Malformed(ProtocolError::MultiLine(3)).sentinel(),
            "error: malformed"
        );
        assert_eq!(ProbeFailure::Signaled(9).sentinel(), "error: signal 9");
    }

    #[test]
    fn test_matrix_failures() {
        let mut matrix = ResultMatrix::new(vec!["A".into(), "B".into()]);
        matrix.push_row(CaseRow {
            case: CaseId::new("contains").unwrap(),
            cells: vec![
                CellOutcome::from_stdout("3"),
                ProbeFailure::TimedOut(10).into(),
            ],
        });
        matrix.push_row(CaseRow {
            case: CaseId::new("within").unwrap(),
            cells: vec![CellOutcome::from_stdout("1"), CellOutcome::from_stdout("2")],
        });

        assert_eq!(matrix.failure_count(), 1);
        let failures: Vec<_> = matrix.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0.as_str(), "contains");
        assert_eq!(failures[0].1, "B");
        assert_eq!(failures[0].2, &ProbeFailure::TimedOut(10));
    }
}
