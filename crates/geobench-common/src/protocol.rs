//! Probe stdout protocol
//!
//! Every probe writes exactly one line to stdout. Two encodings are accepted:
//!
//! - a JSON object tagged by `status`, e.g.
//!   `{"status":"ok","elapsed_ms":12,"contained":289,"points":1000}` or
//!   `{"status":"error","reason":"cannot read points file"}`
//! - a bare non-negative integer (elapsed milliseconds), which is what the
//!   C, Python and JavaScript probes print.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Typed report emitted by a probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeReport {
    /// The predicate loop ran to completion
    Ok {
        /// Elapsed time of the timed section, truncated to whole milliseconds
        elapsed_ms: u64,
        /// Number of points found inside the polygon set
        #[serde(default, skip_serializing_if = "Option::is_none")]
        contained: Option<u64>,
        /// Number of points tested
        #[serde(default, skip_serializing_if = "Option::is_none")]
        points: Option<u64>,
    },
    /// The probe could not run the benchmark
    Error { reason: String },
}

impl ProbeReport {
    /// Report carrying only a timing, as produced by plain-integer probes
    pub fn timing(elapsed_ms: u64) -> Self {
        ProbeReport::Ok {
            elapsed_ms,
            contained: None,
            points: None,
        }
    }

    /// Report carrying a timing plus the correctness counters
    pub fn measured(elapsed_ms: u64, contained: u64, points: u64) -> Self {
        ProbeReport::Ok {
            elapsed_ms,
            contained: Some(contained),
            points: Some(points),
        }
    }

    pub fn error(reason: impl Into<String>) -> Self {
        ProbeReport::Error {
            reason: reason.into(),
        }
    }

    /// Parse the captured stdout of a probe.
    ///
    /// Surrounding whitespace is ignored; anything other than a single
    /// non-empty line is rejected.
    pub fn parse(stdout: &str) -> Result<Self, ProtocolError> {
        let lines: Vec<&str> = stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let line = match lines.as_slice() {
            [] => return Err(ProtocolError::Empty),
            [line] => *line,
            _ => return Err(ProtocolError::MultiLine(lines.len())),
        };

        if line.starts_with('{') {
            return serde_json::from_str(line)
                .map_err(|e| ProtocolError::InvalidJson(e.to_string()));
        }

        // Digits only: `u64::from_str` would also take a leading `+`
        if !line.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ProtocolError::NotAnInteger(truncate(line, 40)));
        }

        line.parse::<u64>()
            .map(Self::timing)
            .map_err(|_| ProtocolError::NotAnInteger(truncate(line, 40)))
    }

    /// Serialize as a single protocol line (no trailing newline)
    pub fn to_line(&self) -> String {
        // Serializing a plain enum of strings and integers cannot fail
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{\"status\":\"error\"}"))
    }
}

/// Probe output that violates the protocol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("probe produced no output")]
    Empty,

    #[error("expected one line of output, got {0}")]
    MultiLine(usize),

    #[error("expected a non-negative integer, got '{0}'")]
    NotAnInteger(String),

    #[error("invalid JSON report: {0}")]
    InvalidJson(String),
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(ProbeReport::parse("42\n"), Ok(ProbeReport::timing(42)));
        assert_eq!(ProbeReport::parse("  0  "), Ok(ProbeReport::timing(0)));
        assert_eq!(ProbeReport::parse("\n\n7\n\n"), Ok(ProbeReport::timing(7)));
    }

    #[test]
    fn test_parse_json_report() {
        let report =
            ProbeReport::parse("{\"status\":\"ok\",\"elapsed_ms\":12,\"contained\":3,\"points\":10}\n")
                .unwrap();
        assert_eq!(report, ProbeReport::measured(12, 3, 10));

        let report = ProbeReport::parse("{\"status\":\"ok\",\"elapsed_ms\":5}").unwrap();
        assert_eq!(report, ProbeReport::timing(5));

        let report =
            ProbeReport::parse("{\"status\":\"error\",\"reason\":\"bad input\"}").unwrap();
        assert_eq!(report, ProbeReport::error("bad input"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(ProbeReport::parse(""), Err(ProtocolError::Empty));
        assert_eq!(ProbeReport::parse("   \n  "), Err(ProtocolError::Empty));
        assert_eq!(ProbeReport::parse("12\n13\n"), Err(ProtocolError::MultiLine(2)));
        assert!(matches!(
            ProbeReport::parse("-3"),
            Err(ProtocolError::NotAnInteger(_))
        ));
        assert!(matches!(
            ProbeReport::parse("+5"),
            Err(ProtocolError::NotAnInteger(_))
        ));
        assert!(matches!(
            ProbeReport::parse("1_000"),
            Err(ProtocolError::NotAnInteger(_))
        ));
        assert!(matches!(
            ProbeReport::parse("99999999999999999999999"),
            Err(ProtocolError::NotAnInteger(_))
        ));
        assert!(matches!(
            ProbeReport::parse("12.5"),
            Err(ProtocolError::NotAnInteger(_))
        ));
        assert!(matches!(
            ProbeReport::parse("Segmentation fault"),
            Err(ProtocolError::NotAnInteger(_))
        ));
        assert!(matches!(
            ProbeReport::parse("{\"status\":\"ok\",\"elapsed_ms\":-1}"),
            Err(ProtocolError::InvalidJson(_))
        ));
        assert!(matches!(
            ProbeReport::parse("{\"elapsed_ms\":1}"),
            Err(ProtocolError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_to_line_is_parseable() {
        let report = ProbeReport::measured(3, 1, 1);
        let line = report.to_line();
        assert!(!line.contains('\n'));
        assert_eq!(
            line,
            "{\"status\":\"ok\",\"elapsed_ms\":3,\"contained\":1,\"points\":1}"
        );

        let report = ProbeReport::error("missing file");
        assert_eq!(
            report.to_line(),
            "{\"status\":\"error\",\"reason\":\"missing file\"}"
        );
    }

    #[test]
    fn test_long_garbage_is_truncated() {
        let garbage = "x".repeat(100);
        match ProbeReport::parse(&garbage) {
            Err(ProtocolError::NotAnInteger(shown)) => assert_eq!(shown.chars().count(), 41),
            other => panic!("unexpected {:?}", other),
        }
    }
}
