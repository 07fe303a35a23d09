//! Benchmark runner - drives every (case, target) probe in turn

use geobench_common::{CaseId, DatasetPaths};

use crate::executor::ProbeExecutor;
use crate::outcome::{CaseRow, CellOutcome, ResultMatrix};
use crate::targets::{Target, TargetRegistry};

/// Runs the case x target matrix, one probe at a time
pub struct BenchmarkRunner<E> {
    executor: E,
    targets: TargetRegistry,
    datasets: DatasetPaths,
}

impl<E: ProbeExecutor> BenchmarkRunner<E> {
    /// Create a new benchmark runner
    pub fn new(executor: E, targets: TargetRegistry, datasets: DatasetPaths) -> Self {
        Self {
            executor,
            targets,
            datasets,
        }
    }

    /// Run every target for every case, case-major.
    ///
    /// Each probe is awaited before the next one is spawned so that probes
    /// never compete for the machine. A failing cell is recorded and the run
    /// moves on.
    pub async fn run(&self, cases: &[CaseId]) -> ResultMatrix {
        let mut matrix = ResultMatrix::new(self.targets.names());

        tracing::info!(
            "Running {} case(s) against {} target(s)",
            cases.len(),
            self.targets.len()
        );

        for case in cases {
            let mut cells = Vec::with_capacity(self.targets.len());
            for target in self.targets.targets() {
                cells.push(self.run_cell(case, target).await);
            }
            matrix.push_row(CaseRow {
                case: case.clone(),
                cells,
            });
        }

        matrix
    }

    /// Run a single probe and classify its outcome
    async fn run_cell(&self, case: &CaseId, target: &Target) -> CellOutcome {
        let command = self.targets.command_for(target, case, &self.datasets);
        tracing::debug!("[{} / {}] $ {}", case, target.name, command);

        let outcome = match self.executor.execute(&command).await {
            Ok(output) => {
                if !output.stderr.trim().is_empty() {
                    tracing::debug!("[{} / {}] stderr: {}", case, target.name, output.stderr.trim());
                }
                CellOutcome::from_stdout(&output.stdout)
            }
            Err(failure) => CellOutcome::Failed(failure),
        };

        match &outcome {
            CellOutcome::Timing {
                elapsed_ms,
                contained,
                points,
            } => {
                tracing::info!("[{} / {}] {} ms", case, target.name, elapsed_ms);
                if let (Some(contained), Some(points)) = (contained, points) {
                    tracing::debug!(
                        "[{} / {}] {} of {} points contained",
                        case,
                        target.name,
                        contained,
                        points
                    );
                }
            }
            CellOutcome::Failed(failure) => {
                tracing::warn!(
                    "[{} / {}] {} ({})",
                    case,
                    target.name,
                    failure,
                    failure.code()
                );
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{MockProbeExecutor, ProbeOutput};
    use crate::outcome::ProbeFailure;
    use mockall::Sequence;

    fn registry() -> TargetRegistry {
        TargetRegistry::new(
            "out",
            vec![
                Target::new("C", "{probe_dir}/{case}.outc {points} {polygon}").unwrap(),
                Target::new("Rust", "{probe_dir}/{case}.outrs {points} {polygon}").unwrap(),
            ],
        )
        .unwrap()
    }

    fn datasets() -> DatasetPaths {
        DatasetPaths::new("pts.geojson", "poly.geojson")
    }

    fn cases(names: &[&str]) -> Vec<CaseId> {
        names.iter().map(|n| CaseId::new(*n).unwrap()).collect()
    }

    fn ok(stdout: &str) -> Result<ProbeOutput, ProbeFailure> {
        Ok(ProbeOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    #[tokio::test]
    async fn test_runs_case_major_in_order() {
        let mut executor = MockProbeExecutor::new();
        let mut seq = Sequence::new();

        for expected in [
            "out/contains.outc pts.geojson poly.geojson",
            "out/contains.outrs pts.geojson poly.geojson",
            "out/within.outc pts.geojson poly.geojson",
            "out/within.outrs pts.geojson poly.geojson",
        ] {
            executor
                .expect_execute()
                .withf(move |cmd| cmd.to_string() == expected)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| ok("5\n"));
        }

        let runner = BenchmarkRunner::new(executor, registry(), datasets());
        let matrix = runner.run(&cases(&["contains", "within"])).await;

        assert_eq!(matrix.rows().len(), 2);
        assert_eq!(matrix.targets(), &["C".to_string(), "Rust".to_string()]);
        for row in matrix.rows() {
            assert_eq!(row.cells.len(), 2);
            assert!(row.cells.iter().all(|c| c.cell_text() == "5"));
        }
        assert_eq!(matrix.failure_count(), 0);
    }

    #[tokio::test]
    async fn test_failures_are_isolated_per_cell() {
        let mut executor = MockProbeExecutor::new();
        executor.expect_execute().times(4).returning(|cmd| {
            if cmd.program.ends_with(".outc") {
                Err(ProbeFailure::Spawn("No such file or directory".to_string()))
            } else if cmd.program.contains("within") {
                ok("Traceback (most recent call last):\n  oops\n")
            } else {
                ok("{\"status\":\"ok\",\"elapsed_ms\":12,\"contained\":1,\"points\":1}\n")
            }
        });

        let runner = BenchmarkRunner::new(executor, registry(), datasets());
        let matrix = runner.run(&cases(&["contains", "within"])).await;

        let texts: Vec<Vec<String>> = matrix
            .rows()
            .iter()
            .map(|row| row.cells.iter().map(CellOutcome::cell_text).collect())
            .collect();
        assert_eq!(
            texts,
            vec![
                vec!["error: spawn".to_string(), "12".to_string()],
                vec!["error: spawn".to_string(), "error: malformed".to_string()],
            ]
        );
        assert_eq!(matrix.failure_count(), 3);
    }

    #[tokio::test]
    async fn test_no_cases_runs_nothing() {
        let mut executor = MockProbeExecutor::new();
        executor.expect_execute().never();

        let runner = BenchmarkRunner::new(executor, registry(), datasets());
        let matrix = runner.run(&[]).await;
        assert!(matrix.rows().is_empty());
        assert_eq!(matrix.targets().len(), 2);
    }
}
