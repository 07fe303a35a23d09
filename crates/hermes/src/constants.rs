//! Runner-wide constants
//!
//! Defaults mirror the layout of the benchmark repository: probe sources in
//! `./src`, built probes in `./out`, datasets in `./data`.

// =============================================================================
// PATH DEFAULTS
// =============================================================================

/// Directory scanned for benchmark case files
pub const DEFAULT_CASES_DIR: &str = "./src";

/// Directory holding built probe executables and scripts
pub const DEFAULT_PROBE_DIR: &str = "./out";

/// Point feature collection handed to every probe
pub const DEFAULT_POINTS_PATH: &str = "./data/1000_random_points.geojson";

/// Polygon collection handed to every probe
pub const DEFAULT_POLYGON_PATH: &str = "./data/ne_110m_land.geojson";

// =============================================================================
// TABLE DEFAULTS
// =============================================================================

/// Width of every table column, borders excluded
pub const DEFAULT_COLUMN_WIDTH: usize = 20;

/// Narrowest column that still fits an `error: ...` sentinel
pub const MIN_COLUMN_WIDTH: usize = 8;

/// Header of the label column
pub const LABEL_HEADER: &str = "Benchmark (time required in ms)";

// =============================================================================
// EXECUTION
// =============================================================================

/// Maximum number of stderr characters kept for a failed probe
pub const STDERR_EXCERPT_CHARS: usize = 500;

// =============================================================================
// ENVIRONMENT VARIABLES
// =============================================================================

pub mod env_vars {
    pub const CASES_DIR: &str = "GEOBENCH_CASES_DIR";
    pub const PROBE_DIR: &str = "GEOBENCH_PROBE_DIR";
    pub const POINTS_PATH: &str = "GEOBENCH_POINTS_PATH";
    pub const POLYGON_PATH: &str = "GEOBENCH_POLYGON_PATH";
    pub const TARGETS_FILE: &str = "GEOBENCH_TARGETS_FILE";
    pub const PROBE_TIMEOUT_MS: &str = "GEOBENCH_PROBE_TIMEOUT_MS";
    pub const COLUMN_WIDTH: &str = "GEOBENCH_COLUMN_WIDTH";
}
