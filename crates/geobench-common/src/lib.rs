//! Common types, errors, and the probe output protocol shared by the
//! GeoBench runner and its probes.

pub mod error;
pub mod protocol;
pub mod types;

pub use error::{AppError, AppResult};
pub use protocol::{ProbeReport, ProtocolError};
pub use types::*;
