//! Observability: compile telemetry (counters) and the sink abstraction.
//!
//! Parsing and generation never touch metrics state directly; every
//! instrumentation point emits a `CompileEvent` through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::CompileReport;
pub use sink::{CompileEvent, CompileSink, metrics_report, metrics_reset_all};
