//! Observability: runtime counters and the sink they flow through.
//!
//! Structured logs go straight to `tracing`; this module only owns the
//! aggregate counters.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::EventReport;
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all};
