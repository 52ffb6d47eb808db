//! Observability for SuperGPT: subscriber setup and optional OpenTelemetry export.

pub mod tracing_setup;
