//! Buyer discovery engine for sell-side M&A advisory.
//!
//! The engine scores candidate acquirers against a configurable weighted
//! rubric, evaluates boolean keyword queries over buyer text fields, applies
//! structured filters, and hardens ranked result sets into re-loadable saved
//! searches. HTTP and CLI surfaces live in the `dealscout-api` crate; this
//! crate owns the domain model and all matching semantics.

pub mod config;
pub mod discovery;
pub mod error;
pub mod telemetry;
