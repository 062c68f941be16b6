//! Reconciliation of a discovered SCM hierarchy with Sonatype Lifecycle

pub mod cache;
pub mod context;
pub mod engine;
pub mod retry;
pub mod summary;

pub use cache::EntityCache;
pub use context::RunContext;
pub use engine::{Reconciler, Resolved, find_target_organization};
pub use retry::{CreateOutcome, retry_create};
pub use summary::{ImportRecord, ImportRow, ImportSummary, Resolution, ScanOutcome, ScmOutcome};
