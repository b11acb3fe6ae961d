//! # cbk-store
//!
//! State for a Casebook session: the case store, the append-only audit
//! recorder, the `CaseService` that drives transitions through both, and the
//! on-disk workspace that carries a session between CLI invocations.

pub mod audit;
pub mod error;
pub mod seed;
pub mod service;
pub mod store;
pub mod workspace;

pub use audit::{AuditFilter, AuditRecorder};
pub use error::StoreError;
pub use service::CaseService;
pub use store::{CaseFilter, CaseStore, queue_order};
pub use workspace::Workspace;
