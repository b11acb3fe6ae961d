//! Entity structs for Casebook records.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` and use
//! camelCase field names, matching the exported audit document.

mod audit;
mod case;

pub use audit::{Actor, AuditEntry};
pub use case::Case;
