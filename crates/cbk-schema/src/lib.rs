//! # cbk-schema
//!
//! JSON Schema generation, validation, and registry for Casebook.
//!
//! Record types are defined in `cbk-core` with `#[derive(JsonSchema)]`. This
//! crate collects them into a `SchemaRegistry` used to check workspace
//! snapshots on load and to print schemas from `cbk schema`.

pub mod error;
pub mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
