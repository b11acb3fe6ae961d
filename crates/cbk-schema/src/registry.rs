//! Central schema registry for all Casebook record types.
//!
//! The `SchemaRegistry` builds JSON Schemas from cbk-core types at construction
//! time using [`schemars::schema_for!`] and provides validation via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Central store of all JSON Schemas in the Casebook system.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    /// Build a registry containing the record, action, export, and
    /// audit-detail schemas from cbk-core.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Records (2) ---
        register!(schemas, "case", cbk_core::entities::Case);
        register!(schemas, "audit_entry", cbk_core::entities::AuditEntry);

        // --- Action payload (1) ---
        register!(schemas, "action", cbk_core::action::Action);

        // --- Service documents (2) ---
        register!(schemas, "audit_export", cbk_core::responses::AuditExport);
        register!(schemas, "case_stats", cbk_core::responses::CaseStats);

        // --- Audit detail types (2) ---
        register!(
            schemas,
            "status_changed_detail",
            cbk_core::audit_detail::StatusChangedDetail
        );
        register!(
            schemas,
            "assigned_detail",
            cbk_core::audit_detail::AssignedDetail
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
