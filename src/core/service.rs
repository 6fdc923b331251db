//! Persistence collaborator traits
//!
//! The registry never stores rows. Whatever persistence layer backs an
//! application implements these traits; the registry only tells it which
//! modules exist and what their fields look like.

use crate::core::module::ModuleDefinition;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Column values of one row, keyed by field name
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A persisted row with its opaque primary key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: Uuid,
    pub values: Record,
}

/// Row storage for module data
///
/// Implementations provide CRUD operations for any registered module,
/// addressed by module name. Column types follow each field's type.
#[async_trait]
pub trait RecordService: Send + Sync {
    /// Insert a new row and return it with its generated key
    async fn create(&self, module: &str, values: Record) -> Result<StoredRecord>;

    /// Get a row by key
    async fn get(&self, module: &str, id: &Uuid) -> Result<Option<StoredRecord>>;

    /// List every row of a module
    async fn list(&self, module: &str) -> Result<Vec<StoredRecord>>;

    /// Replace the values of an existing row
    async fn update(&self, module: &str, id: &Uuid, values: Record) -> Result<StoredRecord>;

    /// Delete a row
    async fn delete(&self, module: &str, id: &Uuid) -> Result<()>;

    /// Rows of `module` whose `field` holds `parent_id`
    ///
    /// Backs nested child views. The default implementation filters
    /// [`list`](RecordService::list).
    async fn list_children(
        &self,
        module: &str,
        field: &str,
        parent_id: &Uuid,
    ) -> Result<Vec<StoredRecord>> {
        let wanted = parent_id.to_string();
        Ok(self
            .list(module)
            .await?
            .into_iter()
            .filter(|row| row.values.get(field).and_then(|v| v.as_str()) == Some(wanted.as_str()))
            .collect())
    }
}

/// One assigned pair in a many-to-many junction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub left_id: Uuid,
    pub right_id: Uuid,
}

/// Pair management for many-to-many junction modules
#[async_trait]
pub trait JunctionService: Send + Sync {
    /// Assign a pair; assigning an existing pair is a no-op
    async fn assign(&self, junction: &str, left_id: &Uuid, right_id: &Uuid) -> Result<()>;

    /// Remove a pair
    async fn unassign(&self, junction: &str, left_id: &Uuid, right_id: &Uuid) -> Result<()>;

    /// Every pair assigned in a junction
    async fn list_assignments(&self, junction: &str) -> Result<Vec<Assignment>>;
}

/// Validate `values` against `module` and create the row
pub async fn create_validated(
    service: &dyn RecordService,
    module: &ModuleDefinition,
    values: Record,
) -> Result<StoredRecord> {
    module.validate_record(&values)?;
    service.create(module.name(), values).await
}

/// Validate `values` against `module` and update the row
pub async fn update_validated(
    service: &dyn RecordService,
    module: &ModuleDefinition,
    id: &Uuid,
    values: Record,
) -> Result<StoredRecord> {
    module.validate_record(&values)?;
    service.update(module.name(), id, values).await
}
