//! Module definitions
//!
//! A module is a named CRUD unit: an ordered list of field descriptors plus
//! an optional relationship to another module. Definitions are values; they
//! only become visible to the rest of an application once registered in a
//! [`ModuleRegistry`](crate::registry::ModuleRegistry).

use crate::core::error::{ConfigurationError, FieldValidationError, ValidationError};
use crate::core::field::{FieldDescriptor, FieldSpec};
use crate::core::naming;
use crate::core::service::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// How a module relates to another module as a whole
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Relationship {
    #[default]
    None,
    /// Rows are nested under a parent module's detail view
    ///
    /// `parent_key` is the column holding the parent row's id
    /// (`customers` → `customer_id`).
    ManyToOne {
        parent_module: String,
        parent_key: String,
    },
    /// Rows pair this module with another one through a junction
    ManyToMany { other_module: String },
}

impl Relationship {
    /// The module this relationship points at, if any
    pub fn target(&self) -> Option<&str> {
        match self {
            Relationship::None => None,
            Relationship::ManyToOne { parent_module, .. } => Some(parent_module),
            Relationship::ManyToMany { other_module } => Some(other_module),
        }
    }

    /// Column holding the parent row's id, for many-to-one children
    pub fn parent_key(&self) -> Option<&str> {
        match self {
            Relationship::ManyToOne { parent_key, .. } => Some(parent_key),
            _ => None,
        }
    }
}

/// Relationship markers as declared next to a module's fields
///
/// At most one marker may be set; [`ModuleDefinition::with_relationship`]
/// rejects both at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RelationshipMarkers {
    #[serde(default)]
    pub many_to_one: Option<String>,
    #[serde(default)]
    pub many_to_many: Option<String>,
}

impl RelationshipMarkers {
    pub fn many_to_one(parent: impl Into<String>) -> Self {
        Self {
            many_to_one: Some(parent.into()),
            many_to_many: None,
        }
    }

    pub fn many_to_many(other: impl Into<String>) -> Self {
        Self {
            many_to_one: None,
            many_to_many: Some(other.into()),
        }
    }
}

/// Which generated view a field layout is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    List,
    Detail,
    Edit,
}

/// A named, field-described CRUD unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDefinition {
    name: String,
    record_label: String,
    fields: Vec<FieldDescriptor>,
    relationship: Relationship,
}

impl ModuleDefinition {
    /// Build a module without relationship markers
    pub fn new<I, F>(name: impl Into<String>, fields: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        Self::with_relationship(name, fields, RelationshipMarkers::default())
    }

    /// Build a module, normalizing every field spec
    pub fn with_relationship<I, F>(
        name: impl Into<String>,
        fields: I,
        markers: RelationshipMarkers,
    ) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigurationError::EmptyName { kind: "module" });
        }

        let relationship = match markers {
            RelationshipMarkers {
                many_to_one: Some(_),
                many_to_many: Some(_),
            } => return Err(ConfigurationError::ConflictingRelationship { module: name }),
            RelationshipMarkers {
                many_to_one: Some(parent_module),
                ..
            } => Relationship::ManyToOne {
                parent_key: format!("{}_id", naming::singularize(&parent_module)),
                parent_module,
            },
            RelationshipMarkers {
                many_to_many: Some(other_module),
                ..
            } => Relationship::ManyToMany { other_module },
            _ => Relationship::None,
        };

        let mut seen = HashSet::new();
        let mut descriptors = Vec::new();
        for spec in fields {
            let descriptor = FieldDescriptor::from_spec(spec.into())?;
            if !seen.insert(descriptor.name().to_string()) {
                return Err(ConfigurationError::DuplicateField {
                    module: name,
                    field: descriptor.name().to_string(),
                });
            }
            if relationship.parent_key() == Some(descriptor.name()) {
                return Err(ConfigurationError::ParentKeyCollision {
                    module: name,
                    field: descriptor.name().to_string(),
                });
            }
            descriptors.push(descriptor);
        }

        Ok(Self {
            record_label: naming::record_label(&name),
            name,
            fields: descriptors,
            relationship,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Singular label for one record (`companies` → `Company`)
    pub fn record_label(&self) -> &str {
        &self.record_label
    }

    /// All fields in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn relationship(&self) -> &Relationship {
        &self.relationship
    }

    /// Fields with a lookup target, in declaration order
    pub fn lookup_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.lookup().is_some())
    }

    /// Field layout for a generated view
    ///
    /// List and detail views show every field; edit forms drop fields
    /// marked `hidden_in_form`.
    pub fn fields_for(&self, view: View) -> Vec<&FieldDescriptor> {
        match view {
            View::List | View::Detail => self.fields.iter().collect(),
            View::Edit => self
                .fields
                .iter()
                .filter(|f| !f.is_hidden_in_form())
                .collect(),
        }
    }

    /// Column holding the parent row's id, for many-to-one children
    pub fn parent_key(&self) -> Option<&str> {
        self.relationship.parent_key()
    }

    /// Check a candidate row before it is handed to persistence
    ///
    /// Every field error is collected. Keys that name no field are
    /// rejected; missing keys are treated as null. Many-to-one children
    /// must carry their parent's id under [`parent_key`](Self::parent_key).
    pub fn validate_record(&self, record: &Record) -> Result<(), ValidationError> {
        let parent_key = self.parent_key();
        let mut errors: Vec<FieldValidationError> = record
            .keys()
            .filter(|key| !self.has_field(key) && parent_key != Some(key.as_str()))
            .map(|key| FieldValidationError::new(key.as_str(), "is not a field of this module"))
            .collect();

        if let Some(key) = parent_key {
            let parent_id = record.get(key).and_then(|v| v.as_str());
            match parent_id {
                None => errors.push(FieldValidationError::new(key, "is required")),
                Some(id) if Uuid::parse_str(id).is_err() => {
                    errors.push(FieldValidationError::new(key, "must be a record id"))
                }
                Some(_) => {}
            }
        }

        for field in &self.fields {
            let value = record.get(field.name()).unwrap_or(&serde_json::Value::Null);
            if let Err(message) = field.validate_value(value) {
                errors.push(FieldValidationError::new(field.name(), message));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors {
                module: self.name.clone(),
                errors,
            })
        }
    }
}
