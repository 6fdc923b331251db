//! Typed error handling for workframe
//!
//! Every error in this module is raised synchronously while an application
//! declares its modules. They describe configuration mistakes, so the
//! intended reaction is to abort startup and print the diagnostic.
//!
//! # Error Categories
//!
//! - [`ConfigurationError`]: malformed field or module declaration
//! - [`RegistryError`]: registration and finalize failures (wraps the above)
//! - [`UnresolvedReferenceError`]: every broken cross-module reference found at finalize
//! - [`ValidationError`]: a candidate record does not fit its module's fields
//!
//! # Example
//!
//! ```rust
//! use workframe::prelude::*;
//!
//! let mut registry = ModuleRegistry::new();
//! let contacts = ModuleDefinition::new("contacts", vec![FieldSpec::from("email")]).unwrap();
//!
//! registry.register("/contacts", contacts.clone()).unwrap();
//! match registry.register("/contacts", contacts) {
//!     Err(RegistryError::DuplicatePath { path }) => assert_eq!(path, "/contacts"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// A field or module declaration that cannot be normalized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A field or module was declared with an empty name
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    /// `type` is outside the closed set of field types
    #[error("field '{field}' has unknown type '{type_name}'")]
    UnknownFieldType { field: String, type_name: String },

    /// `enum` was given without any values
    #[error("field '{field}' declares an empty enum")]
    EmptyEnum { field: String },

    /// `lookup` was given without `display`
    #[error("lookup field '{field}' targeting '{target}' has no display field")]
    LookupWithoutDisplay { field: String, target: String },

    /// `display` was given on a field that is not a lookup
    #[error("field '{field}' sets display '{display}' without a lookup target")]
    DisplayWithoutLookup { field: String, display: String },

    /// Both `required` and `optional` were set
    #[error("field '{field}' cannot be both required and optional")]
    ConflictingRequirement { field: String },

    /// `type` disagrees with `enum` / `lookup`
    #[error("field '{field}' is inconsistent: {message}")]
    InconsistentField { field: String, message: String },

    /// `default` does not fit the field type
    #[error("field '{field}' has an invalid default: {message}")]
    InvalidDefault { field: String, message: String },

    /// Two fields of one module share a name
    #[error("module '{module}' declares field '{field}' more than once")]
    DuplicateField { module: String, field: String },

    /// Both `many_to_one` and `many_to_many` were supplied
    #[error("module '{module}' cannot be both many-to-one and many-to-many")]
    ConflictingRelationship { module: String },

    /// A declared field shadows the column holding a many-to-one parent's key
    #[error("module '{module}' declares field '{field}', which holds its parent's key")]
    ParentKeyCollision { module: String, field: String },
}

impl ConfigurationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigurationError::EmptyName { .. } => "EMPTY_NAME",
            ConfigurationError::UnknownFieldType { .. } => "UNKNOWN_FIELD_TYPE",
            ConfigurationError::EmptyEnum { .. } => "EMPTY_ENUM",
            ConfigurationError::LookupWithoutDisplay { .. } => "LOOKUP_WITHOUT_DISPLAY",
            ConfigurationError::DisplayWithoutLookup { .. } => "DISPLAY_WITHOUT_LOOKUP",
            ConfigurationError::ConflictingRequirement { .. } => "CONFLICTING_REQUIREMENT",
            ConfigurationError::InconsistentField { .. } => "INCONSISTENT_FIELD",
            ConfigurationError::InvalidDefault { .. } => "INVALID_DEFAULT",
            ConfigurationError::DuplicateField { .. } => "DUPLICATE_FIELD",
            ConfigurationError::ConflictingRelationship { .. } => "CONFLICTING_RELATIONSHIP",
            ConfigurationError::ParentKeyCollision { .. } => "PARENT_KEY_COLLISION",
        }
    }
}

// =============================================================================
// Unresolved References
// =============================================================================

/// What kind of declaration produced a reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceKind {
    /// A lookup field pointing at another module
    Lookup { field: String },
    /// A lookup field whose display field is missing on the target module
    DisplayField { field: String, display_field: String },
    /// A many-to-one parent
    ManyToOne,
    /// A many-to-many peer
    ManyToMany,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Lookup { field } => write!(f, "lookup field '{}'", field),
            ReferenceKind::DisplayField {
                field,
                display_field,
            } => write!(
                f,
                "display field '{}' of lookup field '{}'",
                display_field, field
            ),
            ReferenceKind::ManyToOne => write!(f, "many-to-one parent"),
            ReferenceKind::ManyToMany => write!(f, "many-to-many peer"),
        }
    }
}

/// One reference from `module` to `target` that did not resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedReference {
    pub module: String,
    pub target: String,
    #[serde(flatten)]
    pub kind: ReferenceKind,
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ReferenceKind::DisplayField { .. } => write!(
                f,
                "module '{}': {} does not exist on module '{}'",
                self.module, self.kind, self.target
            ),
            _ => write!(
                f,
                "module '{}': {} references unknown module '{}'",
                self.module, self.kind, self.target
            ),
        }
    }
}

/// Every unresolved reference found during one finalize pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", format_references(.references))]
pub struct UnresolvedReferenceError {
    pub references: Vec<UnresolvedReference>,
}

impl UnresolvedReferenceError {
    /// Whether any reference from `module` to `target` is listed
    pub fn mentions(&self, module: &str, target: &str) -> bool {
        self.references
            .iter()
            .any(|r| r.module == module && r.target == target)
    }
}

fn format_references(references: &[UnresolvedReference]) -> String {
    let mut message = format!("{} unresolved reference(s)", references.len());
    for reference in references {
        message.push_str(&format!("\n  - {}", reference));
    }
    message
}

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors raised while building or finalizing a [`ModuleRegistry`](crate::registry::ModuleRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Malformed declaration
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Mount path already taken
    #[error("a module is already mounted at '{path}'")]
    DuplicatePath { path: String },

    /// Module name already taken
    #[error("a module named '{name}' is already registered")]
    DuplicateName { name: String },

    /// Cross-module references that did not resolve at finalize
    #[error(transparent)]
    UnresolvedReferences(#[from] UnresolvedReferenceError),

    /// Registration attempted after finalize
    #[error("registry is finalized; cannot register module '{name}' at '{path}'")]
    RegistryClosed { path: String, name: String },
}

impl RegistryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RegistryError::Configuration(e) => e.error_code(),
            RegistryError::DuplicatePath { .. } => "DUPLICATE_PATH",
            RegistryError::DuplicateName { .. } => "DUPLICATE_NAME",
            RegistryError::UnresolvedReferences(_) => "UNRESOLVED_REFERENCE",
            RegistryError::RegistryClosed { .. } => "REGISTRY_CLOSED",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A record rejected by [`ModuleDefinition::validate_record`](crate::core::module::ModuleDefinition::validate_record)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Validation errors in '{module}': {}", format_field_errors(.errors))]
    FieldErrors {
        module: String,
        errors: Vec<FieldValidationError>,
    },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        "VALIDATION_ERROR"
    }

    /// The individual field errors
    pub fn field_errors(&self) -> &[FieldValidationError] {
        match self {
            ValidationError::FieldErrors { errors, .. } => errors,
        }
    }
}

fn format_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

// =============================================================================
// Tests
// =============================================================================
