//! Core module containing field descriptors, module definitions and errors

pub mod error;
pub mod field;
pub mod module;
pub mod naming;
pub mod service;

pub use error::{
    ConfigurationError, FieldValidationError, ReferenceKind, RegistryError, RegistryResult,
    UnresolvedReference, UnresolvedReferenceError, ValidationError,
};
pub use field::{FieldDescriptor, FieldFormat, FieldOptions, FieldSpec, FieldType, FieldValue};
pub use module::{ModuleDefinition, Relationship, RelationshipMarkers, View};
pub use service::{Assignment, JunctionService, Record, RecordService, StoredRecord};
