//! # Workframe
//!
//! A declarative CRUD module registry for schema-driven list/detail/edit
//! generators.
//!
//! ## Features
//!
//! - **Field Descriptors**: bare names or option sets, normalized into one typed descriptor
//! - **Module Definitions**: ordered fields plus many-to-one / many-to-many relationships
//! - **Module Registry**: mount paths and names mapped to shared definitions
//! - **Deferred Resolution**: references resolved at finalize, so registration order is free
//! - **Collect-All Diagnostics**: every broken reference reported in one pass
//! - **Presentation Views**: navigation, per-view field layouts and nested views
//! - **Manifests**: whole applications declared in YAML
//!
//! ## Quick Start
//!
//! ```rust
//! use workframe::prelude::*;
//!
//! let companies = ModuleDefinition::new(
//!     "companies",
//!     vec![
//!         FieldSpec::from(FieldOptions::new("name").required()),
//!         FieldSpec::from(FieldOptions::new("industry").enum_values(["Technology", "Finance"])),
//!     ],
//! )?;
//!
//! let contacts = ModuleDefinition::new(
//!     "contacts",
//!     vec![
//!         FieldSpec::from("first_name"),
//!         FieldSpec::from("email"),
//!         FieldSpec::from(FieldOptions::new("company").lookup("companies").display("name")),
//!     ],
//! )?;
//!
//! let mut registry = ModuleRegistry::new();
//! // Registration order does not matter; references are checked at finalize.
//! registry.register_with("/contacts", contacts, Navigation::new().icon("bi-people"))?;
//! registry.register_with("/companies", companies, Navigation::new().icon("bi-building"))?;
//! registry.finalize()?;
//!
//! assert_eq!(registry.navigation()[0].title, "Contacts");
//! # Ok::<(), RegistryError>(())
//! ```

pub mod config;
pub mod core;
pub mod registry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            ConfigurationError, ReferenceKind, RegistryError, RegistryResult, UnresolvedReference,
            UnresolvedReferenceError, ValidationError,
        },
        field::{FieldDescriptor, FieldOptions, FieldSpec, FieldType, FieldValue},
        module::{ModuleDefinition, Relationship, RelationshipMarkers, View},
        service::{
            Assignment, JunctionService, Record, RecordService, StoredRecord, create_validated,
            update_validated,
        },
    };

    // === Registry ===
    pub use crate::registry::{
        ModuleRegistry, MountedModule, Navigation, NavigationEntry, NestedViews, RegistryState,
    };

    // === Config ===
    pub use crate::config::{AppConfig, ModuleConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use uuid::Uuid;
}
