//! Application manifest loading
//!
//! An application can be declared in YAML instead of code:
//!
//! ```yaml
//! app_name: Business Manager
//! modules:
//!   - path: /companies
//!     name: companies
//!     icon: bi-building
//!     fields:
//!       - { name: name, required: true }
//!   - path: /contacts
//!     name: contacts
//!     fields:
//!       - email
//!       - { name: company, lookup: companies, display: name }
//! ```

use crate::core::error::RegistryResult;
use crate::core::field::FieldSpec;
use crate::core::module::{ModuleDefinition, RelationshipMarkers};
use crate::registry::{ModuleRegistry, Navigation};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// One module entry of a manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    /// Mount path (e.g., "/sales-orders")
    pub path: String,

    /// Module name, unique across the application
    pub name: String,

    /// Menu title; derived from the name when absent
    #[serde(default)]
    pub menu_title: Option<String>,

    /// Opaque icon token for the presentation layer
    #[serde(default)]
    pub icon: Option<String>,

    /// Bare names or option maps, in display order
    #[serde(default)]
    pub fields: Vec<FieldSpec>,

    #[serde(default)]
    pub many_to_one: Option<String>,

    #[serde(default)]
    pub many_to_many: Option<String>,
}

impl ModuleConfig {
    /// Normalize into a module definition
    pub fn to_definition(&self) -> RegistryResult<ModuleDefinition> {
        Ok(ModuleDefinition::with_relationship(
            self.name.clone(),
            self.fields.iter().cloned(),
            RelationshipMarkers {
                many_to_one: self.many_to_one.clone(),
                many_to_many: self.many_to_many.clone(),
            },
        )?)
    }

    fn navigation(&self) -> Navigation {
        Navigation {
            title: self.menu_title.clone(),
            icon: self.icon.clone(),
        }
    }
}

/// Complete application manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub app_name: String,

    #[serde(default)]
    pub app_description: Option<String>,

    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

impl AppConfig {
    /// Load a manifest from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading manifest {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("parsing manifest {}", path.display()))
    }

    /// Load a manifest from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Register every module in declaration order and finalize
    ///
    /// Construction and registration errors stop at the first failing
    /// module; unresolved references are all reported together.
    pub fn build_registry(&self) -> RegistryResult<ModuleRegistry> {
        let mut registry = ModuleRegistry::new();
        for module in &self.modules {
            registry.register_with(&module.path, module.to_definition()?, module.navigation())?;
        }
        registry.finalize()?;

        tracing::info!(
            app = %self.app_name,
            modules = registry.len(),
            "Application manifest loaded"
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::RegistryError;
    use crate::core::field::FieldType;

    const MANIFEST: &str = r#"
app_name: Business Manager
app_description: Comprehensive business management system
modules:
  - path: /contacts
    name: contacts
    menu_title: Contacts
    icon: bi-people
    fields:
      - { name: first_name, required: true }
      - email
      - { name: company, lookup: companies, display: name }
      - { name: status, enum: [Active, Inactive, Prospect], default: Active }
  - path: /companies
    name: companies
    icon: bi-building
    fields:
      - { name: name, required: true }
      - { name: is_active, type: boolean, default: true }
"#;

    #[test]
    fn test_parse_manifest() {
        let config = AppConfig::from_yaml_str(MANIFEST).unwrap();
        assert_eq!(config.app_name, "Business Manager");
        assert_eq!(config.modules.len(), 2);
        assert_eq!(config.modules[0].fields[1], FieldSpec::Bare("email".to_string()));
    }

    #[test]
    fn test_build_registry_with_forward_reference() {
        let registry = AppConfig::from_yaml_str(MANIFEST)
            .unwrap()
            .build_registry()
            .unwrap();

        assert!(registry.is_finalized());
        let contacts = registry.get("/contacts").unwrap();
        assert_eq!(contacts.field("email").unwrap().field_type(), FieldType::Email);
        assert_eq!(contacts.field("status").unwrap().field_type(), FieldType::Enum);

        let nav = registry.navigation();
        assert_eq!(nav[1].title, "Companies");
        assert_eq!(nav[1].icon.as_deref(), Some("bi-building"));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = AppConfig::from_yaml_str("app_name: x\ncolor: red\n").unwrap_err();
        assert!(err.to_string().contains("color"));
    }

    #[test]
    fn test_construction_error_surfaces() {
        let yaml = r#"
app_name: Broken
modules:
  - path: /contacts
    name: contacts
    fields:
      - { name: company, lookup: companies }
"#;
        let err = AppConfig::from_yaml_str(yaml)
            .unwrap()
            .build_registry()
            .unwrap_err();
        assert_eq!(err.error_code(), "LOOKUP_WITHOUT_DISPLAY");
    }

    #[test]
    fn test_unresolved_references_surface() {
        let yaml = r#"
app_name: Broken
modules:
  - path: /notes
    name: notes
    many_to_one: tickets
    fields: [body]
"#;
        let err = AppConfig::from_yaml_str(yaml)
            .unwrap()
            .build_registry()
            .unwrap_err();
        let RegistryError::UnresolvedReferences(unresolved) = err else {
            panic!("expected unresolved references");
        };
        assert!(unresolved.mentions("notes", "tickets"));
    }
}
