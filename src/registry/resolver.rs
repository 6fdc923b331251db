//! Cross-module reference resolution
//!
//! Runs once, when a registry is finalized. Every lookup field and every
//! module-level relationship is checked against the set of registered
//! module names; all failures are collected before returning.

use crate::core::error::{ReferenceKind, UnresolvedReference, UnresolvedReferenceError};
use crate::core::module::{ModuleDefinition, Relationship};
use indexmap::IndexMap;
use std::collections::HashMap;

/// A lookup field on `module` that points at some other module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupReference {
    pub module: String,
    pub field: String,
}

/// One side of a many-to-many pairing
///
/// `junction` is the module that declared the pairing; `peer` is the module
/// on the other side from the point of view of the module being queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunctionPeer {
    pub junction: String,
    pub peer: String,
}

/// Resolved relationships between registered modules
#[derive(Debug, Clone, Default)]
pub struct RelationshipIndex {
    parents: HashMap<String, String>,
    children: HashMap<String, Vec<String>>,
    peers: HashMap<String, Vec<JunctionPeer>>,
    referrers: HashMap<String, Vec<LookupReference>>,
}

impl RelationshipIndex {
    /// Parent of a many-to-one child
    pub fn parent_of(&self, module: &str) -> Option<&str> {
        self.parents.get(module).map(String::as_str)
    }

    /// Many-to-one children nested under `module`, in registration order
    pub fn children_of(&self, module: &str) -> &[String] {
        self.children.get(module).map(Vec::as_slice).unwrap_or_default()
    }

    /// Many-to-many peers of `module`
    pub fn peers_of(&self, module: &str) -> &[JunctionPeer] {
        self.peers.get(module).map(Vec::as_slice).unwrap_or_default()
    }

    /// Lookup fields elsewhere that point at `module`
    pub fn referrers_of(&self, module: &str) -> &[LookupReference] {
        self.referrers.get(module).map(Vec::as_slice).unwrap_or_default()
    }

    fn add_child(&mut self, parent: &str, child: &str) {
        self.parents.insert(child.to_string(), parent.to_string());
        self.children
            .entry(parent.to_string())
            .or_default()
            .push(child.to_string());
    }

    fn add_pairing(&mut self, junction: &str, other: &str) {
        self.peers
            .entry(junction.to_string())
            .or_default()
            .push(JunctionPeer {
                junction: junction.to_string(),
                peer: other.to_string(),
            });
        // A module paired with itself is its own single peer
        if junction == other {
            return;
        }
        self.peers
            .entry(other.to_string())
            .or_default()
            .push(JunctionPeer {
                junction: junction.to_string(),
                peer: junction.to_string(),
            });
    }

    fn add_referrer(&mut self, target: &str, module: &str, field: &str) {
        self.referrers
            .entry(target.to_string())
            .or_default()
            .push(LookupReference {
                module: module.to_string(),
                field: field.to_string(),
            });
    }
}

/// Validates references between a fixed set of modules
pub struct RelationshipResolver<'a> {
    modules: IndexMap<&'a str, &'a ModuleDefinition>,
}

impl<'a> RelationshipResolver<'a> {
    /// Create a resolver over modules in registration order
    pub fn new(modules: impl IntoIterator<Item = &'a ModuleDefinition>) -> Self {
        Self {
            modules: modules.into_iter().map(|m| (m.name(), m)).collect(),
        }
    }

    /// Check every reference and build the relationship index
    ///
    /// Fails with the complete list of unresolved references.
    pub fn resolve(&self) -> Result<RelationshipIndex, UnresolvedReferenceError> {
        let mut index = RelationshipIndex::default();
        let mut unresolved = Vec::new();

        for module in self.modules.values() {
            self.resolve_lookups(module, &mut index, &mut unresolved);

            match module.relationship() {
                Relationship::None => {}
                Relationship::ManyToOne { parent_module, .. } => {
                    if self.modules.contains_key(parent_module.as_str()) {
                        index.add_child(parent_module, module.name());
                    } else {
                        unresolved.push(UnresolvedReference {
                            module: module.name().to_string(),
                            target: parent_module.clone(),
                            kind: ReferenceKind::ManyToOne,
                        });
                    }
                }
                Relationship::ManyToMany { other_module } => {
                    if self.modules.contains_key(other_module.as_str()) {
                        index.add_pairing(module.name(), other_module);
                    } else {
                        unresolved.push(UnresolvedReference {
                            module: module.name().to_string(),
                            target: other_module.clone(),
                            kind: ReferenceKind::ManyToMany,
                        });
                    }
                }
            }
        }

        if unresolved.is_empty() {
            Ok(index)
        } else {
            Err(UnresolvedReferenceError {
                references: unresolved,
            })
        }
    }

    fn resolve_lookups(
        &self,
        module: &ModuleDefinition,
        index: &mut RelationshipIndex,
        unresolved: &mut Vec<UnresolvedReference>,
    ) {
        for field in module.fields() {
            let Some(lookup) = field.lookup() else {
                continue;
            };

            match self.modules.get(lookup.module.as_str()) {
                None => unresolved.push(UnresolvedReference {
                    module: module.name().to_string(),
                    target: lookup.module.clone(),
                    kind: ReferenceKind::Lookup {
                        field: field.name().to_string(),
                    },
                }),
                Some(target) if !target.has_field(&lookup.display_field) => {
                    unresolved.push(UnresolvedReference {
                        module: module.name().to_string(),
                        target: lookup.module.clone(),
                        kind: ReferenceKind::DisplayField {
                            field: field.name().to_string(),
                            display_field: lookup.display_field.clone(),
                        },
                    })
                }
                Some(_) => index.add_referrer(&lookup.module, module.name(), field.name()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::{FieldOptions, FieldSpec};
    use crate::core::module::RelationshipMarkers;

    fn lookup(name: &str, target: &str, display: &str) -> FieldSpec {
        FieldOptions::new(name).lookup(target).display(display).into()
    }

    #[test]
    fn test_resolves_lookup_and_relationships() {
        let customers = ModuleDefinition::new("customers", ["company_name"]).unwrap();
        let contacts = ModuleDefinition::with_relationship(
            "contacts",
            ["first_name"],
            RelationshipMarkers::many_to_one("customers"),
        )
        .unwrap();
        let roles = ModuleDefinition::new("roles", ["role_name"]).unwrap();
        let employee_roles = ModuleDefinition::with_relationship(
            "employee_roles",
            Vec::<FieldSpec>::new(),
            RelationshipMarkers::many_to_many("roles"),
        )
        .unwrap();
        let orders =
            ModuleDefinition::new("orders", vec![lookup("customer", "customers", "company_name")])
                .unwrap();

        let index =
            RelationshipResolver::new([&customers, &contacts, &roles, &employee_roles, &orders])
                .resolve()
                .unwrap();

        assert_eq!(index.parent_of("contacts"), Some("customers"));
        assert_eq!(index.children_of("customers"), ["contacts"]);
        assert_eq!(
            index.peers_of("roles"),
            [JunctionPeer {
                junction: "employee_roles".to_string(),
                peer: "employee_roles".to_string(),
            }]
        );
        assert_eq!(index.peers_of("employee_roles")[0].peer, "roles");
        assert_eq!(
            index.referrers_of("customers"),
            [LookupReference {
                module: "orders".to_string(),
                field: "customer".to_string(),
            }]
        );
        assert!(index.children_of("orders").is_empty());
    }

    #[test]
    fn test_self_pairing_resolves_to_one_peer() {
        let products = ModuleDefinition::with_relationship(
            "products",
            ["name"],
            RelationshipMarkers::many_to_many("products"),
        )
        .unwrap();

        let index = RelationshipResolver::new([&products]).resolve().unwrap();
        assert_eq!(
            index.peers_of("products"),
            [JunctionPeer {
                junction: "products".to_string(),
                peer: "products".to_string(),
            }]
        );
    }

    #[test]
    fn test_self_lookup_resolves() {
        let employees = ModuleDefinition::new(
            "employees",
            vec![
                FieldSpec::from("first_name"),
                lookup("manager", "employees", "first_name"),
            ],
        )
        .unwrap();

        let index = RelationshipResolver::new([&employees]).resolve().unwrap();
        assert_eq!(index.referrers_of("employees")[0].field, "manager");
    }

    #[test]
    fn test_collects_every_unresolved_reference() {
        let contacts = ModuleDefinition::new(
            "contacts",
            vec![
                lookup("company", "ghost", "name"),
                lookup("owner", "users", "name"),
            ],
        )
        .unwrap();
        let notes = ModuleDefinition::with_relationship(
            "notes",
            ["body"],
            RelationshipMarkers::many_to_one("tickets"),
        )
        .unwrap();

        let err = RelationshipResolver::new([&contacts, &notes])
            .resolve()
            .unwrap_err();

        assert_eq!(err.references.len(), 3);
        assert!(err.mentions("contacts", "ghost"));
        assert!(err.mentions("contacts", "users"));
        assert!(err.mentions("notes", "tickets"));
        assert_eq!(err.references[2].kind, ReferenceKind::ManyToOne);
    }

    #[test]
    fn test_missing_display_field_is_reported() {
        let companies = ModuleDefinition::new("companies", ["name"]).unwrap();
        let projects = ModuleDefinition::new(
            "projects",
            vec![lookup("client", "companies", "title")],
        )
        .unwrap();

        let err = RelationshipResolver::new([&companies, &projects])
            .resolve()
            .unwrap_err();
        assert_eq!(
            err.references[0].kind,
            ReferenceKind::DisplayField {
                field: "client".to_string(),
                display_field: "title".to_string(),
            }
        );
    }
}
