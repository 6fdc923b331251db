//! Module registry
//!
//! Maps mount paths to module definitions and module names to the same
//! shared instances. The registry is populated during application setup,
//! then finalized: finalize resolves every cross-module reference and
//! closes the registry to further registration. After that it is read-only
//! and can be shared freely between request handlers.

use super::resolver::{LookupReference, RelationshipIndex, RelationshipResolver};
use super::views::{ChildLink, Navigation, NavigationEntry, NestedViews, PeerLink, ViewLink};
use crate::core::error::{RegistryError, RegistryResult};
use crate::core::module::ModuleDefinition;
use crate::core::naming;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Lifecycle of a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    /// Accepting registrations
    Open,
    /// Read-only, every reference checked
    Finalized,
}

/// A module mounted at a path
#[derive(Debug, Clone)]
pub struct MountedModule {
    module: Arc<ModuleDefinition>,
    navigation: NavigationEntry,
}

impl MountedModule {
    pub fn path(&self) -> &str {
        &self.navigation.path
    }

    pub fn module(&self) -> &Arc<ModuleDefinition> {
        &self.module
    }

    pub fn navigation(&self) -> &NavigationEntry {
        &self.navigation
    }
}

/// Registry of every module of an application
#[derive(Debug)]
pub struct ModuleRegistry {
    state: RegistryState,
    /// Maps mount path -> mounted module, in registration order
    mounts: IndexMap<String, MountedModule>,
    /// Maps module name -> mount path
    paths_by_name: HashMap<String, String>,
    relations: RelationshipIndex,
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleRegistry {
    /// Create a new, open registry
    pub fn new() -> Self {
        Self {
            state: RegistryState::Open,
            mounts: IndexMap::new(),
            paths_by_name: HashMap::new(),
            relations: RelationshipIndex::default(),
        }
    }

    /// Register a module with navigation derived from its name
    pub fn register(
        &mut self,
        path: impl Into<String>,
        module: ModuleDefinition,
    ) -> RegistryResult<Arc<ModuleDefinition>> {
        self.register_with(path, module, Navigation::default())
    }

    /// Register a module with an explicit menu title and icon
    ///
    /// References to other modules are not checked here; they may point at
    /// modules registered later and are resolved by [`finalize`](Self::finalize).
    /// A failed registration leaves the registry untouched.
    pub fn register_with(
        &mut self,
        path: impl Into<String>,
        module: ModuleDefinition,
        navigation: Navigation,
    ) -> RegistryResult<Arc<ModuleDefinition>> {
        let path = path.into();

        if self.state == RegistryState::Finalized {
            return Err(RegistryError::RegistryClosed {
                path,
                name: module.name().to_string(),
            });
        }
        if self.mounts.contains_key(&path) {
            return Err(RegistryError::DuplicatePath { path });
        }
        if self.paths_by_name.contains_key(module.name()) {
            return Err(RegistryError::DuplicateName {
                name: module.name().to_string(),
            });
        }

        let Navigation { title, icon } = navigation;
        let entry = NavigationEntry {
            path: path.clone(),
            title: title.unwrap_or_else(|| naming::humanize(module.name())),
            icon,
        };

        tracing::debug!(
            path = %path,
            module = %module.name(),
            fields = module.fields().len(),
            "Module registered"
        );

        let module = Arc::new(module);
        self.paths_by_name
            .insert(module.name().to_string(), path.clone());
        self.mounts.insert(
            path,
            MountedModule {
                module: Arc::clone(&module),
                navigation: entry,
            },
        );

        Ok(module)
    }

    /// Resolve every reference and close the registry
    ///
    /// On failure every unresolved reference is reported at once and the
    /// registry stays open. Finalizing twice is a no-op.
    pub fn finalize(&mut self) -> RegistryResult<()> {
        if self.state == RegistryState::Finalized {
            tracing::debug!("Module registry already finalized");
            return Ok(());
        }

        let resolver = RelationshipResolver::new(self.mounts.values().map(|m| m.module.as_ref()));
        match resolver.resolve() {
            Ok(relations) => {
                self.relations = relations;
                self.state = RegistryState::Finalized;
                tracing::info!(modules = self.mounts.len(), "Module registry finalized");
                Ok(())
            }
            Err(err) => {
                for reference in &err.references {
                    tracing::warn!(
                        module = %reference.module,
                        referenced = %reference.target,
                        "Unresolved reference: {}",
                        reference
                    );
                }
                Err(err.into())
            }
        }
    }

    pub fn state(&self) -> RegistryState {
        self.state
    }

    pub fn is_finalized(&self) -> bool {
        self.state == RegistryState::Finalized
    }

    /// Module mounted at `path`
    pub fn get(&self, path: &str) -> Option<&Arc<ModuleDefinition>> {
        self.mounts.get(path).map(|m| &m.module)
    }

    /// Module registered under `name`; the same instance [`get`](Self::get) returns
    pub fn get_by_name(&self, name: &str) -> Option<&Arc<ModuleDefinition>> {
        self.mount_of(name).map(|m| &m.module)
    }

    /// Mount (module plus navigation) at `path`
    pub fn mount(&self, path: &str) -> Option<&MountedModule> {
        self.mounts.get(path)
    }

    /// Mount of the module registered under `name`
    pub fn mount_of(&self, name: &str) -> Option<&MountedModule> {
        self.paths_by_name
            .get(name)
            .and_then(|path| self.mounts.get(path))
    }

    /// Mount path of the module registered under `name`
    pub fn path_of(&self, name: &str) -> Option<&str> {
        self.paths_by_name.get(name).map(String::as_str)
    }

    /// Mounts in registration order
    pub fn iter(&self) -> impl Iterator<Item = &MountedModule> {
        self.mounts.values()
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    /// Menu entries in registration order
    pub fn navigation(&self) -> Vec<NavigationEntry> {
        self.mounts.values().map(|m| m.navigation.clone()).collect()
    }

    /// Resolved relationships; empty until the registry is finalized
    pub fn relations(&self) -> &RelationshipIndex {
        &self.relations
    }

    /// Lookup fields of other modules pointing at `name`
    pub fn referrers_of(&self, name: &str) -> &[LookupReference] {
        self.relations.referrers_of(name)
    }

    /// Parent, children and many-to-many peers of a module
    ///
    /// Returns `None` for unknown modules. Before finalize the views are
    /// empty because relationships have not been resolved yet.
    pub fn nested_views(&self, name: &str) -> Option<NestedViews> {
        self.paths_by_name.get(name)?;

        let link = |module: &str| -> Option<ViewLink> {
            Some(ViewLink {
                module: module.to_string(),
                path: self.path_of(module)?.to_string(),
            })
        };

        Some(NestedViews {
            parent: self.relations.parent_of(name).and_then(link),
            children: self
                .relations
                .children_of(name)
                .iter()
                .filter_map(|child| {
                    let module = self.get_by_name(child)?;
                    Some(ChildLink {
                        module: child.clone(),
                        path: self.path_of(child)?.to_string(),
                        parent_key: module.parent_key()?.to_string(),
                    })
                })
                .collect(),
            peers: self
                .relations
                .peers_of(name)
                .iter()
                .filter_map(|p| {
                    Some(PeerLink {
                        module: p.peer.clone(),
                        path: self.path_of(&p.peer)?.to_string(),
                        junction: p.junction.clone(),
                    })
                })
                .collect(),
        })
    }
}
