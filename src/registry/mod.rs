//! Module registry, relationship resolution and presentation views

pub mod module_registry;
pub mod resolver;
pub mod views;

pub use module_registry::{ModuleRegistry, MountedModule, RegistryState};
pub use resolver::{JunctionPeer, LookupReference, RelationshipIndex, RelationshipResolver};
pub use views::{ChildLink, Navigation, NavigationEntry, NestedViews, PeerLink, ViewLink};
