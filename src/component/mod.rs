//! Dynamic component resolution.
//!
//! # Data Flow
//! ```text
//! "POOLED" / "com.example.AuditPlugin"
//!     → alias.rs (case-insensitive alias table, seeded from the registry)
//!     → registry.rs (catalog lookup, capability-typed factory)
//!     → resolver.rs (construct, then Configurable::set_properties)
//!     → Component<dyn Capability> installed into the Configuration
//! ```
//!
//! # Design Decisions
//! - No reflection: every nameable type is registered up front, with a
//!   factory per capability it can be built as
//! - Unknown names fail with `ClassResolution`; known names without a
//!   factory for the requested capability fail with `Instantiation`

pub mod alias;
pub mod builtin;
pub mod catalog;
pub mod registry;
pub mod resolver;

pub use alias::{AliasError, TypeAliasRegistry};
pub use catalog::{TypeInfo, TypeKind, TypeName};
pub use registry::{Capability, ComponentRegistry};
pub use resolver::{
    Component, ComponentDescriptor, ComponentError, ComponentResolver, Configurable, PropertyError,
};
