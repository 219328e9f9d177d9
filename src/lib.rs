//! Configuration assembly for a SQL data-mapping engine.
//!
//! Turns a `<configuration>` document into a wired [`Configuration`]: every
//! pluggable component resolved, constructed and configured once, in a fixed
//! section order.

// Documents and their inputs
pub mod document;
pub mod io;
pub mod properties;

// Dynamic components
pub mod component;
pub mod datasource;
pub mod plugin;
pub mod reflection;
pub mod transaction;

// Registries
pub mod mapping;
pub mod types;

// Assembly
pub mod builder;
pub mod config;
pub mod session;

// Cross-cutting concerns
pub mod observability;

pub use builder::{BuilderError, ConfigBuilder};
pub use config::{load_configuration, LoadOptions};
pub use session::Configuration;
