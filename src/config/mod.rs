//! Settings schema and configuration loading.
//!
//! # Data Flow
//! ```text
//! config file (XML)
//!     → loader.rs (read, parse, pick resource roots)
//!     → ConfigBuilder (sections in order)
//!         <settings> → validation.rs (unknown names, all at once)
//!                    → schema.rs Settings (typed, documented defaults)
//!     → Configuration
//! ```
//!
//! # Design Decisions
//! - Every setting has a default, so minimal documents are valid
//! - Validation finishes before any setting is applied

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_configuration, LoadError, LoadOptions};
pub use schema::Settings;
