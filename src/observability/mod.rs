//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! builder, resolver, mapper parser
//!     → tracing events (section, component, environment fields)
//!     → logging.rs subscriber (EnvFilter + fmt layer on stderr)
//! ```

pub mod logging;

pub use logging::init_logging;
