//! Variables and property bags.
//!
//! # Data Flow
//! ```text
//! <properties> children  ─┐
//! resource= / url= file  ─┼→ resolver.rs (layering) → PropertyBag
//! inherited variables    ─┘        │
//!                                  ├→ ConfigDocument (placeholder source)
//!                                  └→ Configuration::variables
//! ```

pub mod bag;
pub mod format;
pub mod resolver;

pub use bag::PropertyBag;
pub use format::PropertyFormat;
pub use resolver::{PropertyResolver, PropertySource, PropertySourceError};
