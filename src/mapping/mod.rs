//! Mapper registration and mapped-statement sources.
//!
//! # Data Flow
//! ```text
//! <mappers>
//!     <package name>   → MapperRegistry::add_mappers (catalog scan)
//!     <mapper class>   → MapperRegistry::add_mapper
//!     <mapper resource|url>
//!         → ResourceLoader stream
//!         → MapperSourceParser (XmlMapperParser by default)
//!         → sql fragments + mapped statements on the Configuration
//! ```
//!
//! # Design Decisions
//! - The mapper parser is a trait seam; the builder never inspects mapper documents itself
//! - The database id filters which statements a mapper contributes

pub mod database_id;
pub mod registry;
pub mod statement;
pub mod xml;

use thiserror::Error;

use crate::component::TypeName;
use crate::document::DocumentError;

pub use database_id::{DatabaseIdProvider, VendorDatabaseIdProvider};
pub use registry::MapperRegistry;
pub use statement::{MappedStatement, StatementKind};
pub use xml::{MapperSourceParser, XmlMapperParser};

/// Errors raised while registering mappers or parsing mapper sources.
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("type {type_name} is already known to the mapper registry")]
    DuplicateMapper { type_name: TypeName },

    #[error("failed to read mapper {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed mapper {resource}: {source}")]
    Document {
        resource: String,
        #[source]
        source: DocumentError,
    },

    #[error("mapper {resource} has root <{found}>, expected <mapper>")]
    UnexpectedRoot { resource: String, found: String },

    #[error("mapper {resource} has no namespace")]
    MissingNamespace { resource: String },

    #[error("<{element}> in {resource} has no id")]
    MissingId { resource: String, element: String },

    #[error("dots are not allowed in element id '{id}' ({resource})")]
    InvalidId { resource: String, id: String },

    #[error("sql fragment '{id}' is already registered")]
    DuplicateFragment { id: String },

    #[error("mapped statement '{id}' is already registered")]
    DuplicateStatement { id: String },

    #[error("statement '{statement}' includes unknown sql fragment '{refid}'")]
    UnknownFragment { statement: String, refid: String },
}
