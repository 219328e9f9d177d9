//! Configuration assembly.
//!
//! # Data Flow
//! ```text
//! ConfigDocument + environment id + seed properties
//!     → ConfigBuilder::parse
//!         properties → settings (read) → vfsImpl → logImpl → typeAliases
//!         → plugins → objectFactory → objectWrapperFactory → reflectorFactory
//!         → settings (apply) → environments → databaseIdProvider
//!         → typeHandlers → mappers
//!     → Configuration
//! ```
//!
//! # Design Decisions
//! - One owned `Configuration` is threaded through every stage; no globals
//! - Stages never read back from a later stage
//! - Errors carry the section that raised them (`BuilderError::Section`)

pub mod config_builder;
pub mod environments;
pub mod error;
pub mod mappers;
pub mod sections;
pub mod settings;

pub use config_builder::ConfigBuilder;
pub use error::{BuilderError, Section};
pub use mappers::MapperReference;
