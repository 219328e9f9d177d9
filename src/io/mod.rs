//! Resource loading.
//!
//! # Responsibilities
//! - Open named resources relative to a list of resource roots
//! - Open URL resources (`file:`, `http:`, `https:`)
//!
//! # Design Decisions
//! - Streams are handed out as owned `Box<dyn Read>`; callers consume and drop
//!   them before returning, so every stream is released on every exit path
//! - The loader is a trait so embedders can serve resources from memory

pub mod resources;

pub use resources::{FileSystemLoader, ResourceError, ResourceLoader};
