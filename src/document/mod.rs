//! Configuration documents.
//!
//! # Data Flow
//! ```text
//! XML text
//!     → parser.rs (quick-xml events → ConfigNode tree)
//!     → ConfigDocument (raw tree + live variables)
//!     → evaluate("settings") (placeholders expanded with the current variables)
//!     → section processors
//! ```
//!
//! # Design Decisions
//! - The raw tree is never mutated; each evaluation returns a resolved copy
//! - Variables can be replaced between evaluations, so sections read after
//!   the properties section see the merged variables

pub mod node;
pub mod parser;
pub mod placeholder;

pub use node::ConfigNode;
pub use parser::{parse_xml, DocumentError};
pub use placeholder::PlaceholderResolver;

use crate::properties::PropertyBag;

/// A parsed document plus the variables used to expand its placeholders.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    root: ConfigNode,
    variables: PropertyBag,
}

impl ConfigDocument {
    pub fn new(root: ConfigNode, variables: PropertyBag) -> Self {
        Self { root, variables }
    }

    pub fn parse(xml: &str, variables: PropertyBag) -> Result<Self, DocumentError> {
        Ok(Self::new(parse_xml(xml)?, variables))
    }

    /// Root element name, unresolved.
    pub fn root_name(&self) -> &str {
        self.root.name()
    }

    /// The whole tree with placeholders expanded.
    pub fn root(&self) -> ConfigNode {
        self.root.resolved(&PlaceholderResolver::new(&self.variables))
    }

    /// First child of the root with the given name, placeholders expanded.
    pub fn evaluate(&self, name: &str) -> Option<ConfigNode> {
        self.root
            .child(name)
            .map(|node| node.resolved(&PlaceholderResolver::new(&self.variables)))
    }

    pub fn variables(&self) -> &PropertyBag {
        &self.variables
    }

    pub fn set_variables(&mut self, variables: PropertyBag) {
        self.variables = variables;
    }
}
