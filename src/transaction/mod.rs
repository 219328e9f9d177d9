//! Transaction factories.
//!
//! # Responsibilities
//! - Define the `TransactionFactory` capability
//! - Provide the `JDBC` (engine-managed commit/rollback) and `MANAGED`
//!   (container-managed) factories
//!
//! # Design Decisions
//! - Factories only carry their configuration; opening transactions is the
//!   execution engine's job

use std::fmt;

use crate::component::{Capability, Configurable, PropertyError};
use crate::properties::PropertyBag;

/// Produces transactions for an environment.
pub trait TransactionFactory: Configurable + fmt::Debug + Send + Sync {
    /// Whether the engine itself commits and rolls back.
    fn manages_commit(&self) -> bool;
}

impl Capability for dyn TransactionFactory {
    const NAME: &'static str = "transaction factory";
}

fn parse_flag(key: &str, value: &str) -> Result<bool, PropertyError> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(PropertyError::new(key, format!("expected true or false, got '{value}'"))),
    }
}

/// Commits and rolls back through the connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JdbcTransactionFactory {
    pub skip_set_auto_commit_on_close: bool,
}

impl JdbcTransactionFactory {
    pub const TYPE_NAME: &'static str = "sqlmap.transaction.JdbcTransactionFactory";
}

impl Configurable for JdbcTransactionFactory {
    fn set_properties(&mut self, properties: &PropertyBag) -> Result<(), PropertyError> {
        if let Some(value) = properties.get("skipSetAutoCommitOnClose") {
            self.skip_set_auto_commit_on_close = parse_flag("skipSetAutoCommitOnClose", value)?;
        }
        Ok(())
    }
}

impl TransactionFactory for JdbcTransactionFactory {
    fn manages_commit(&self) -> bool {
        true
    }
}

/// Leaves commit and rollback to the surrounding container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedTransactionFactory {
    pub close_connection: bool,
}

impl ManagedTransactionFactory {
    pub const TYPE_NAME: &'static str = "sqlmap.transaction.ManagedTransactionFactory";
}

impl Default for ManagedTransactionFactory {
    fn default() -> Self {
        Self {
            close_connection: true,
        }
    }
}

impl Configurable for ManagedTransactionFactory {
    fn set_properties(&mut self, properties: &PropertyBag) -> Result<(), PropertyError> {
        if let Some(value) = properties.get("closeConnection") {
            self.close_connection = parse_flag("closeConnection", value)?;
        }
        Ok(())
    }
}

impl TransactionFactory for ManagedTransactionFactory {
    fn manages_commit(&self) -> bool {
        false
    }
}
