//! Data sources and their factories.
//!
//! # Data Flow
//! ```text
//! <dataSource type="POOLED"> + properties
//!     → DataSourceFactory (resolved, constructed, configured)
//!     → data_source() → Arc<dyn DataSource>
//!     → Environment { id, transaction_factory, data_source }
//! ```
//!
//! # Design Decisions
//! - Factories validate every property name; unknown names are rejected
//! - `driver.`-prefixed properties are passed through to the driver untouched
//! - Pool sizing is recorded, never acted on: pooling internals are out of scope

pub mod pooled;
pub mod unpooled;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::component::{Capability, Configurable};

pub use pooled::{PoolSettings, PooledDataSource, PooledDataSourceFactory};
pub use unpooled::{UnpooledDataSource, UnpooledDataSourceFactory};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    #[error("data source has no url configured")]
    MissingUrl,

    #[error("cannot determine database product from url '{url}'")]
    UnknownProduct { url: String },
}

/// A configured source of database connections.
pub trait DataSource: fmt::Debug + Send + Sync {
    fn url(&self) -> Option<&str>;

    /// Database product name, as the driver would report it.
    fn product_name(&self) -> Result<String, DataSourceError> {
        let url = self.url().ok_or(DataSourceError::MissingUrl)?;
        product_name_for_url(url)
    }

    fn is_pooled(&self) -> bool {
        false
    }
}

/// Builds the data source of an environment.
pub trait DataSourceFactory: Configurable + fmt::Debug + Send + Sync {
    fn data_source(&self) -> Arc<dyn DataSource>;
}

impl Capability for dyn DataSourceFactory {
    const NAME: &'static str = "data source factory";
}

const PRODUCTS: &[(&str, &str)] = &[
    ("postgresql", "PostgreSQL"),
    ("postgres", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("mariadb", "MariaDB"),
    ("sqlite", "SQLite"),
    ("h2", "H2"),
    ("hsqldb", "HSQL Database Engine"),
    ("derby", "Apache Derby"),
    ("oracle", "Oracle"),
    ("sqlserver", "Microsoft SQL Server"),
    ("db2", "DB2"),
];

/// Map a connection URL (`jdbc:` prefix optional) to a product name.
pub fn product_name_for_url(url: &str) -> Result<String, DataSourceError> {
    let trimmed = url.strip_prefix("jdbc:").unwrap_or(url);
    let scheme = trimmed
        .split([':', '/'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    PRODUCTS
        .iter()
        .find(|(prefix, _)| *prefix == scheme)
        .map(|(_, product)| (*product).to_string())
        .ok_or_else(|| DataSourceError::UnknownProduct {
            url: url.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_name_for_url() {
        assert_eq!(product_name_for_url("jdbc:h2:mem:test").unwrap(), "H2");
        assert_eq!(
            product_name_for_url("postgres://localhost/app").unwrap(),
            "PostgreSQL"
        );
        assert_eq!(product_name_for_url("jdbc:MySQL://db/app").unwrap(), "MySQL");
        assert!(matches!(
            product_name_for_url("jdbc:unknown:foo"),
            Err(DataSourceError::UnknownProduct { .. })
        ));
    }
}
