//! Database vendor identification.

use crate::component::{Capability, Configurable, PropertyError};
use crate::datasource::{DataSource, DataSourceError};
use crate::properties::PropertyBag;

/// Derives the database id statements are filtered by.
pub trait DatabaseIdProvider: Configurable + std::fmt::Debug + Send + Sync {
    fn database_id(&self, data_source: &dyn DataSource) -> Result<Option<String>, DataSourceError>;
}

impl Capability for dyn DatabaseIdProvider {
    const NAME: &'static str = "database id provider";
}

/// Maps the data source's product name to a database id.
///
/// Without properties the product name itself is the id. With properties,
/// the first key contained in the product name selects its value; no match
/// yields no id. Failures to read the product name are logged and yield no
/// id.
#[derive(Debug, Clone, Default)]
pub struct VendorDatabaseIdProvider {
    properties: PropertyBag,
}

impl VendorDatabaseIdProvider {
    pub const TYPE_NAME: &'static str = "sqlmap.mapping.VendorDatabaseIdProvider";

    fn lookup(&self, data_source: &dyn DataSource) -> Result<Option<String>, DataSourceError> {
        let product_name = data_source.product_name()?;
        if self.properties.is_empty() {
            return Ok(Some(product_name));
        }
        Ok(self
            .properties
            .iter()
            .find(|(key, _)| product_name.contains(key))
            .map(|(_, value)| value.to_string()))
    }
}

impl Configurable for VendorDatabaseIdProvider {
    fn set_properties(&mut self, properties: &PropertyBag) -> Result<(), PropertyError> {
        self.properties = properties.clone();
        Ok(())
    }
}

impl DatabaseIdProvider for VendorDatabaseIdProvider {
    fn database_id(&self, data_source: &dyn DataSource) -> Result<Option<String>, DataSourceError> {
        match self.lookup(data_source) {
            Ok(id) => Ok(id),
            Err(error) => {
                tracing::error!(error = %error, "Could not get a databaseId from dataSource");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::UnpooledDataSource;

    fn data_source(url: &str) -> UnpooledDataSource {
        UnpooledDataSource {
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_product_name_without_properties() {
        let provider = VendorDatabaseIdProvider::default();
        let id = provider.database_id(&data_source("jdbc:mysql://db/app")).unwrap();
        assert_eq!(id.as_deref(), Some("MySQL"));
    }

    #[test]
    fn test_first_matching_property() {
        let mut provider = VendorDatabaseIdProvider::default();
        let props: PropertyBag = [("SQL Server", "sqlserver"), ("Postgre", "pg"), ("H2", "h2")]
            .into_iter()
            .collect();
        provider.set_properties(&props).unwrap();

        let pg = provider.database_id(&data_source("jdbc:postgresql://db/app")).unwrap();
        assert_eq!(pg.as_deref(), Some("pg"));

        let none = provider.database_id(&data_source("jdbc:mysql://db/app")).unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn test_unknown_product_yields_none() {
        let provider = VendorDatabaseIdProvider::default();
        let id = provider.database_id(&UnpooledDataSource::default()).unwrap();
        assert_eq!(id, None);
    }
}
