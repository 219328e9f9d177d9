//! Connection-per-request data source.

use std::sync::Arc;

use crate::component::{Configurable, PropertyError};
use crate::datasource::{DataSource, DataSourceFactory};
use crate::properties::PropertyBag;

const DRIVER_PREFIX: &str = "driver.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnpooledDataSource {
    pub driver: Option<String>,
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub auto_commit: Option<bool>,
    pub default_transaction_isolation_level: Option<i32>,
    pub default_network_timeout: Option<i32>,
    pub driver_properties: PropertyBag,
}

impl UnpooledDataSource {
    /// Apply one property. Returns `Ok(false)` when the key is not a data
    /// source property.
    pub(crate) fn apply(&mut self, key: &str, value: &str) -> Result<bool, PropertyError> {
        if let Some(driver_key) = key.strip_prefix(DRIVER_PREFIX) {
            self.driver_properties.insert(driver_key, value);
            return Ok(true);
        }
        match key {
            "driver" => self.driver = Some(value.to_string()),
            "url" => self.url = Some(value.to_string()),
            "username" => self.username = Some(value.to_string()),
            "password" => self.password = Some(value.to_string()),
            "autoCommit" => self.auto_commit = Some(parse_bool(key, value)?),
            "defaultTransactionIsolationLevel" => {
                self.default_transaction_isolation_level = Some(parse_int(key, value)?)
            }
            "defaultNetworkTimeout" => self.default_network_timeout = Some(parse_int(key, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl DataSource for UnpooledDataSource {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

pub(crate) fn parse_bool(key: &str, value: &str) -> Result<bool, PropertyError> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(PropertyError::new(key, format!("expected true or false, got '{value}'"))),
    }
}

pub(crate) fn parse_int<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, PropertyError> {
    value
        .trim()
        .parse()
        .map_err(|_| PropertyError::new(key, format!("expected an integer, got '{value}'")))
}

#[derive(Debug, Clone, Default)]
pub struct UnpooledDataSourceFactory {
    data_source: UnpooledDataSource,
}

impl UnpooledDataSourceFactory {
    pub const TYPE_NAME: &'static str = "sqlmap.datasource.UnpooledDataSourceFactory";
}

impl Configurable for UnpooledDataSourceFactory {
    fn set_properties(&mut self, properties: &PropertyBag) -> Result<(), PropertyError> {
        for (key, value) in properties.iter() {
            if !self.data_source.apply(key, value)? {
                return Err(PropertyError::new(key, "unknown data source property"));
            }
        }
        Ok(())
    }
}

impl DataSourceFactory for UnpooledDataSourceFactory {
    fn data_source(&self) -> Arc<dyn DataSource> {
        Arc::new(self.data_source.clone())
    }
}
