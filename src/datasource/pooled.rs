//! Pooled data source configuration.

use std::sync::Arc;

use serde::Serialize;

use crate::component::{Configurable, PropertyError};
use crate::datasource::unpooled::{parse_bool, parse_int};
use crate::datasource::{DataSource, DataSourceFactory, UnpooledDataSource};
use crate::properties::PropertyBag;

/// Pool sizing and health-check settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolSettings {
    pub maximum_active_connections: u32,
    pub maximum_idle_connections: u32,
    pub maximum_checkout_time_ms: u64,
    pub time_to_wait_ms: u64,
    pub maximum_local_bad_connection_tolerance: u32,
    pub ping_query: String,
    pub ping_enabled: bool,
    pub ping_connections_not_used_for_ms: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            maximum_active_connections: 10,
            maximum_idle_connections: 5,
            maximum_checkout_time_ms: 20_000,
            time_to_wait_ms: 20_000,
            maximum_local_bad_connection_tolerance: 3,
            ping_query: "NO PING QUERY SET".to_string(),
            ping_enabled: false,
            ping_connections_not_used_for_ms: 0,
        }
    }
}

impl PoolSettings {
    fn apply(&mut self, key: &str, value: &str) -> Result<bool, PropertyError> {
        match key {
            "poolMaximumActiveConnections" => self.maximum_active_connections = parse_int(key, value)?,
            "poolMaximumIdleConnections" => self.maximum_idle_connections = parse_int(key, value)?,
            "poolMaximumCheckoutTime" => self.maximum_checkout_time_ms = parse_int(key, value)?,
            "poolTimeToWait" => self.time_to_wait_ms = parse_int(key, value)?,
            "poolMaximumLocalBadConnectionTolerance" => {
                self.maximum_local_bad_connection_tolerance = parse_int(key, value)?
            }
            "poolPingQuery" => self.ping_query = value.to_string(),
            "poolPingEnabled" => self.ping_enabled = parse_bool(key, value)?,
            "poolPingConnectionsNotUsedFor" => {
                self.ping_connections_not_used_for_ms = parse_int(key, value)?
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PooledDataSource {
    pub connection: UnpooledDataSource,
    pub pool: PoolSettings,
}

impl DataSource for PooledDataSource {
    fn url(&self) -> Option<&str> {
        self.connection.url.as_deref()
    }

    fn is_pooled(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct PooledDataSourceFactory {
    data_source: PooledDataSource,
}

impl PooledDataSourceFactory {
    pub const TYPE_NAME: &'static str = "sqlmap.datasource.PooledDataSourceFactory";
}

impl Configurable for PooledDataSourceFactory {
    fn set_properties(&mut self, properties: &PropertyBag) -> Result<(), PropertyError> {
        for (key, value) in properties.iter() {
            let handled = self.data_source.connection.apply(key, value)?
                || self.data_source.pool.apply(key, value)?;
            if !handled {
                return Err(PropertyError::new(key, "unknown data source property"));
            }
        }
        Ok(())
    }
}

impl DataSourceFactory for PooledDataSourceFactory {
    fn data_source(&self) -> Arc<dyn DataSource> {
        Arc::new(self.data_source.clone())
    }
}
