//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sqlmap_config::component::{ComponentRegistry, Configurable, PropertyError, TypeInfo};
use sqlmap_config::io::{ResourceError, ResourceLoader};
use sqlmap_config::plugin::Interceptor;
use sqlmap_config::properties::PropertyBag;
use sqlmap_config::types::JdbcType;

/// Interceptor limited to one target when its `target` property is set.
#[derive(Debug, Default)]
pub struct TargetedInterceptor {
    target: Option<String>,
}

impl Configurable for TargetedInterceptor {
    fn set_properties(&mut self, properties: &PropertyBag) -> Result<(), PropertyError> {
        for (key, value) in properties.iter() {
            match key {
                "target" => self.target = Some(value.to_string()),
                other => return Err(PropertyError::unknown(other)),
            }
        }
        Ok(())
    }
}

impl Interceptor for TargetedInterceptor {
    fn applies_to(&self, target: &str) -> bool {
        self.target.as_deref().map_or(true, |only| only == target)
    }
}

/// Built-ins plus a small application catalog.
pub fn app_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::with_defaults();
    registry
        .register_component::<dyn Interceptor, _>("app.plugins.TargetedInterceptor", || {
            Box::new(TargetedInterceptor::default())
        })
        .register_type(TypeInfo::class("app.model.User"))
        .register_type(TypeInfo::class("app.model.Order").with_alias("purchase"))
        .register_type(TypeInfo::class("app.model.Money"))
        .register_type(TypeInfo::mapper("app.mappers.UserMapper"))
        .register_type(TypeInfo::mapper("app.mappers.OrderMapper"))
        .register_type(TypeInfo::mapper("app.reports.ReportMapper"))
        .register_type(
            TypeInfo::type_handler("app.handlers.MoneyHandler")
                .handling("app.model.Money")
                .handling_jdbc(JdbcType::Decimal),
        )
        .register_type(TypeInfo::type_handler("app.handlers.JsonHandler"));
    registry
}

/// In-memory resources and URLs. Counts streams that are still open.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    resources: HashMap<String, String>,
    urls: HashMap<String, String>,
    open: Arc<AtomicUsize>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, name: &str, content: &str) -> Self {
        self.resources.insert(name.to_string(), content.to_string());
        self
    }

    pub fn with_url(mut self, url: &str, content: &str) -> Self {
        self.urls.insert(url.to_string(), content.to_string());
        self
    }

    /// Handle for checking open streams after the loader moved into a builder.
    pub fn open_streams(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.open)
    }

    fn stream(&self, content: &str) -> Box<dyn Read> {
        self.open.fetch_add(1, Ordering::SeqCst);
        Box::new(TrackedStream {
            inner: Cursor::new(content.as_bytes().to_vec()),
            open: Arc::clone(&self.open),
        })
    }
}

impl ResourceLoader for MemoryLoader {
    fn open_resource(&self, resource: &str) -> Result<Box<dyn Read>, ResourceError> {
        match self.resources.get(resource) {
            Some(content) => Ok(self.stream(content)),
            None => Err(ResourceError::NotFound {
                resource: resource.to_string(),
            }),
        }
    }

    fn open_url(&self, url: &str) -> Result<Box<dyn Read>, ResourceError> {
        match self.urls.get(url) {
            Some(content) => Ok(self.stream(content)),
            None => Err(ResourceError::NotFound {
                resource: url.to_string(),
            }),
        }
    }
}

struct TrackedStream {
    inner: Cursor<Vec<u8>>,
    open: Arc<AtomicUsize>,
}

impl Read for TrackedStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Drop for TrackedStream {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Wrap sections in a `<configuration>` root.
pub fn configuration_xml(sections: &str) -> String {
    format!("<configuration>{sections}</configuration>")
}

/// One `<environment>` with JDBC transactions and an unpooled data source.
pub fn environment_xml(id: &str, url: &str) -> String {
    format!(
        r#"<environment id="{id}">
             <transactionManager type="JDBC"/>
             <dataSource type="UNPOOLED">
               <property name="driver" value="org.h2.Driver"/>
               <property name="url" value="{url}"/>
             </dataSource>
           </environment>"#
    )
}
