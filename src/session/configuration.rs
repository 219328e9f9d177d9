//! The assembled runtime configuration.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::component::{Component, ComponentRegistry, TypeAliasRegistry, TypeName};
use crate::config::schema::Settings;
use crate::mapping::{MappedStatement, MapperError, MapperRegistry};
use crate::plugin::InterceptorChain;
use crate::properties::PropertyBag;
use crate::reflection::{
    DefaultObjectFactory, DefaultObjectWrapperFactory, DefaultProxyFactory, DefaultReflectorFactory,
    ObjectFactory, ObjectWrapperFactory, ProxyFactory, ReflectorFactory,
};
use crate::session::Environment;
use crate::types::TypeHandlerRegistry;

/// Receiver of every registration the builder makes.
///
/// Owned by the builder until `parse` returns it.
#[derive(Debug)]
pub struct Configuration {
    registry: Arc<ComponentRegistry>,
    pub variables: PropertyBag,
    pub settings: Settings,
    pub type_aliases: TypeAliasRegistry,
    pub type_handlers: TypeHandlerRegistry,
    pub mappers: MapperRegistry,
    pub interceptors: InterceptorChain,
    pub object_factory: Component<dyn ObjectFactory>,
    pub object_wrapper_factory: Component<dyn ObjectWrapperFactory>,
    pub reflector_factory: Component<dyn ReflectorFactory>,
    pub proxy_factory: Component<dyn ProxyFactory>,
    pub vfs_impls: Vec<TypeName>,
    pub log_impl: Option<TypeName>,
    pub environment: Option<Environment>,
    pub database_id: Option<String>,
    /// SQL fragments by namespace-qualified id, shared by every mapper source.
    pub sql_fragments: BTreeMap<String, String>,
    mapped_statements: BTreeMap<String, MappedStatement>,
    loaded_resources: BTreeSet<String>,
}

impl Configuration {
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        let type_aliases = TypeAliasRegistry::seeded_from(&registry);
        Self {
            registry,
            variables: PropertyBag::new(),
            settings: Settings::default(),
            type_aliases,
            type_handlers: TypeHandlerRegistry::new(),
            mappers: MapperRegistry::new(),
            interceptors: InterceptorChain::new(),
            object_factory: Component::new(
                DefaultObjectFactory::TYPE_NAME,
                Box::new(DefaultObjectFactory::default()),
            ),
            object_wrapper_factory: Component::new(
                DefaultObjectWrapperFactory::TYPE_NAME,
                Box::new(DefaultObjectWrapperFactory),
            ),
            reflector_factory: Component::new(
                DefaultReflectorFactory::TYPE_NAME,
                Box::new(DefaultReflectorFactory::default()),
            ),
            proxy_factory: Component::new(DefaultProxyFactory::TYPE_NAME, Box::new(DefaultProxyFactory)),
            vfs_impls: Vec::new(),
            log_impl: None,
            environment: None,
            database_id: None,
            sql_fragments: BTreeMap::new(),
            mapped_statements: BTreeMap::new(),
            loaded_resources: BTreeSet::new(),
        }
    }

    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    /// True when `key` names a setting this configuration accepts.
    pub fn has_setting(&self, key: &str) -> bool {
        Settings::is_known(key)
    }

    pub fn add_mapped_statement(&mut self, statement: MappedStatement) -> Result<(), MapperError> {
        if self.mapped_statements.contains_key(&statement.id) {
            return Err(MapperError::DuplicateStatement { id: statement.id });
        }
        self.mapped_statements.insert(statement.id.clone(), statement);
        Ok(())
    }

    pub fn mapped_statement(&self, id: &str) -> Option<&MappedStatement> {
        self.mapped_statements.get(id)
    }

    pub fn mapped_statements(&self) -> impl Iterator<Item = &MappedStatement> {
        self.mapped_statements.values()
    }

    pub fn is_resource_loaded(&self, resource: &str) -> bool {
        self.loaded_resources.contains(resource)
    }

    pub fn add_loaded_resource(&mut self, resource: &str) {
        self.loaded_resources.insert(resource.to_string());
    }

    pub fn loaded_resources(&self) -> impl Iterator<Item = &str> {
        self.loaded_resources.iter().map(String::as_str)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(Arc::new(ComponentRegistry::with_defaults()))
    }
}
