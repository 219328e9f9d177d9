//! Alias, plugin, factory, database-id and type-handler sections.
//!
//! Each processor takes the evaluated section node (absent sections are a
//! no-op) and mutates the configuration in place.

use std::sync::Arc;

use crate::builder::BuilderError;
use crate::component::{
    Component, ComponentDescriptor, ComponentError, ComponentRegistry, ComponentResolver, TypeInfo, TypeName,
};
use crate::document::ConfigNode;
use crate::mapping::DatabaseIdProvider;
use crate::plugin::Interceptor;
use crate::reflection::{ObjectFactory, ObjectWrapperFactory, ReflectorFactory};
use crate::session::Configuration;
use crate::types::JdbcType;

const LEGACY_VENDOR_ALIAS: &str = "VENDOR";
const VENDOR_ALIAS: &str = "DB_VENDOR";

pub(crate) fn required<'n>(node: &'n ConfigNode, attribute: &'static str) -> Result<&'n str, BuilderError> {
    node.attribute(attribute)
        .ok_or_else(|| BuilderError::MissingAttribute {
            element: node.name().to_string(),
            attribute,
        })
}

fn descriptor(node: &ConfigNode, attribute: &'static str) -> Result<ComponentDescriptor, BuilderError> {
    ComponentDescriptor::from_node(node, attribute).ok_or_else(|| BuilderError::MissingAttribute {
        element: node.name().to_string(),
        attribute,
    })
}

fn type_info<'r>(registry: &'r ComponentRegistry, type_name: &TypeName) -> Result<&'r TypeInfo, ComponentError> {
    registry
        .get(type_name)
        .ok_or_else(|| ComponentError::ClassResolution {
            name: type_name.to_string(),
        })
}

/// `<typeAliases>`: `<package name>` scans and `<typeAlias type alias?>` entries.
pub(crate) fn type_aliases(node: Option<&ConfigNode>, configuration: &mut Configuration) -> Result<(), BuilderError> {
    let Some(node) = node else {
        return Ok(());
    };
    let registry = Arc::clone(configuration.registry());
    for child in node.children() {
        if child.name() == "package" {
            let package = required(child, "name")?;
            let count = configuration.type_aliases.register_package(package, &registry)?;
            tracing::debug!(package, aliases = count, "Type alias package registered");
            continue;
        }
        let type_name = registry.class_for_name(required(child, "type")?)?;
        match child.attribute("alias") {
            Some(alias) => configuration.type_aliases.register_alias(alias, type_name)?,
            None => configuration
                .type_aliases
                .register_type(type_info(&registry, &type_name)?)?,
        }
    }
    Ok(())
}

/// `<plugins>`: interceptors appended in document order.
pub(crate) fn plugins(node: Option<&ConfigNode>, configuration: &mut Configuration) -> Result<(), BuilderError> {
    let Some(node) = node else {
        return Ok(());
    };
    let registry = Arc::clone(configuration.registry());
    for child in node.children() {
        let descriptor = descriptor(child, "interceptor")?;
        let interceptor = ComponentResolver::new(&registry, &configuration.type_aliases)
            .create::<dyn Interceptor>(&descriptor)?;
        tracing::debug!(interceptor = %interceptor.type_name(), "Interceptor added");
        configuration.interceptors.add(interceptor);
    }
    Ok(())
}

/// `<objectFactory type>` + properties.
pub(crate) fn object_factory(node: Option<&ConfigNode>, configuration: &mut Configuration) -> Result<(), BuilderError> {
    let Some(node) = node else {
        return Ok(());
    };
    let registry = Arc::clone(configuration.registry());
    let factory = ComponentResolver::new(&registry, &configuration.type_aliases)
        .create::<dyn ObjectFactory>(&descriptor(node, "type")?)?;
    configuration.object_factory = factory;
    Ok(())
}

fn construct_unconfigured<T>(node: &ConfigNode, configuration: &Configuration) -> Result<Component<T>, BuilderError>
where
    T: ?Sized + crate::component::Capability,
{
    let resolver = ComponentResolver::new(configuration.registry(), &configuration.type_aliases);
    let type_name = resolver.resolve_alias(required(node, "type")?)?;
    Ok(resolver.construct::<T>(&type_name)?)
}

/// `<objectWrapperFactory type>`; constructed without properties.
pub(crate) fn object_wrapper_factory(
    node: Option<&ConfigNode>,
    configuration: &mut Configuration,
) -> Result<(), BuilderError> {
    if let Some(node) = node {
        configuration.object_wrapper_factory = construct_unconfigured::<dyn ObjectWrapperFactory>(node, configuration)?;
    }
    Ok(())
}

/// `<reflectorFactory type>`; constructed without properties.
pub(crate) fn reflector_factory(node: Option<&ConfigNode>, configuration: &mut Configuration) -> Result<(), BuilderError> {
    if let Some(node) = node {
        configuration.reflector_factory = construct_unconfigured::<dyn ReflectorFactory>(node, configuration)?;
    }
    Ok(())
}

/// `<databaseIdProvider type>` + properties. The id is computed only when an
/// environment is installed.
pub(crate) fn database_id_provider(
    node: Option<&ConfigNode>,
    configuration: &mut Configuration,
) -> Result<(), BuilderError> {
    let Some(node) = node else {
        return Ok(());
    };
    let mut descriptor = descriptor(node, "type")?;
    if descriptor.type_name == LEGACY_VENDOR_ALIAS {
        descriptor.type_name = VENDOR_ALIAS.to_string();
    }
    let registry = Arc::clone(configuration.registry());
    let provider = ComponentResolver::new(&registry, &configuration.type_aliases)
        .create::<dyn DatabaseIdProvider>(&descriptor)?;

    if let Some(environment) = &configuration.environment {
        let database_id = provider.database_id(environment.data_source().as_ref())?;
        tracing::info!(
            provider = %provider.type_name(),
            database_id = database_id.as_deref().unwrap_or("<none>"),
            "Database id resolved"
        );
        configuration.database_id = database_id;
    }
    Ok(())
}

/// `<typeHandlers>`: package scans and explicit `<typeHandler>` entries.
pub(crate) fn type_handlers(node: Option<&ConfigNode>, configuration: &mut Configuration) -> Result<(), BuilderError> {
    let Some(node) = node else {
        return Ok(());
    };
    let registry = Arc::clone(configuration.registry());
    for child in node.children() {
        if child.name() == "package" {
            let package = required(child, "name")?;
            let count = configuration.type_handlers.register_package(package, &registry)?;
            tracing::debug!(package, handlers = count, "Type handler package registered");
            continue;
        }

        let resolver = ComponentResolver::new(&registry, &configuration.type_aliases);
        let java_type = resolver.resolve_type(child.attribute("javaType"))?;
        let jdbc_type = child
            .attribute("jdbcType")
            .map(|value| {
                value.parse::<JdbcType>().map_err(|_| BuilderError::InvalidAttribute {
                    element: child.name().to_string(),
                    attribute: "jdbcType",
                    value: value.to_string(),
                })
            })
            .transpose()?;
        let handler_name = resolver.resolve_alias(required(child, "handler")?)?;
        let handler = type_info(&registry, &handler_name)?;

        let handlers = &mut configuration.type_handlers;
        match (java_type, jdbc_type) {
            (Some(java_type), Some(jdbc_type)) => {
                handlers.register_for_java_and_jdbc_type(java_type, jdbc_type, handler)?
            }
            (Some(java_type), None) => handlers.register_for_java_type(java_type, handler)?,
            (None, _) => handlers.register(handler)?,
        }
    }
    Ok(())
}
