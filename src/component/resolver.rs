//! Resolve → construct → configure.
//!
//! # Responsibilities
//! - Turn a type name or alias into a catalog identity
//! - Construct a fresh instance for a capability
//! - Apply the declared property bag
//!
//! # Design Decisions
//! - The same protocol serves plugins, factories, environments and the
//!   database-id provider; only the capability type parameter differs
//! - Type-reference settings stop after resolution and never construct

use std::fmt;
use std::ops::{Deref, DerefMut};

use thiserror::Error;

use crate::component::catalog::TypeName;
use crate::component::{Capability, ComponentRegistry, TypeAliasRegistry};
use crate::document::ConfigNode;
use crate::properties::PropertyBag;

/// Errors raised by the dynamic component protocol.
#[derive(Debug, Error)]
pub enum ComponentError {
    /// Neither an alias nor a registered type.
    #[error("cannot resolve type '{name}': no alias or registered type with that name")]
    ClassResolution { name: String },

    /// Known type without a no-argument factory for the capability.
    #[error("type '{type_name}' cannot be instantiated as {capability}")]
    Instantiation {
        type_name: TypeName,
        capability: &'static str,
    },

    /// The instance rejected its properties.
    #[error("failed to configure '{type_name}': {source}")]
    Configure {
        type_name: TypeName,
        #[source]
        source: PropertyError,
    },
}

/// A property a component could not accept.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid property '{key}': {reason}")]
pub struct PropertyError {
    pub key: String,
    pub reason: String,
}

impl PropertyError {
    pub fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown(key: &str) -> Self {
        Self::new(key, "unknown property")
    }
}

/// Components that accept a property bag after construction.
///
/// The default implementation ignores the bag.
pub trait Configurable {
    fn set_properties(&mut self, properties: &PropertyBag) -> Result<(), PropertyError> {
        let _ = properties;
        Ok(())
    }
}

/// A constructed component together with the type it was built from.
pub struct Component<T: ?Sized> {
    type_name: TypeName,
    instance: Box<T>,
}

impl<T: ?Sized> Component<T> {
    pub fn new(type_name: impl Into<TypeName>, instance: Box<T>) -> Self {
        Self {
            type_name: type_name.into(),
            instance,
        }
    }

    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    pub fn into_inner(self) -> Box<T> {
        self.instance
    }
}

impl<T: ?Sized> Deref for Component<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.instance
    }
}

impl<T: ?Sized> DerefMut for Component<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.instance
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Component<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("type_name", &self.type_name)
            .field("instance", &&*self.instance)
            .finish()
    }
}

/// `(type name or alias, properties)` pair read from a document node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescriptor {
    pub type_name: String,
    pub properties: PropertyBag,
}

impl ComponentDescriptor {
    pub fn new(type_name: impl Into<String>, properties: PropertyBag) -> Self {
        Self {
            type_name: type_name.into(),
            properties,
        }
    }

    /// Read the type from `attribute` and the properties from the children.
    pub fn from_node(node: &ConfigNode, attribute: &str) -> Option<Self> {
        node.attribute(attribute)
            .map(|type_name| Self::new(type_name, node.children_as_properties()))
    }
}

/// Borrowed view combining the type catalog with the live alias table.
#[derive(Clone, Copy)]
pub struct ComponentResolver<'a> {
    registry: &'a ComponentRegistry,
    aliases: &'a TypeAliasRegistry,
}

impl<'a> ComponentResolver<'a> {
    pub fn new(registry: &'a ComponentRegistry, aliases: &'a TypeAliasRegistry) -> Self {
        Self { registry, aliases }
    }

    /// Alias first, then strict type-name lookup.
    pub fn resolve_alias(&self, name: &str) -> Result<TypeName, ComponentError> {
        match self.aliases.resolve(name) {
            Some(type_name) => Ok(type_name.clone()),
            None => self.registry.class_for_name(name),
        }
    }

    /// `None` passes through; anything else must resolve.
    pub fn resolve_type(&self, name: Option<&str>) -> Result<Option<TypeName>, ComponentError> {
        name.map(|name| self.resolve_alias(name)).transpose()
    }

    /// Strict lookup, aliases ignored.
    pub fn class_for_name(&self, name: &str) -> Result<TypeName, ComponentError> {
        self.registry.class_for_name(name)
    }

    pub fn construct<T: ?Sized + Capability>(&self, type_name: &TypeName) -> Result<Component<T>, ComponentError> {
        let instance = self.registry.instantiate::<T>(type_name)?;
        Ok(Component::new(type_name.clone(), instance))
    }

    /// Resolve and construct without configuring; `None` passes through.
    pub fn instantiate<T: ?Sized + Capability>(
        &self,
        name: Option<&str>,
    ) -> Result<Option<Component<T>>, ComponentError> {
        match self.resolve_type(name)? {
            Some(type_name) => self.construct(&type_name).map(Some),
            None => Ok(None),
        }
    }

    /// The full protocol: resolve the descriptor's type, construct it and
    /// apply its properties.
    pub fn create<T>(&self, descriptor: &ComponentDescriptor) -> Result<Component<T>, ComponentError>
    where
        T: ?Sized + Capability + Configurable,
    {
        let type_name = self.resolve_alias(&descriptor.type_name)?;
        let mut component = self.construct::<T>(&type_name)?;
        component
            .set_properties(&descriptor.properties)
            .map_err(|source| ComponentError::Configure {
                type_name: type_name.clone(),
                source,
            })?;
        tracing::debug!(
            capability = T::NAME,
            type_name = %type_name,
            properties = descriptor.properties.len(),
            "Component created"
        );
        Ok(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    trait Widget: Configurable + Send + Sync {}

    impl Capability for dyn Widget {
        const NAME: &'static str = "widget";
    }

    struct Recorder(Arc<Mutex<Vec<PropertyBag>>>);

    impl Configurable for Recorder {
        fn set_properties(&mut self, properties: &PropertyBag) -> Result<(), PropertyError> {
            if properties.contains_key("bad") {
                return Err(PropertyError::unknown("bad"));
            }
            self.0.lock().unwrap().push(properties.clone());
            Ok(())
        }
    }

    impl Widget for Recorder {}

    fn setup() -> (ComponentRegistry, TypeAliasRegistry, Arc<Mutex<Vec<PropertyBag>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = seen.clone();
        let mut registry = ComponentRegistry::new();
        registry
            .register_component::<dyn Widget, _>("test.Recorder", move || {
                Box::new(Recorder(captured.clone()))
            })
            .register_alias("REC", "test.Recorder");
        let aliases = TypeAliasRegistry::seeded_from(&registry);
        (registry, aliases, seen)
    }

    #[test]
    fn test_create_by_alias_applies_properties() {
        let (registry, aliases, seen) = setup();
        let resolver = ComponentResolver::new(&registry, &aliases);
        let descriptor = ComponentDescriptor::new("rec", [("level", "3")].into_iter().collect());

        let widget = resolver.create::<dyn Widget>(&descriptor).unwrap();
        assert_eq!(widget.type_name().as_str(), "test.Recorder");
        assert_eq!(seen.lock().unwrap()[0].get("level"), Some("3"));
    }

    #[test]
    fn test_create_applies_empty_bag() {
        let (registry, aliases, seen) = setup();
        let resolver = ComponentResolver::new(&registry, &aliases);

        resolver
            .create::<dyn Widget>(&ComponentDescriptor::new("test.Recorder", PropertyBag::new()))
            .unwrap();
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(seen.lock().unwrap()[0].is_empty());
    }

    #[test]
    fn test_rejected_property_is_configure_error() {
        let (registry, aliases, _) = setup();
        let resolver = ComponentResolver::new(&registry, &aliases);
        let descriptor = ComponentDescriptor::new("REC", [("bad", "x")].into_iter().collect());

        let err = resolver.create::<dyn Widget>(&descriptor).err().unwrap();
        assert!(matches!(err, ComponentError::Configure { source, .. } if source.key == "bad"));
    }

    #[test]
    fn test_resolve_type_passes_none_through() {
        let (registry, aliases, _) = setup();
        let resolver = ComponentResolver::new(&registry, &aliases);

        assert!(resolver.resolve_type(None).unwrap().is_none());
        assert!(matches!(
            resolver.resolve_type(Some("nope")),
            Err(ComponentError::ClassResolution { .. })
        ));
    }

    #[test]
    fn test_class_for_name_ignores_aliases() {
        let (registry, aliases, _) = setup();
        let resolver = ComponentResolver::new(&registry, &aliases);

        assert!(resolver.class_for_name("REC").is_err());
        assert!(resolver.class_for_name("test.Recorder").is_ok());
    }
}
