//! Object, wrapper and reflector factories.

use std::fmt;

use crate::component::{Capability, Configurable, PropertyError, TypeName};
use crate::properties::PropertyBag;

/// Creates result objects.
pub trait ObjectFactory: Configurable + fmt::Debug + Send + Sync {
    /// Whether values of `type_name` are collections.
    fn is_collection(&self, type_name: &TypeName) -> bool;
}

impl Capability for dyn ObjectFactory {
    const NAME: &'static str = "object factory";
}

/// Wraps result objects for property access.
pub trait ObjectWrapperFactory: Configurable + fmt::Debug + Send + Sync {
    fn has_wrapper_for(&self, type_name: &TypeName) -> bool;
}

impl Capability for dyn ObjectWrapperFactory {
    const NAME: &'static str = "object wrapper factory";
}

/// Caches per-type accessor metadata.
pub trait ReflectorFactory: Configurable + fmt::Debug + Send + Sync {
    fn is_class_cache_enabled(&self) -> bool;
    fn set_class_cache_enabled(&mut self, enabled: bool);
}

impl Capability for dyn ReflectorFactory {
    const NAME: &'static str = "reflector factory";
}

/// Default object factory.
///
/// Accepts one property, `collectionTypes`, a comma-separated list of extra
/// type names treated as collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultObjectFactory {
    collection_types: Vec<TypeName>,
}

impl DefaultObjectFactory {
    pub const TYPE_NAME: &'static str = "sqlmap.reflection.DefaultObjectFactory";
}

impl Default for DefaultObjectFactory {
    fn default() -> Self {
        Self {
            collection_types: ["List", "Collection", "Set"]
                .into_iter()
                .map(TypeName::new)
                .collect(),
        }
    }
}

impl Configurable for DefaultObjectFactory {
    fn set_properties(&mut self, properties: &PropertyBag) -> Result<(), PropertyError> {
        for (key, value) in properties.iter() {
            match key {
                "collectionTypes" => self.collection_types.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(TypeName::new),
                ),
                other => return Err(PropertyError::unknown(other)),
            }
        }
        Ok(())
    }
}

impl ObjectFactory for DefaultObjectFactory {
    fn is_collection(&self, type_name: &TypeName) -> bool {
        self.collection_types.contains(type_name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultObjectWrapperFactory;

impl DefaultObjectWrapperFactory {
    pub const TYPE_NAME: &'static str = "sqlmap.reflection.DefaultObjectWrapperFactory";
}

impl Configurable for DefaultObjectWrapperFactory {}

impl ObjectWrapperFactory for DefaultObjectWrapperFactory {
    fn has_wrapper_for(&self, _type_name: &TypeName) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultReflectorFactory {
    class_cache_enabled: bool,
}

impl DefaultReflectorFactory {
    pub const TYPE_NAME: &'static str = "sqlmap.reflection.DefaultReflectorFactory";
}

impl Default for DefaultReflectorFactory {
    fn default() -> Self {
        Self {
            class_cache_enabled: true,
        }
    }
}

impl Configurable for DefaultReflectorFactory {}

impl ReflectorFactory for DefaultReflectorFactory {
    fn is_class_cache_enabled(&self) -> bool {
        self.class_cache_enabled
    }

    fn set_class_cache_enabled(&mut self, enabled: bool) {
        self.class_cache_enabled = enabled;
    }
}
