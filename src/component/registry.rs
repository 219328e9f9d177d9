//! Capability-typed component registry.
//!
//! # Responsibilities
//! - Catalog every type a configuration document may name
//! - Hold one factory per (capability, type) pair
//! - Seed aliases for built-in components
//!
//! # Design Decisions
//! - Factories are stored type-erased and keyed by the `TypeId` of the
//!   capability trait object, so one type can be registered under several
//!   capabilities
//! - The registry is populated once at process start and shared read-only
//!   (`Arc<ComponentRegistry>`)

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::component::catalog::{TypeInfo, TypeName};
use crate::component::ComponentError;

/// A pluggable role a type can be instantiated as (e.g. `dyn Interceptor`).
pub trait Capability: 'static {
    /// Human-readable capability name for error messages.
    const NAME: &'static str;
}

type Factory<T> = Arc<dyn Fn() -> Box<T> + Send + Sync>;

/// Registration table of types, factories and built-in aliases.
#[derive(Default)]
pub struct ComponentRegistry {
    types: BTreeMap<TypeName, TypeInfo>,
    factories: HashMap<(TypeId, TypeName), Box<dyn Any + Send + Sync>>,
    aliases: BTreeMap<String, TypeName>,
}

impl ComponentRegistry {
    /// Empty registry without built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in component and alias.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        crate::component::builtin::register_defaults(&mut registry);
        registry
    }

    /// Add or replace catalog metadata for a type.
    pub fn register_type(&mut self, info: TypeInfo) -> &mut Self {
        self.types.insert(info.name().clone(), info);
        self
    }

    /// Register a no-argument factory for `name` under capability `T`.
    ///
    /// The type is added to the catalog as a plain class when not yet known.
    pub fn register_component<T, F>(&mut self, name: impl Into<TypeName>, factory: F) -> &mut Self
    where
        T: ?Sized + Capability,
        F: Fn() -> Box<T> + Send + Sync + 'static,
    {
        let name = name.into();
        self.types
            .entry(name.clone())
            .or_insert_with(|| TypeInfo::class(name.clone()));
        let factory: Factory<T> = Arc::new(factory);
        self.factories
            .insert((TypeId::of::<T>(), name), Box::new(factory));
        self
    }

    /// Seed an alias copied into every new type-alias registry.
    pub fn register_alias(&mut self, alias: &str, name: impl Into<TypeName>) -> &mut Self {
        self.aliases.insert(alias.to_lowercase(), name.into());
        self
    }

    pub fn get(&self, name: &TypeName) -> Option<&TypeInfo> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &TypeName) -> bool {
        self.types.contains_key(name)
    }

    /// Strict lookup of a fully qualified name, without alias resolution.
    pub fn class_for_name(&self, name: &str) -> Result<TypeName, ComponentError> {
        let name = TypeName::new(name);
        if self.types.contains_key(&name) {
            Ok(name)
        } else {
            Err(ComponentError::ClassResolution {
                name: name.as_str().to_string(),
            })
        }
    }

    /// True when `name` can be constructed as `T`.
    pub fn supports<T: ?Sized + Capability>(&self, name: &TypeName) -> bool {
        self.factories
            .contains_key(&(TypeId::of::<T>(), name.clone()))
    }

    /// Construct a fresh `T` from the factory registered for `name`.
    pub fn instantiate<T: ?Sized + Capability>(&self, name: &TypeName) -> Result<Box<T>, ComponentError> {
        if !self.contains(name) {
            return Err(ComponentError::ClassResolution {
                name: name.as_str().to_string(),
            });
        }
        let factory = self
            .factories
            .get(&(TypeId::of::<T>(), name.clone()))
            .and_then(|erased| erased.downcast_ref::<Factory<T>>())
            .ok_or_else(|| ComponentError::Instantiation {
                type_name: name.clone(),
                capability: T::NAME,
            })?;
        Ok((factory.as_ref())())
    }

    /// Every catalog entry in `package` or its sub-packages.
    pub fn types_in_package<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a TypeInfo> + 'a {
        self.types
            .values()
            .filter(move |info| info.name().is_in_package(package))
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeInfo> {
        self.types.values()
    }

    pub fn builtin_aliases(&self) -> &BTreeMap<String, TypeName> {
        &self.aliases
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("types", &self.types.len())
            .field("factories", &self.factories.len())
            .field("aliases", &self.aliases.len())
            .finish()
    }
}
