//! Registered mapper interfaces.

use std::collections::BTreeSet;

use crate::component::{ComponentRegistry, TypeInfo, TypeName};
use crate::mapping::MapperError;

#[derive(Debug, Clone, Default)]
pub struct MapperRegistry {
    mappers: BTreeSet<TypeName>,
}

impl MapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one mapper interface. Registering a type twice is an error;
    /// a type that is not a mapper interface is skipped and reported as `false`.
    pub fn add_mapper(&mut self, info: &TypeInfo) -> Result<bool, MapperError> {
        if !info.is_mapper() {
            return Ok(false);
        }
        if !self.mappers.insert(info.name().clone()) {
            return Err(MapperError::DuplicateMapper {
                type_name: info.name().clone(),
            });
        }
        Ok(true)
    }

    /// Register every mapper interface in `package` and its sub-packages.
    pub fn add_mappers(&mut self, package: &str, registry: &ComponentRegistry) -> Result<usize, MapperError> {
        let mut added = 0;
        for info in registry.types_in_package(package) {
            if self.add_mapper(info)? {
                added += 1;
            }
        }
        Ok(added)
    }

    pub fn has_mapper(&self, type_name: &TypeName) -> bool {
        self.mappers.contains(type_name)
    }

    pub fn mappers(&self) -> impl Iterator<Item = &TypeName> {
        self.mappers.iter()
    }

    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }
}
