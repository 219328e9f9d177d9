//! Type aliases.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::component::catalog::{TypeInfo, TypeName};
use crate::component::ComponentRegistry;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AliasError {
    #[error("the alias '{alias}' is already mapped to the value '{existing}'")]
    Conflict {
        alias: String,
        existing: TypeName,
        requested: TypeName,
    },
}

/// Case-insensitive alias → type table.
#[derive(Debug, Clone, Default)]
pub struct TypeAliasRegistry {
    aliases: BTreeMap<String, TypeName>,
}

impl TypeAliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the built-in aliases of `registry`.
    pub fn seeded_from(registry: &ComponentRegistry) -> Self {
        Self {
            aliases: registry.builtin_aliases().clone(),
        }
    }

    pub fn resolve(&self, alias: &str) -> Option<&TypeName> {
        self.aliases.get(&alias.to_lowercase())
    }

    /// Map `alias` to `type_name`. Re-registering the same mapping is allowed.
    pub fn register_alias(&mut self, alias: &str, type_name: TypeName) -> Result<(), AliasError> {
        let key = alias.to_lowercase();
        match self.aliases.get(&key) {
            Some(existing) if *existing != type_name => Err(AliasError::Conflict {
                alias: key,
                existing: existing.clone(),
                requested: type_name,
            }),
            Some(_) => Ok(()),
            None => {
                self.aliases.insert(key, type_name);
                Ok(())
            }
        }
    }

    /// Register a type under its declared alias or its simple name.
    pub fn register_type(&mut self, info: &TypeInfo) -> Result<(), AliasError> {
        self.register_alias(info.effective_alias(), info.name().clone())
    }

    /// Alias every non-mapper type under `package`. Returns the number registered.
    pub fn register_package(
        &mut self,
        package: &str,
        registry: &ComponentRegistry,
    ) -> Result<usize, AliasError> {
        let mut count = 0;
        for info in registry.types_in_package(package).filter(|info| !info.is_mapper()) {
            self.register_type(info)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn aliases(&self) -> &BTreeMap<String, TypeName> {
        &self.aliases
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
