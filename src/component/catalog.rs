//! Type identities and metadata.

use std::fmt;

use serde::Serialize;

use crate::types::JdbcType;

/// Fully qualified, dot-separated type identity (e.g. `com.example.AuditPlugin`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last dot-separated segment.
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Everything before the last dot, if any.
    pub fn package(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(package, _)| package)
    }

    /// True when the type lives in `package` or one of its sub-packages.
    pub fn is_in_package(&self, package: &str) -> bool {
        self.package().is_some_and(|own| {
            own == package
                || (own.len() > package.len()
                    && own.starts_with(package)
                    && own.as_bytes()[package.len()] == b'.')
        })
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// What kind of type a catalog entry describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// A concrete type (value types, components, marker types).
    Class,
    /// A mapper interface: registered with the mapper registry, never aliased by a package scan.
    Mapper,
    /// A type handler, optionally declaring the types it handles.
    TypeHandler {
        mapped_types: Vec<TypeName>,
        mapped_jdbc_types: Vec<JdbcType>,
    },
}

/// Catalog entry for one registered type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    name: TypeName,
    alias: Option<String>,
    kind: TypeKind,
}

impl TypeInfo {
    pub fn class(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            kind: TypeKind::Class,
        }
    }

    pub fn mapper(name: impl Into<TypeName>) -> Self {
        Self {
            kind: TypeKind::Mapper,
            ..Self::class(name)
        }
    }

    pub fn type_handler(name: impl Into<TypeName>) -> Self {
        Self {
            kind: TypeKind::TypeHandler {
                mapped_types: Vec::new(),
                mapped_jdbc_types: Vec::new(),
            },
            ..Self::class(name)
        }
    }

    /// Declared alias used by package scans instead of the simple name.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Declare a type this handler converts. No-op for other kinds.
    pub fn handling(mut self, java_type: impl Into<TypeName>) -> Self {
        if let TypeKind::TypeHandler { mapped_types, .. } = &mut self.kind {
            mapped_types.push(java_type.into());
        }
        self
    }

    /// Declare a column type this handler converts. No-op for other kinds.
    pub fn handling_jdbc(mut self, jdbc_type: JdbcType) -> Self {
        if let TypeKind::TypeHandler {
            mapped_jdbc_types, ..
        } = &mut self.kind
        {
            mapped_jdbc_types.push(jdbc_type);
        }
        self
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Alias a package scan registers this type under.
    pub fn effective_alias(&self) -> &str {
        self.alias
            .as_deref()
            .unwrap_or_else(|| self.name.simple_name())
    }

    pub fn is_mapper(&self) -> bool {
        matches!(self.kind, TypeKind::Mapper)
    }

    pub fn is_type_handler(&self) -> bool {
        matches!(self.kind, TypeKind::TypeHandler { .. })
    }
}
