//! Type handler registrations.

use serde::Serialize;
use thiserror::Error;

use crate::component::{ComponentRegistry, TypeInfo, TypeKind, TypeName};
use crate::types::JdbcType;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeHandlerError {
    #[error("'{type_name}' is not a type handler")]
    NotATypeHandler { type_name: TypeName },
}

/// Which registration form produced a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationForm {
    /// Handler alone; the handler declares what it handles.
    Handler,
    /// Handler for one value type.
    JavaType,
    /// Handler for one value type and one column type.
    JavaAndJdbcType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeHandlerBinding {
    pub java_type: Option<TypeName>,
    pub jdbc_type: Option<JdbcType>,
    pub handler: TypeName,
    pub form: RegistrationForm,
}

/// Handler bindings in registration order.
#[derive(Debug, Clone, Default)]
pub struct TypeHandlerRegistry {
    bindings: Vec<TypeHandlerBinding>,
}

fn handler_metadata(handler: &TypeInfo) -> Result<(&[TypeName], &[JdbcType]), TypeHandlerError> {
    match handler.kind() {
        TypeKind::TypeHandler {
            mapped_types,
            mapped_jdbc_types,
        } => Ok((mapped_types, mapped_jdbc_types)),
        _ => Err(TypeHandlerError::NotATypeHandler {
            type_name: handler.name().clone(),
        }),
    }
}

impl TypeHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler by itself, using the value and column types it
    /// declares (none declared registers a catch-all binding).
    pub fn register(&mut self, handler: &TypeInfo) -> Result<(), TypeHandlerError> {
        let (mapped_types, _) = handler_metadata(handler)?;
        if mapped_types.is_empty() {
            self.push_for_jdbc_types(None, handler, RegistrationForm::Handler)?;
        } else {
            for java_type in mapped_types.to_vec() {
                self.push_for_jdbc_types(Some(java_type), handler, RegistrationForm::Handler)?;
            }
        }
        Ok(())
    }

    /// Register a handler for one value type; column types come from the
    /// handler's declaration.
    pub fn register_for_java_type(
        &mut self,
        java_type: TypeName,
        handler: &TypeInfo,
    ) -> Result<(), TypeHandlerError> {
        self.push_for_jdbc_types(Some(java_type), handler, RegistrationForm::JavaType)
    }

    /// Register a handler for an explicit value/column type pair.
    pub fn register_for_java_and_jdbc_type(
        &mut self,
        java_type: TypeName,
        jdbc_type: JdbcType,
        handler: &TypeInfo,
    ) -> Result<(), TypeHandlerError> {
        handler_metadata(handler)?;
        self.bindings.push(TypeHandlerBinding {
            java_type: Some(java_type),
            jdbc_type: Some(jdbc_type),
            handler: handler.name().clone(),
            form: RegistrationForm::JavaAndJdbcType,
        });
        Ok(())
    }

    /// Register every type handler in `package`. Returns the number of handlers.
    pub fn register_package(
        &mut self,
        package: &str,
        registry: &ComponentRegistry,
    ) -> Result<usize, TypeHandlerError> {
        let handlers: Vec<&TypeInfo> = registry
            .types_in_package(package)
            .filter(|info| info.is_type_handler())
            .collect();
        for handler in &handlers {
            self.register(handler)?;
        }
        Ok(handlers.len())
    }

    fn push_for_jdbc_types(
        &mut self,
        java_type: Option<TypeName>,
        handler: &TypeInfo,
        form: RegistrationForm,
    ) -> Result<(), TypeHandlerError> {
        let (_, jdbc_types) = handler_metadata(handler)?;
        if jdbc_types.is_empty() {
            self.bindings.push(TypeHandlerBinding {
                java_type,
                jdbc_type: None,
                handler: handler.name().clone(),
                form,
            });
        } else {
            for jdbc_type in jdbc_types {
                self.bindings.push(TypeHandlerBinding {
                    java_type: java_type.clone(),
                    jdbc_type: Some(*jdbc_type),
                    handler: handler.name().clone(),
                    form,
                });
            }
        }
        Ok(())
    }

    /// Most specific handler for a value/column type pair.
    pub fn handler_for(&self, java_type: &TypeName, jdbc_type: Option<JdbcType>) -> Option<&TypeName> {
        let for_java = || {
            self.bindings
                .iter()
                .filter(move |b| b.java_type.as_ref() == Some(java_type))
        };
        for_java()
            .find(|b| b.jdbc_type == jdbc_type)
            .or_else(|| for_java().find(|b| b.jdbc_type.is_none()))
            .map(|b| &b.handler)
    }

    pub fn bindings(&self) -> &[TypeHandlerBinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_describing_handler() {
        let handler = TypeInfo::type_handler("app.handlers.MoneyHandler")
            .handling("app.Money")
            .handling_jdbc(JdbcType::Decimal);

        let mut registry = TypeHandlerRegistry::new();
        registry.register(&handler).unwrap();

        assert_eq!(registry.len(), 1);
        let binding = &registry.bindings()[0];
        assert_eq!(binding.java_type, Some(TypeName::new("app.Money")));
        assert_eq!(binding.jdbc_type, Some(JdbcType::Decimal));
        assert_eq!(binding.form, RegistrationForm::Handler);
    }

    #[test]
    fn test_undeclared_handler_registers_catch_all() {
        let handler = TypeInfo::type_handler("app.handlers.JsonHandler");
        let mut registry = TypeHandlerRegistry::new();
        registry.register(&handler).unwrap();

        let binding = &registry.bindings()[0];
        assert_eq!(binding.java_type, None);
        assert_eq!(binding.jdbc_type, None);
    }

    #[test]
    fn test_handler_for_prefers_exact_jdbc_type() {
        let generic = TypeInfo::type_handler("h.Generic");
        let varchar = TypeInfo::type_handler("h.Varchar");
        let mut registry = TypeHandlerRegistry::new();
        registry
            .register_for_java_type(TypeName::new("String"), &generic)
            .unwrap();
        registry
            .register_for_java_and_jdbc_type(TypeName::new("String"), JdbcType::Varchar, &varchar)
            .unwrap();

        let string = TypeName::new("String");
        assert_eq!(
            registry.handler_for(&string, Some(JdbcType::Varchar)).map(TypeName::as_str),
            Some("h.Varchar")
        );
        assert_eq!(
            registry.handler_for(&string, Some(JdbcType::Clob)).map(TypeName::as_str),
            Some("h.Generic")
        );
        assert!(registry.handler_for(&TypeName::new("i32"), None).is_none());
    }

    #[test]
    fn test_rejects_non_handler() {
        let mut registry = TypeHandlerRegistry::new();
        let err = registry.register(&TypeInfo::class("app.Money")).unwrap_err();
        assert!(matches!(err, TypeHandlerError::NotATypeHandler { .. }));
    }
}
