//! `<settings>`: read and validate early, apply late.
//!
//! # Data Flow
//! ```text
//! <settings> children
//!     → read_settings (every name checked, nothing applied)
//!     → load_vfs_impls / load_log_impl (before aliases are registered)
//!     → apply_settings (after the reflection factories are installed)
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::builder::BuilderError;
use crate::component::{ComponentResolver, TypeName};
use crate::config::schema::{parse_enum, Settings, DEFAULT_LAZY_LOAD_TRIGGER_METHODS};
use crate::config::validation::validate_setting_keys;
use crate::document::ConfigNode;
use crate::properties::PropertyBag;
use crate::reflection::ProxyFactory;
use crate::session::Configuration;

/// Collect `<setting>` pairs, rejecting the whole section if any name is unknown.
pub(crate) fn read_settings(node: Option<&ConfigNode>) -> Result<PropertyBag, BuilderError> {
    let Some(node) = node else {
        return Ok(PropertyBag::new());
    };
    let settings = node.children_as_properties();
    validate_setting_keys(&settings).map_err(|keys| BuilderError::UnknownSetting { keys })?;
    Ok(settings)
}

/// `vfsImpl`: comma-separated fully qualified names, no aliases.
pub(crate) fn load_vfs_impls(settings: &PropertyBag, configuration: &mut Configuration) -> Result<(), BuilderError> {
    let Some(value) = settings.get("vfsImpl") else {
        return Ok(());
    };
    for name in value.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        let type_name = configuration.registry().class_for_name(name)?;
        tracing::debug!(vfs = %type_name, "Custom VFS registered");
        configuration.vfs_impls.push(type_name);
    }
    Ok(())
}

/// `logImpl`: alias-aware type reference.
pub(crate) fn load_log_impl(settings: &PropertyBag, configuration: &mut Configuration) -> Result<(), BuilderError> {
    let registry = Arc::clone(configuration.registry());
    let resolver = ComponentResolver::new(&registry, &configuration.type_aliases);
    if let Some(log_impl) = resolver.resolve_type(settings.get("logImpl"))? {
        configuration.log_impl = Some(log_impl);
    }
    Ok(())
}

/// Typed reads over the declared settings, each with its documented default.
struct SettingValues<'a> {
    values: &'a PropertyBag,
    resolver: ComponentResolver<'a>,
}

impl SettingValues<'_> {
    fn invalid(key: &str, value: &str, reason: impl Into<String>) -> BuilderError {
        BuilderError::InvalidSettingValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    fn boolean(&self, key: &str, default: bool) -> Result<bool, BuilderError> {
        match self.values.get(key) {
            None => Ok(default),
            Some(value) if value.eq_ignore_ascii_case("true") => Ok(true),
            Some(value) if value.eq_ignore_ascii_case("false") => Ok(false),
            Some(value) => Err(Self::invalid(key, value, "expected true or false")),
        }
    }

    fn integer(&self, key: &str) -> Result<Option<i32>, BuilderError> {
        self.values
            .get(key)
            .map(|value| {
                value
                    .trim()
                    .parse()
                    .map_err(|_| Self::invalid(key, value, "expected an integer"))
            })
            .transpose()
    }

    fn enumeration<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, BuilderError> {
        self.values
            .get(key)
            .map(|value| parse_enum(value).map_err(|err| Self::invalid(key, value, err.to_string())))
            .transpose()
    }

    fn string_set(&self, key: &str, default: &str) -> BTreeSet<String> {
        self.values
            .get(key)
            .unwrap_or(default)
            .split(',')
            .map(str::trim)
            .filter(|method| !method.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn type_ref(&self, key: &str) -> Result<Option<TypeName>, BuilderError> {
        Ok(self.resolver.resolve_type(self.values.get(key))?)
    }
}

/// Apply every declared setting over the defaults.
pub(crate) fn apply_settings(settings: &PropertyBag, configuration: &mut Configuration) -> Result<(), BuilderError> {
    let registry = Arc::clone(configuration.registry());
    let resolver = ComponentResolver::new(&registry, &configuration.type_aliases);
    let read = SettingValues {
        values: settings,
        resolver,
    };
    let defaults = Settings::default();

    let proxy_factory = resolver.instantiate::<dyn ProxyFactory>(settings.get("proxyFactory"))?;

    let applied = Settings {
        auto_mapping_behavior: read
            .enumeration("autoMappingBehavior")?
            .unwrap_or(defaults.auto_mapping_behavior),
        auto_mapping_unknown_column_behavior: read
            .enumeration("autoMappingUnknownColumnBehavior")?
            .unwrap_or(defaults.auto_mapping_unknown_column_behavior),
        cache_enabled: read.boolean("cacheEnabled", defaults.cache_enabled)?,
        proxy_factory: proxy_factory
            .as_ref()
            .map(|factory| factory.type_name().clone())
            .unwrap_or(defaults.proxy_factory),
        lazy_loading_enabled: read.boolean("lazyLoadingEnabled", defaults.lazy_loading_enabled)?,
        aggressive_lazy_loading: read.boolean("aggressiveLazyLoading", defaults.aggressive_lazy_loading)?,
        use_column_label: read.boolean("useColumnLabel", defaults.use_column_label)?,
        use_generated_keys: read.boolean("useGeneratedKeys", defaults.use_generated_keys)?,
        default_executor_type: read
            .enumeration("defaultExecutorType")?
            .unwrap_or(defaults.default_executor_type),
        default_statement_timeout: read.integer("defaultStatementTimeout")?,
        default_fetch_size: read.integer("defaultFetchSize")?,
        default_result_set_type: read.enumeration("defaultResultSetType")?,
        map_underscore_to_camel_case: read
            .boolean("mapUnderscoreToCamelCase", defaults.map_underscore_to_camel_case)?,
        safe_row_bounds_enabled: read.boolean("safeRowBoundsEnabled", defaults.safe_row_bounds_enabled)?,
        local_cache_scope: read
            .enumeration("localCacheScope")?
            .unwrap_or(defaults.local_cache_scope),
        jdbc_type_for_null: read
            .enumeration("jdbcTypeForNull")?
            .unwrap_or(defaults.jdbc_type_for_null),
        lazy_load_trigger_methods: read.string_set("lazyLoadTriggerMethods", DEFAULT_LAZY_LOAD_TRIGGER_METHODS),
        safe_result_handler_enabled: read
            .boolean("safeResultHandlerEnabled", defaults.safe_result_handler_enabled)?,
        default_scripting_language: read
            .type_ref("defaultScriptingLanguage")?
            .unwrap_or(defaults.default_scripting_language),
        default_enum_type_handler: read
            .type_ref("defaultEnumTypeHandler")?
            .unwrap_or(defaults.default_enum_type_handler),
        call_setters_on_nulls: read.boolean("callSettersOnNulls", defaults.call_setters_on_nulls)?,
        use_actual_param_name: read.boolean("useActualParamName", defaults.use_actual_param_name)?,
        return_instance_for_empty_row: read
            .boolean("returnInstanceForEmptyRow", defaults.return_instance_for_empty_row)?,
        log_prefix: settings.get("logPrefix").map(str::to_string),
        configuration_factory: read.type_ref("configurationFactory")?,
        shrink_whitespaces_in_sql: read.boolean("shrinkWhitespacesInSql", defaults.shrink_whitespaces_in_sql)?,
        arg_name_based_constructor_auto_mapping: read.boolean(
            "argNameBasedConstructorAutoMapping",
            defaults.arg_name_based_constructor_auto_mapping,
        )?,
        default_sql_provider_type: read.type_ref("defaultSqlProviderType")?,
        nullable_on_for_each: read.boolean("nullableOnForEach", defaults.nullable_on_for_each)?,
    };

    tracing::debug!(declared = settings.len(), "Settings applied");
    configuration.settings = applied;
    if let Some(proxy_factory) = proxy_factory {
        configuration.proxy_factory = proxy_factory;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{AutoMappingBehavior, ExecutorType, ResultSetType};
    use crate::types::JdbcType;

    fn settings_node(pairs: &[(&str, &str)]) -> ConfigNode {
        pairs.iter().fold(ConfigNode::new("settings"), |node, (name, value)| {
            node.with_child(
                ConfigNode::new("setting")
                    .with_attribute("name", *name)
                    .with_attribute("value", *value),
            )
        })
    }

    #[test]
    fn test_read_rejects_all_unknown_keys_at_once() {
        let node = settings_node(&[("cacheEnabled", "false"), ("cacheEnable", "x"), ("lazy", "y")]);
        match read_settings(Some(&node)).unwrap_err() {
            BuilderError::UnknownSetting { keys } => assert_eq!(keys, vec!["cacheEnable", "lazy"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_absent_section_is_empty() {
        assert!(read_settings(None).unwrap().is_empty());
    }

    #[test]
    fn test_apply_typed_values() {
        let mut configuration = Configuration::default();
        let node = settings_node(&[
            ("autoMappingBehavior", "FULL"),
            ("cacheEnabled", "FALSE"),
            ("defaultExecutorType", "BATCH"),
            ("defaultStatementTimeout", "25"),
            ("defaultResultSetType", "FORWARD_ONLY"),
            ("jdbcTypeForNull", "NULL"),
            ("lazyLoadTriggerMethods", "equals, toString"),
            ("defaultScriptingLanguage", "raw"),
            ("logPrefix", "sql."),
        ]);
        let settings = read_settings(Some(&node)).unwrap();
        apply_settings(&settings, &mut configuration).unwrap();

        let applied = &configuration.settings;
        assert_eq!(applied.auto_mapping_behavior, AutoMappingBehavior::Full);
        assert!(!applied.cache_enabled);
        assert_eq!(applied.default_executor_type, ExecutorType::Batch);
        assert_eq!(applied.default_statement_timeout, Some(25));
        assert_eq!(applied.default_result_set_type, Some(ResultSetType::ForwardOnly));
        assert_eq!(applied.jdbc_type_for_null, JdbcType::Null);
        assert_eq!(applied.lazy_load_trigger_methods.len(), 2);
        assert_eq!(
            applied.default_scripting_language.as_str(),
            crate::component::builtin::RAW_LANGUAGE_DRIVER
        );
        assert_eq!(applied.log_prefix.as_deref(), Some("sql."));
        assert!(applied.use_column_label);
    }

    #[test]
    fn test_invalid_values_fail_loudly() {
        for (key, value) in [
            ("cacheEnabled", "yes"),
            ("defaultFetchSize", "many"),
            ("localCacheScope", "GLOBAL"),
        ] {
            let mut configuration = Configuration::default();
            let settings: PropertyBag = [(key, value)].into_iter().collect();
            let err = apply_settings(&settings, &mut configuration).unwrap_err();
            assert!(
                matches!(&err, BuilderError::InvalidSettingValue { key: failed, .. } if failed == key),
                "{key}={value} gave {err}"
            );
        }
    }

    #[test]
    fn test_unresolvable_type_reference() {
        let mut configuration = Configuration::default();
        let settings: PropertyBag = [("defaultEnumTypeHandler", "app.Missing")].into_iter().collect();
        let err = apply_settings(&settings, &mut configuration).unwrap_err();
        assert!(matches!(err, BuilderError::Component(_)));
    }

    #[test]
    fn test_vfs_and_log_impl() {
        let mut configuration = Configuration::default();
        let settings: PropertyBag = [
            ("vfsImpl", "sqlmap.io.DefaultVfs,,"),
            ("logImpl", "TRACING"),
        ]
        .into_iter()
        .collect();
        load_vfs_impls(&settings, &mut configuration).unwrap();
        load_log_impl(&settings, &mut configuration).unwrap();

        assert_eq!(configuration.vfs_impls, vec![TypeName::new("sqlmap.io.DefaultVfs")]);
        assert_eq!(
            configuration.log_impl.as_ref().map(TypeName::as_str),
            Some(crate::component::builtin::TRACING_LOG)
        );
    }

    #[test]
    fn test_vfs_impl_does_not_use_aliases() {
        let mut configuration = Configuration::default();
        let settings: PropertyBag = [("vfsImpl", "TRACING")].into_iter().collect();
        assert!(load_vfs_impls(&settings, &mut configuration).is_err());
    }
}
