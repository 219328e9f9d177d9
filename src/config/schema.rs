//! Settings schema definitions.
//!
//! Every `<setting name="…">` the builder accepts is a field here, with the
//! documented default in `Default`. Field names serialize in the same
//! camelCase the document uses.

use std::collections::BTreeSet;

use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Serialize};

use crate::component::builtin::{ENUM_TYPE_HANDLER, XML_LANGUAGE_DRIVER};
use crate::component::TypeName;
use crate::reflection::DefaultProxyFactory;
use crate::types::JdbcType;

/// How result columns are mapped onto properties automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutoMappingBehavior {
    None,
    Partial,
    Full,
}

/// Reaction to a result column with no matching property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutoMappingUnknownColumnBehavior {
    None,
    Warning,
    Failing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutorType {
    Simple,
    Reuse,
    Batch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocalCacheScope {
    Session,
    Statement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultSetType {
    Default,
    ForwardOnly,
    ScrollInsensitive,
    ScrollSensitive,
}

/// Parse an upper-case enum name such as `PARTIAL` or `FORWARD_ONLY`.
pub fn parse_enum<T: DeserializeOwned>(value: &str) -> Result<T, ValueError> {
    let deserializer: StrDeserializer<'_, ValueError> = value.into_deserializer();
    T::deserialize(deserializer)
}

/// Runtime behaviour switches read from `<settings>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub auto_mapping_behavior: AutoMappingBehavior,
    pub auto_mapping_unknown_column_behavior: AutoMappingUnknownColumnBehavior,
    pub cache_enabled: bool,
    pub proxy_factory: TypeName,
    pub lazy_loading_enabled: bool,
    pub aggressive_lazy_loading: bool,
    pub use_column_label: bool,
    pub use_generated_keys: bool,
    pub default_executor_type: ExecutorType,
    pub default_statement_timeout: Option<i32>,
    pub default_fetch_size: Option<i32>,
    pub default_result_set_type: Option<ResultSetType>,
    pub map_underscore_to_camel_case: bool,
    pub safe_row_bounds_enabled: bool,
    pub local_cache_scope: LocalCacheScope,
    pub jdbc_type_for_null: JdbcType,
    pub lazy_load_trigger_methods: BTreeSet<String>,
    pub safe_result_handler_enabled: bool,
    pub default_scripting_language: TypeName,
    pub default_enum_type_handler: TypeName,
    pub call_setters_on_nulls: bool,
    pub use_actual_param_name: bool,
    pub return_instance_for_empty_row: bool,
    pub log_prefix: Option<String>,
    pub configuration_factory: Option<TypeName>,
    pub shrink_whitespaces_in_sql: bool,
    pub arg_name_based_constructor_auto_mapping: bool,
    pub default_sql_provider_type: Option<TypeName>,
    pub nullable_on_for_each: bool,
}

impl Settings {
    /// Setting names a document may declare, in document spelling.
    pub const KNOWN_KEYS: &'static [&'static str] = &[
        "autoMappingBehavior",
        "autoMappingUnknownColumnBehavior",
        "cacheEnabled",
        "proxyFactory",
        "lazyLoadingEnabled",
        "aggressiveLazyLoading",
        "useColumnLabel",
        "useGeneratedKeys",
        "defaultExecutorType",
        "defaultStatementTimeout",
        "defaultFetchSize",
        "defaultResultSetType",
        "mapUnderscoreToCamelCase",
        "safeRowBoundsEnabled",
        "localCacheScope",
        "jdbcTypeForNull",
        "lazyLoadTriggerMethods",
        "safeResultHandlerEnabled",
        "defaultScriptingLanguage",
        "defaultEnumTypeHandler",
        "callSettersOnNulls",
        "useActualParamName",
        "returnInstanceForEmptyRow",
        "logPrefix",
        "configurationFactory",
        "shrinkWhitespacesInSql",
        "argNameBasedConstructorAutoMapping",
        "defaultSqlProviderType",
        "nullableOnForEach",
        "vfsImpl",
        "logImpl",
    ];

    pub fn is_known(key: &str) -> bool {
        Self::KNOWN_KEYS.contains(&key)
    }
}

pub const DEFAULT_LAZY_LOAD_TRIGGER_METHODS: &str = "equals,clone,hashCode,toString";

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_mapping_behavior: AutoMappingBehavior::Partial,
            auto_mapping_unknown_column_behavior: AutoMappingUnknownColumnBehavior::None,
            cache_enabled: true,
            proxy_factory: TypeName::new(DefaultProxyFactory::TYPE_NAME),
            lazy_loading_enabled: false,
            aggressive_lazy_loading: false,
            use_column_label: true,
            use_generated_keys: false,
            default_executor_type: ExecutorType::Simple,
            default_statement_timeout: None,
            default_fetch_size: None,
            default_result_set_type: None,
            map_underscore_to_camel_case: false,
            safe_row_bounds_enabled: false,
            local_cache_scope: LocalCacheScope::Session,
            jdbc_type_for_null: JdbcType::Other,
            lazy_load_trigger_methods: DEFAULT_LAZY_LOAD_TRIGGER_METHODS
                .split(',')
                .map(str::to_string)
                .collect(),
            safe_result_handler_enabled: true,
            default_scripting_language: TypeName::new(XML_LANGUAGE_DRIVER),
            default_enum_type_handler: TypeName::new(ENUM_TYPE_HANDLER),
            call_setters_on_nulls: false,
            use_actual_param_name: true,
            return_instance_for_empty_row: false,
            log_prefix: None,
            configuration_factory: None,
            shrink_whitespaces_in_sql: false,
            arg_name_based_constructor_auto_mapping: false,
            default_sql_provider_type: None,
            nullable_on_for_each: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enum_names() {
        assert_eq!(parse_enum::<AutoMappingBehavior>("FULL").unwrap(), AutoMappingBehavior::Full);
        assert_eq!(
            parse_enum::<ResultSetType>("SCROLL_INSENSITIVE").unwrap(),
            ResultSetType::ScrollInsensitive
        );
        assert!(parse_enum::<ExecutorType>("simple").is_err());
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.auto_mapping_behavior, AutoMappingBehavior::Partial);
        assert_eq!(settings.local_cache_scope, LocalCacheScope::Session);
        assert_eq!(settings.jdbc_type_for_null, JdbcType::Other);
        assert!(settings.lazy_load_trigger_methods.contains("hashCode"));
        assert_eq!(settings.lazy_load_trigger_methods.len(), 4);
        assert_eq!(settings.default_scripting_language.as_str(), XML_LANGUAGE_DRIVER);
    }

    #[test]
    fn test_serializes_document_names() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["autoMappingBehavior"], "PARTIAL");
        assert_eq!(json["useColumnLabel"], true);
        assert_eq!(json["jdbcTypeForNull"], "OTHER");
    }
}
