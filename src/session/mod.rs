//! The target aggregate and its serialisable summary.

pub mod configuration;
pub mod environment;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::component::TypeName;
use crate::config::schema::Settings;
use crate::mapping::StatementKind;
use crate::types::TypeHandlerBinding;

pub use configuration::Configuration;
pub use environment::Environment;

#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentSummary {
    pub id: String,
    pub transaction_factory: TypeName,
    pub url: Option<String>,
    pub pooled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementSummary {
    pub id: String,
    pub kind: StatementKind,
    pub database_id: Option<String>,
    pub resource: String,
}

/// What a configuration ended up with, without secrets.
///
/// Variable values and data source credentials are left out; variable names
/// are listed.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationSummary {
    pub environment: Option<EnvironmentSummary>,
    pub database_id: Option<String>,
    pub variables: Vec<String>,
    pub settings: Settings,
    pub interceptors: Vec<TypeName>,
    pub object_factory: TypeName,
    pub object_wrapper_factory: TypeName,
    pub reflector_factory: TypeName,
    pub proxy_factory: TypeName,
    pub vfs_impls: Vec<TypeName>,
    pub log_impl: Option<TypeName>,
    pub type_aliases: BTreeMap<String, TypeName>,
    pub type_handlers: Vec<TypeHandlerBinding>,
    pub mappers: Vec<TypeName>,
    pub sql_fragments: Vec<String>,
    pub mapped_statements: Vec<StatementSummary>,
    pub loaded_resources: Vec<String>,
}

impl From<&Configuration> for ConfigurationSummary {
    fn from(configuration: &Configuration) -> Self {
        Self {
            environment: configuration.environment.as_ref().map(|env| EnvironmentSummary {
                id: env.id().to_string(),
                transaction_factory: env.transaction_factory().type_name().clone(),
                url: env.data_source().url().map(str::to_string),
                pooled: env.data_source().is_pooled(),
            }),
            database_id: configuration.database_id.clone(),
            variables: configuration.variables.keys().map(str::to_string).collect(),
            settings: configuration.settings.clone(),
            interceptors: configuration
                .interceptors
                .iter()
                .map(|interceptor| interceptor.type_name().clone())
                .collect(),
            object_factory: configuration.object_factory.type_name().clone(),
            object_wrapper_factory: configuration.object_wrapper_factory.type_name().clone(),
            reflector_factory: configuration.reflector_factory.type_name().clone(),
            proxy_factory: configuration.proxy_factory.type_name().clone(),
            vfs_impls: configuration.vfs_impls.clone(),
            log_impl: configuration.log_impl.clone(),
            type_aliases: configuration.type_aliases.aliases().clone(),
            type_handlers: configuration.type_handlers.bindings().to_vec(),
            mappers: configuration.mappers.mappers().cloned().collect(),
            sql_fragments: configuration.sql_fragments.keys().cloned().collect(),
            mapped_statements: configuration
                .mapped_statements()
                .map(|statement| StatementSummary {
                    id: statement.id.clone(),
                    kind: statement.kind,
                    database_id: statement.database_id.clone(),
                    resource: statement.resource.clone(),
                })
                .collect(),
            loaded_resources: configuration.loaded_resources().map(str::to_string).collect(),
        }
    }
}
