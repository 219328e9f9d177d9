//! Environment selection.
//!
//! # Design Decisions
//! - The first environment whose id matches wins; later duplicates are ignored
//! - No match installs nothing and is not an error here

use std::sync::Arc;

use crate::builder::sections::required;
use crate::builder::BuilderError;
use crate::component::{ComponentDescriptor, ComponentResolver};
use crate::datasource::DataSourceFactory;
use crate::document::ConfigNode;
use crate::session::{Configuration, Environment};
use crate::transaction::TransactionFactory;

/// Select and install one environment. `requested` overrides the
/// `default` attribute of `<environments>`.
pub(crate) fn environments(
    node: Option<&ConfigNode>,
    requested: Option<&str>,
    configuration: &mut Configuration,
) -> Result<(), BuilderError> {
    let Some(node) = node else {
        return Ok(());
    };
    let target = requested.or_else(|| node.attribute("default"));

    for child in node.children() {
        // The target is checked before the child's own id.
        let target = target.ok_or(BuilderError::MissingEnvironmentId)?;
        let id = required(child, "id").map_err(|_| BuilderError::EnvironmentWithoutId)?;
        if id != target {
            continue;
        }

        let registry = Arc::clone(configuration.registry());
        let resolver = ComponentResolver::new(&registry, &configuration.type_aliases);
        let transaction_factory = resolver.create::<dyn TransactionFactory>(&factory_descriptor(
            child,
            id,
            "transactionManager",
            "transaction manager",
        )?)?;
        let data_source_factory = resolver.create::<dyn DataSourceFactory>(&factory_descriptor(
            child,
            id,
            "dataSource",
            "data source",
        )?)?;

        let environment = Environment::new(id, transaction_factory, data_source_factory.data_source());
        tracing::info!(
            environment = id,
            transaction_factory = %environment.transaction_factory().type_name(),
            data_source = %data_source_factory.type_name(),
            "Environment installed"
        );
        configuration.environment = Some(environment);
        return Ok(());
    }

    tracing::warn!(environment = target.unwrap_or_default(), "No environment matched");
    Ok(())
}

fn factory_descriptor(
    environment: &ConfigNode,
    id: &str,
    element: &str,
    factory: &'static str,
) -> Result<ComponentDescriptor, BuilderError> {
    let missing = || BuilderError::MissingFactory {
        environment: id.to_string(),
        factory,
    };
    let node = environment.child(element).ok_or_else(missing)?;
    ComponentDescriptor::from_node(node, "type").ok_or_else(missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(id: &str, url: &str) -> ConfigNode {
        ConfigNode::new("environment")
            .with_attribute("id", id)
            .with_child(ConfigNode::new("transactionManager").with_attribute("type", "JDBC"))
            .with_child(
                ConfigNode::new("dataSource")
                    .with_attribute("type", "UNPOOLED")
                    .with_property("url", url),
            )
    }

    fn environments_node(default: Option<&str>) -> ConfigNode {
        let node = ConfigNode::new("environments")
            .with_child(environment("dev", "jdbc:h2:mem:dev"))
            .with_child(environment("test", "jdbc:h2:mem:test"))
            .with_child(environment("test", "jdbc:h2:mem:shadow"));
        match default {
            Some(default) => node.with_attribute("default", default),
            None => node,
        }
    }

    fn installed_url(configuration: &Configuration) -> Option<String> {
        configuration
            .environment
            .as_ref()
            .and_then(|env| env.data_source().url().map(str::to_string))
    }

    #[test]
    fn test_requested_environment_wins_over_default() {
        let mut configuration = Configuration::default();
        environments(Some(&environments_node(Some("dev"))), Some("test"), &mut configuration).unwrap();
        assert_eq!(configuration.environment.as_ref().map(Environment::id), Some("test"));
        assert_eq!(installed_url(&configuration).as_deref(), Some("jdbc:h2:mem:test"));
    }

    #[test]
    fn test_default_used_when_not_requested() {
        let mut configuration = Configuration::default();
        environments(Some(&environments_node(Some("dev"))), None, &mut configuration).unwrap();
        assert_eq!(installed_url(&configuration).as_deref(), Some("jdbc:h2:mem:dev"));
    }

    #[test]
    fn test_no_match_installs_nothing() {
        let mut configuration = Configuration::default();
        environments(Some(&environments_node(None)), Some("prod"), &mut configuration).unwrap();
        assert!(configuration.environment.is_none());
    }

    #[test]
    fn test_missing_id() {
        let mut configuration = Configuration::default();
        let err = environments(Some(&environments_node(None)), None, &mut configuration).unwrap_err();
        assert!(matches!(err, BuilderError::MissingEnvironmentId));
    }

    #[test]
    fn test_missing_data_source() {
        let node = ConfigNode::new("environments").with_child(
            ConfigNode::new("environment")
                .with_attribute("id", "dev")
                .with_child(ConfigNode::new("transactionManager").with_attribute("type", "MANAGED")),
        );
        let mut configuration = Configuration::default();
        let err = environments(Some(&node), Some("dev"), &mut configuration).unwrap_err();
        assert!(matches!(err, BuilderError::MissingFactory { factory: "data source", .. }));
    }

    #[test]
    fn test_environment_without_id() {
        let node = ConfigNode::new("environments").with_child(ConfigNode::new("environment"));
        let mut configuration = Configuration::default();
        let err = environments(Some(&node), Some("dev"), &mut configuration).unwrap_err();
        assert!(matches!(err, BuilderError::EnvironmentWithoutId));
    }

    #[test]
    fn test_missing_target_reported_before_missing_child_id() {
        let node = ConfigNode::new("environments").with_child(ConfigNode::new("environment"));
        let mut configuration = Configuration::default();
        let err = environments(Some(&node), None, &mut configuration).unwrap_err();
        assert!(matches!(err, BuilderError::MissingEnvironmentId));
    }
}
