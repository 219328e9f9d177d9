//! XML mapper documents.
//!
//! # Responsibilities
//! - Read `<mapper namespace>` documents into the configuration
//! - Register `<sql>` fragments in the shared fragment table
//! - Register `select|insert|update|delete` statements for the current database id
//! - Bind the namespace to a known mapper interface
//!
//! # Design Decisions
//! - Statements declared for the active database id win over generic ones;
//!   generic statements fill the remaining ids
//! - Fragments are registered before statements so includes can reference
//!   fragments declared later in the same document

use std::io::Read;
use std::sync::Arc;

use crate::component::TypeName;
use crate::document::{ConfigDocument, ConfigNode};
use crate::mapping::{MappedStatement, MapperError, StatementKind};
use crate::session::Configuration;

/// Parses one mapped-statement source into the configuration.
pub trait MapperSourceParser {
    fn parse(
        &self,
        source: &mut dyn Read,
        configuration: &mut Configuration,
        resource: &str,
    ) -> Result<(), MapperError>;
}

/// Default parser for XML mapper documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlMapperParser;

impl MapperSourceParser for XmlMapperParser {
    fn parse(
        &self,
        source: &mut dyn Read,
        configuration: &mut Configuration,
        resource: &str,
    ) -> Result<(), MapperError> {
        if configuration.is_resource_loaded(resource) {
            tracing::debug!(resource, "Mapper resource already loaded");
            return Ok(());
        }

        let mut xml = String::new();
        source
            .read_to_string(&mut xml)
            .map_err(|source| MapperError::Io {
                resource: resource.to_string(),
                source,
            })?;
        let document = ConfigDocument::parse(&xml, configuration.variables.clone()).map_err(|source| {
            MapperError::Document {
                resource: resource.to_string(),
                source,
            }
        })?;
        if document.root_name() != "mapper" {
            return Err(MapperError::UnexpectedRoot {
                resource: resource.to_string(),
                found: document.root_name().to_string(),
            });
        }
        let root = document.root();
        let namespace = root
            .attribute("namespace")
            .filter(|ns| !ns.is_empty())
            .ok_or_else(|| MapperError::MissingNamespace {
                resource: resource.to_string(),
            })?
            .to_string();

        let context = MapperContext {
            namespace: &namespace,
            resource,
        };
        context.sql_fragments(&root, configuration)?;
        context.statements(&root, configuration)?;

        configuration.add_loaded_resource(resource);
        bind_namespace(&namespace, configuration)?;

        tracing::debug!(resource, namespace = %namespace, "Mapper parsed");
        Ok(())
    }
}

struct MapperContext<'a> {
    namespace: &'a str,
    resource: &'a str,
}

impl MapperContext<'_> {
    fn qualify_declared(&self, node: &ConfigNode) -> Result<String, MapperError> {
        let id = node.attribute("id").ok_or_else(|| MapperError::MissingId {
            resource: self.resource.to_string(),
            element: node.name().to_string(),
        })?;
        if id.contains('.') {
            return Err(MapperError::InvalidId {
                resource: self.resource.to_string(),
                id: id.to_string(),
            });
        }
        Ok(format!("{}.{}", self.namespace, id))
    }

    fn qualify_reference(&self, refid: &str) -> String {
        if refid.contains('.') {
            refid.to_string()
        } else {
            format!("{}.{}", self.namespace, refid)
        }
    }

    fn sql_fragments(&self, root: &ConfigNode, configuration: &mut Configuration) -> Result<(), MapperError> {
        let fragments: Vec<&ConfigNode> = root.children().iter().filter(|c| c.name() == "sql").collect();
        let database_id = configuration.database_id.clone();
        for pass in for_database(database_id.as_deref()) {
            for node in fragments.iter().filter(|node| node.attribute("databaseId") == pass) {
                let id = self.qualify_declared(node)?;
                let existing = configuration.sql_fragments.contains_key(&id);
                if existing && pass.is_none() && database_id.is_some() {
                    // Vendor-specific fragment already registered.
                    continue;
                }
                if existing {
                    return Err(MapperError::DuplicateFragment { id });
                }
                let sql = node.body().unwrap_or_default().trim().to_string();
                configuration.sql_fragments.insert(id, sql);
            }
        }
        Ok(())
    }

    fn statements(&self, root: &ConfigNode, configuration: &mut Configuration) -> Result<(), MapperError> {
        let statements: Vec<(&ConfigNode, StatementKind)> = root
            .children()
            .iter()
            .filter_map(|node| StatementKind::from_element(node.name()).map(|kind| (node, kind)))
            .collect();
        let database_id = configuration.database_id.clone();
        for pass in for_database(database_id.as_deref()) {
            for (node, kind) in statements.iter().filter(|(node, _)| node.attribute("databaseId") == pass) {
                let id = self.qualify_declared(node)?;
                if pass.is_none()
                    && configuration
                        .mapped_statement(&id)
                        .is_some_and(|previous| previous.database_id.is_some())
                {
                    continue;
                }
                let statement = self.statement(node, *kind, id, configuration)?;
                configuration.add_mapped_statement(statement)?;
            }
        }
        Ok(())
    }

    fn statement(
        &self,
        node: &ConfigNode,
        kind: StatementKind,
        id: String,
        configuration: &Configuration,
    ) -> Result<MappedStatement, MapperError> {
        let mut includes = Vec::new();
        for include in node.children().iter().filter(|c| c.name() == "include") {
            let Some(refid) = include.attribute("refid") else {
                return Err(MapperError::MissingId {
                    resource: self.resource.to_string(),
                    element: "include".to_string(),
                });
            };
            let refid = self.qualify_reference(refid);
            if !configuration.sql_fragments.contains_key(&refid) {
                return Err(MapperError::UnknownFragment { statement: id, refid });
            }
            includes.push(refid);
        }

        let body = node.body().unwrap_or_default().trim();
        let sql = if configuration.settings.shrink_whitespaces_in_sql {
            body.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            body.to_string()
        };

        Ok(MappedStatement {
            id,
            kind,
            resource: self.resource.to_string(),
            database_id: node.attribute("databaseId").map(str::to_string),
            sql,
            includes,
        })
    }
}

/// Database-id passes: the active id first (if any), then generic declarations.
fn for_database(database_id: Option<&str>) -> Vec<Option<&str>> {
    match database_id {
        Some(id) => vec![Some(id), None],
        None => vec![None],
    }
}

fn bind_namespace(namespace: &str, configuration: &mut Configuration) -> Result<(), MapperError> {
    let registry = Arc::clone(configuration.registry());
    let type_name = TypeName::new(namespace);
    let Some(info) = registry.get(&type_name) else {
        return Ok(());
    };
    if info.is_mapper() && !configuration.mappers.has_mapper(&type_name) {
        configuration.add_loaded_resource(&format!("namespace:{namespace}"));
        configuration.mappers.add_mapper(info)?;
    }
    Ok(())
}
