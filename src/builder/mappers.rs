//! `<mappers>`: mapper reference resolution.
//!
//! # Design Decisions
//! - `<mapper>` names exactly one of `resource`, `url` or `class`
//! - `<package>` is a separate shape and bypasses that rule
//! - Streams are scoped to one parser call and dropped on every exit path

use std::sync::Arc;

use crate::builder::sections::required;
use crate::builder::BuilderError;
use crate::document::ConfigNode;
use crate::io::ResourceLoader;
use crate::mapping::MapperSourceParser;
use crate::session::Configuration;

/// Where a `<mapper>` element points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapperReference {
    Resource(String),
    Url(String),
    Class(String),
}

impl MapperReference {
    pub fn from_node(node: &ConfigNode) -> Result<Self, BuilderError> {
        let resource = node.attribute("resource");
        let url = node.attribute("url");
        let class = node.attribute("class");
        match (resource, url, class) {
            (Some(resource), None, None) => Ok(Self::Resource(resource.to_string())),
            (None, Some(url), None) => Ok(Self::Url(url.to_string())),
            (None, None, Some(class)) => Ok(Self::Class(class.to_string())),
            _ => Err(BuilderError::MappingReferenceConflict {
                resource: resource.map(str::to_string),
                url: url.map(str::to_string),
                class: class.map(str::to_string),
            }),
        }
    }
}

pub(crate) fn mappers(
    node: Option<&ConfigNode>,
    configuration: &mut Configuration,
    loader: &dyn ResourceLoader,
    parser: &dyn MapperSourceParser,
) -> Result<(), BuilderError> {
    let Some(node) = node else {
        return Ok(());
    };
    let registry = Arc::clone(configuration.registry());
    for child in node.children() {
        if child.name() == "package" {
            let package = required(child, "name")?;
            let count = configuration.mappers.add_mappers(package, &registry)?;
            tracing::debug!(package, mappers = count, "Mapper package registered");
            continue;
        }

        match MapperReference::from_node(child)? {
            MapperReference::Resource(resource) => {
                let mut stream = loader.open_resource(&resource)?;
                parser.parse(&mut *stream, configuration, &resource)?;
            }
            MapperReference::Url(url) => {
                let mut stream = loader.open_url(&url)?;
                parser.parse(&mut *stream, configuration, &url)?;
            }
            MapperReference::Class(class) => {
                let type_name = registry.class_for_name(&class)?;
                let added = registry
                    .get(&type_name)
                    .map(|info| configuration.mappers.add_mapper(info))
                    .transpose()?
                    .unwrap_or(false);
                if !added {
                    tracing::warn!(class = %type_name, "Not a mapper interface, ignored");
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(attributes: &[(&str, &str)]) -> ConfigNode {
        attributes
            .iter()
            .fold(ConfigNode::new("mapper"), |node, (key, value)| node.with_attribute(*key, *value))
    }

    #[test]
    fn test_single_reference() {
        assert_eq!(
            MapperReference::from_node(&mapper(&[("resource", "a.xml")])).unwrap(),
            MapperReference::Resource("a.xml".into())
        );
        assert_eq!(
            MapperReference::from_node(&mapper(&[("url", "file:///a.xml")])).unwrap(),
            MapperReference::Url("file:///a.xml".into())
        );
        assert_eq!(
            MapperReference::from_node(&mapper(&[("class", "app.A")])).unwrap(),
            MapperReference::Class("app.A".into())
        );
    }

    #[test]
    fn test_conflicting_references() {
        for attributes in [
            &[][..],
            &[("resource", "a.xml"), ("class", "app.A")][..],
            &[("resource", "a.xml"), ("url", "file:///a.xml")][..],
            &[("resource", "a.xml"), ("url", "file:///a.xml"), ("class", "app.A")][..],
        ] {
            let err = MapperReference::from_node(&mapper(attributes)).unwrap_err();
            assert!(matches!(err, BuilderError::MappingReferenceConflict { .. }));
        }
    }
}
