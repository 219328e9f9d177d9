//! Variable resolution for the `<properties>` section.

use thiserror::Error;

use crate::document::ConfigNode;
use crate::io::{ResourceError, ResourceLoader};
use crate::properties::format::PropertyFormat;
use crate::properties::PropertyBag;

/// Errors raised while building the variable bag.
#[derive(Debug, Error)]
pub enum PropertySourceError {
    #[error(
        "the properties element cannot specify both a URL ({url}) and a resource ({resource}) \
         based property file reference; specify one or the other"
    )]
    Ambiguous { resource: String, url: String },

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error("malformed property file {source_name}: {source}")]
    Format {
        source_name: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Where external pairs come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertySource<'a> {
    Resource(&'a str),
    Url(&'a str),
}

impl<'a> PropertySource<'a> {
    /// Read the locator attributes of a `<properties>` node.
    pub fn from_node(node: &'a ConfigNode) -> Result<Option<Self>, PropertySourceError> {
        match (node.attribute("resource"), node.attribute("url")) {
            (Some(resource), Some(url)) => Err(PropertySourceError::Ambiguous {
                resource: resource.to_string(),
                url: url.to_string(),
            }),
            (Some(resource), None) => Ok(Some(PropertySource::Resource(resource))),
            (None, Some(url)) => Ok(Some(PropertySource::Url(url))),
            (None, None) => Ok(None),
        }
    }

    fn name(&self) -> &'a str {
        match self {
            PropertySource::Resource(name) | PropertySource::Url(name) => name,
        }
    }
}

/// Builds the variable bag: declared pairs, then the external source, then
/// inherited variables, each layer overriding the previous one.
pub struct PropertyResolver<'a> {
    loader: &'a dyn ResourceLoader,
}

impl<'a> PropertyResolver<'a> {
    pub fn new(loader: &'a dyn ResourceLoader) -> Self {
        Self { loader }
    }

    pub fn resolve(
        &self,
        node: Option<&ConfigNode>,
        inherited: &PropertyBag,
    ) -> Result<PropertyBag, PropertySourceError> {
        let Some(node) = node else {
            return Ok(inherited.clone());
        };

        let source = PropertySource::from_node(node)?;
        let mut bag = node.children_as_properties();

        if let Some(source) = source {
            let external = self.load(&source)?;
            tracing::debug!(
                source = source.name(),
                declared = bag.len(),
                external = external.len(),
                "Loaded external properties"
            );
            bag.merge(&external);
        }

        bag.merge(inherited);
        Ok(bag)
    }

    fn load(&self, source: &PropertySource<'_>) -> Result<PropertyBag, PropertySourceError> {
        let text = match source {
            PropertySource::Resource(resource) => self.loader.read_resource_to_string(resource)?,
            PropertySource::Url(url) => self.loader.read_url_to_string(url)?,
        };
        let name = source.name();
        PropertyFormat::for_source(name)
            .parse(&text)
            .map_err(|source| PropertySourceError::Format {
                source_name: name.to_string(),
                source,
            })
    }
}
