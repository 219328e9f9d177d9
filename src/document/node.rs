//! Configuration node tree.

use std::collections::BTreeMap;

use crate::document::placeholder::PlaceholderResolver;
use crate::properties::PropertyBag;

/// One element of a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigNode {
    name: String,
    attributes: BTreeMap<String, String>,
    children: Vec<ConfigNode>,
    body: Option<String>,
}

impl ConfigNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: ConfigNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Shorthand for a `<property name=".." value=".."/>` child.
    pub fn with_property(self, name: &str, value: &str) -> Self {
        self.with_child(
            ConfigNode::new("property")
                .with_attribute("name", name)
                .with_attribute("value", value),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn children(&self) -> &[ConfigNode] {
        &self.children
    }

    /// First child with the given element name.
    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Collect `name`/`value` attribute pairs of the children.
    ///
    /// Children missing either attribute are skipped.
    pub fn children_as_properties(&self) -> PropertyBag {
        self.children
            .iter()
            .filter_map(|child| Some((child.attribute("name")?, child.attribute("value")?)))
            .collect()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn insert_attribute(&mut self, key: String, value: String) {
        self.attributes.insert(key, value);
    }

    pub(crate) fn push_child(&mut self, child: ConfigNode) {
        self.children.push(child);
    }

    pub(crate) fn append_body(&mut self, text: &str) {
        match &mut self.body {
            Some(body) => {
                body.push(' ');
                body.push_str(text);
            }
            None => self.body = Some(text.to_string()),
        }
    }

    /// Copy of this subtree with placeholders in attributes and bodies expanded.
    pub fn resolved(&self, resolver: &PlaceholderResolver<'_>) -> ConfigNode {
        ConfigNode {
            name: self.name.clone(),
            attributes: self
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), resolver.resolve(v)))
                .collect(),
            children: self.children.iter().map(|c| c.resolved(resolver)).collect(),
            body: self.body.as_deref().map(|b| resolver.resolve(b)),
        }
    }
}
