//! XML → [`ConfigNode`] parsing.

use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::document::ConfigNode;

/// Errors raised while reading a configuration document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("document contains no root element")]
    Empty,

    #[error("document ended inside <{0}>")]
    Unterminated(String),

    #[error("document contains more than one root element (found <{0}>)")]
    MultipleRoots(String),

    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse XML text into a node tree.
///
/// Comments, processing instructions and the DOCTYPE are ignored; text and
/// CDATA are appended to the enclosing element's body.
pub fn parse_xml(xml: &str) -> Result<ConfigNode, DocumentError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<ConfigNode> = Vec::new();
    let mut root: Option<ConfigNode> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element(&start)?),
            Event::Empty(start) => {
                let node = element(&start)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node)?;
                }
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    top.append_body(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    top.append_body(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(DocumentError::Unterminated(open.name().to_string()));
    }
    root.ok_or(DocumentError::Empty)
}

fn element(start: &BytesStart<'_>) -> Result<ConfigNode, DocumentError> {
    let mut node = ConfigNode::default();
    node.set_name(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        node.insert_attribute(key, value);
    }
    Ok(node)
}

fn attach(
    stack: &mut [ConfigNode],
    root: &mut Option<ConfigNode>,
    node: ConfigNode,
) -> Result<(), DocumentError> {
    match stack.last_mut() {
        Some(parent) => parent.push_child(node),
        None if root.is_some() => {
            return Err(DocumentError::MultipleRoots(node.name().to_string()));
        }
        None => *root = Some(node),
    }
    Ok(())
}
