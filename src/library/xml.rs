//! Minimal element tree over quick-xml.
//!
//! The catalog format is small enough that the whole document is read into
//! an owned tree before any item or shelf is materialized. Elements keep
//! their attributes in document order.

use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Errors from building the element tree
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("XML parse error: {0}")]
    Parse(#[from] quick_xml::Error),

    #[error("document has no root element")]
    NoRoot,

    #[error("content after the root element")]
    TrailingContent,
}

/// A single XML element with its attributes, text, and child elements
#[derive(Debug, Clone)]
pub struct Element {
    /// Tag name as written in the document
    pub tag: String,

    /// Attributes in document order
    pub attributes: IndexMap<String, String>,

    /// Child elements in document order
    pub children: Vec<Element>,

    /// Concatenated text content directly inside this element
    pub text: String,
}

impl Element {
    fn from_start(start: &BytesStart) -> Result<Self, XmlError> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = IndexMap::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(XmlError::Parse)?;
            attributes.insert(key, value.into_owned());
        }

        Ok(Element {
            tag,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Get the first child element with the given tag name
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Iterate over child elements with the given tag name
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Text content of the first child element with the given tag name
    pub fn child_text(&self, tag: &str) -> Option<&str> {
        self.child(tag).map(|c| c.text.as_str())
    }
}

/// Parse a complete document into its root element
pub fn parse_document(xml: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(XmlError::TrailingContent);
                }
                stack.push(Element::from_start(e)?);
            }
            Event::Empty(ref e) => {
                let element = Element::from_start(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                // The reader verifies start/end pairing, so the stack is
                // never empty here.
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element)?;
                }
            }
            Event::Text(ref t) => {
                if let Some(top) = stack.last_mut() {
                    let text = t.unescape().map_err(XmlError::Parse)?;
                    top.text.push_str(&text);
                }
            }
            Event::CData(ref t) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(t));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    root.ok_or(XmlError::NoRoot)
}

fn attach(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_some() {
        return Err(XmlError::TrailingContent);
    } else {
        *root = Some(element);
    }
    Ok(())
}
