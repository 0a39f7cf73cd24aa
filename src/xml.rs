//! Minimal XML element tree for reading SOAP responses.
//!
//! Namespace prefixes are dropped; elements are matched by local name only.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub text: String,
    pub nil: bool,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Self {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let nil = start.attributes().flatten().any(|attr| {
            attr.key.local_name().as_ref() == b"nil"
                && matches!(attr.value.as_ref(), b"true" | b"1")
        });
        Self {
            name,
            nil,
            ..Self::default()
        }
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given local name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Depth-first search for the first descendant (or self) with the given name.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Text of a direct child, exactly as sent; empty and nil elements read as `None`.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).and_then(XmlElement::value)
    }

    /// Own text content; `None` when nil or empty.
    pub fn value(&self) -> Option<String> {
        if self.nil || self.text.is_empty() {
            None
        } else {
            Some(self.text.clone())
        }
    }

    /// Nil, or no child elements and nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.nil || (self.children.is_empty() && self.text.trim().is_empty())
    }
}

/// Parses a whole document and returns its root element.
pub fn parse_document(xml: &str) -> Result<XmlElement, String> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            format!("XML error at position {}: {}", reader.buffer_position(), e)
        })?;

        match event {
            Event::Start(start) => stack.push(XmlElement::from_start(&start)),
            Event::Empty(start) => attach(&mut stack, &mut root, XmlElement::from_start(&start))?,
            Event::End(_) => {
                let mut element = stack.pop().ok_or("unbalanced closing tag")?;
                // Indentation between child elements is not content
                if !element.children.is_empty() && element.text.trim().is_empty() {
                    element.text.clear();
                }
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let unescaped = text.unescape().map_err(|e| e.to_string())?;
                    current.text.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err("unexpected end of document".to_string());
    }
    root.ok_or_else(|| "document has no root element".to_string())
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), String> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err("multiple root elements".to_string()),
    }
    Ok(())
}
