//! XML to [`Value`].
//!
//! The returned value is the content of the document's root element; the root name itself is
//! dropped, so an `<ListOrdersResponse>` document decodes to a map holding `ListOrdersResult`.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};

use super::value::{ATTRIBUTES_KEY, Map, TEXT_KEY, Value};
use crate::Result;
use crate::error::Xml;

#[derive(Default)]
struct Element {
    name: String,
    attributes: Map,
    children: Map,
    text: String,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = utf8(start.local_name().as_ref())?.to_owned();
        let mut attributes = Map::new();

        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = utf8(attribute.key.as_ref())?;
            // Namespace declarations are not data.
            if key == "xmlns" || key.starts_with("xmlns:") {
                continue;
            }
            let raw = utf8(&attribute.value)?;
            let value = unescape(raw).map_err(quick_xml::Error::from)?;
            attributes.insert(key, value.into_owned());
        }

        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    fn close(self) -> (String, Value) {
        let Element {
            name,
            attributes,
            children,
            text,
        } = self;

        let value = if !children.is_empty() {
            if attributes.is_empty() {
                Value::Map(children)
            } else {
                let mut map = Map::new();
                map.insert(ATTRIBUTES_KEY, attributes);
                for (key, child) in children {
                    map.insert(key, child);
                }
                Value::Map(map)
            }
        } else if !attributes.is_empty() {
            let mut map = Map::new();
            map.insert(ATTRIBUTES_KEY, attributes);
            if !text.is_empty() {
                map.insert(TEXT_KEY, text);
            }
            Value::Map(map)
        } else {
            Value::from(text)
        };

        (name, value)
    }

    /// Adds a child, turning repeated names into a list.
    fn push_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::List(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::take(existing);
                *existing = Value::List(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }
}

/// Decodes an XML document into its root element's value.
///
/// Namespace prefixes are stripped from element names, attributes surface under `@attributes`,
/// repeated siblings become a [`Value::List`] and a single occurrence stays a single value.
pub fn from_xml(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::open(&start)?),
            Event::Empty(start) => {
                let (name, value) = Element::open(&start)?.close();
                match stack.last_mut() {
                    Some(parent) => parent.push_child(name, value),
                    None => set_root(&mut root, value)?,
                }
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| malformed("unbalanced end tag"))?;
                let (name, value) = element.close();
                match stack.last_mut() {
                    Some(parent) => parent.push_child(name, value),
                    None => set_root(&mut root, value)?,
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&text.decode().map_err(quick_xml::Error::from)?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(utf8(&data)?);
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(current) = stack.last_mut() {
                    if let Some(ch) = reference.resolve_char_ref()? {
                        current.text.push(ch);
                    } else {
                        let name = reference.decode().map_err(quick_xml::Error::from)?;
                        let resolved = resolve_predefined_entity(&name)
                            .ok_or_else(|| malformed(format!("unknown entity &{name};")))?;
                        current.text.push_str(resolved);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(malformed("unexpected end of document").into());
    }

    root.ok_or_else(|| malformed("document has no root element").into())
}

fn set_root(root: &mut Option<Value>, value: Value) -> std::result::Result<(), Xml> {
    if root.is_some() {
        return Err(malformed("document has more than one root element"));
    }
    *root = Some(value);
    Ok(())
}

fn utf8(bytes: &[u8]) -> std::result::Result<&str, Xml> {
    std::str::from_utf8(bytes).map_err(|e| malformed(e.to_string()))
}

fn malformed<S: Into<Cow<'static, str>>>(reason: S) -> Xml {
    Xml {
        reason: reason.into().into_owned(),
    }
}
