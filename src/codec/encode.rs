//! [`Value`] to XML.
//!
//! - a [`Map`] entry becomes a child element named after its key
//! - a [`Value::List`], or a [`Map`] with positional keys, becomes a run of sibling elements
//!   all named after the parent key, with no wrapper element
//! - an [`Attributed`] value becomes an element with attributes and text content
//! - a map carrying the decoder's `@attributes` / `@text` keys is written back as attributes and
//!   text, so decoded trees re-encode to the same markup
//!
//! Element and attribute names must be XML names; anything else is a validation error and
//! nothing is written.
//!
//! Empty containers carry no structure in XML. An empty [`Map`] is written as an empty element
//! and decodes back as `""`; an empty [`Value::List`] writes nothing and its key is gone after
//! decoding.

use std::io::{self, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use super::value::{ATTRIBUTES_KEY, Attributed, Map, TEXT_KEY, Value};
use crate::Result;
use crate::error::Error;

/// Root element used by MWS feed documents.
pub const DEFAULT_ROOT: &str = "AmazonEnvelope";

/// Encodes `value` under an `AmazonEnvelope` root.
pub fn to_xml(value: &Value) -> Result<String> {
    to_xml_with_root(DEFAULT_ROOT, value)
}

/// Encodes `value` as a complete XML document whose root element is `root`.
pub fn to_xml_with_root(root: &str, value: &Value) -> Result<String> {
    check_names(root, value)?;

    let mut writer = Writer::new(Vec::with_capacity(512));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root, value)?;

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Rejects any element or attribute name in `value` that is not an XML name.
fn check_names(name: &str, value: &Value) -> Result<()> {
    check_name(name)?;

    match value {
        Value::Scalar(_) => Ok(()),
        Value::List(items) => items.iter().try_for_each(|item| check_names(name, item)),
        Value::Map(map) if map.is_positional() => {
            map.iter().try_for_each(|(_, item)| check_names(name, item))
        }
        Value::Map(map) => {
            if let Some(attributes) = map.get(ATTRIBUTES_KEY).and_then(Value::as_map) {
                attributes.keys().try_for_each(check_name)?;
            }
            map.iter()
                .filter(|(key, _)| *key != ATTRIBUTES_KEY && *key != TEXT_KEY)
                .try_for_each(|(key, child)| check_names(key, child))
        }
        Value::Attributed(Attributed { attributes, .. }) => attributes
            .iter()
            .try_for_each(|(key, _)| check_name(key)),
    }
}

fn check_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(is_name_start)
        && chars.all(|c| is_name_start(c) || is_name_char(c));

    if valid {
        Ok(())
    } else {
        Err(Error::validation(format!("{name:?} is not a valid XML name")))
    }
}

/// `NameStartChar` of the XML 1.0 `Name` production.
fn is_name_start(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    matches!(c,
        '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

fn write_element<W: Write>(writer: &mut Writer<W>, name: &str, value: &Value) -> io::Result<()> {
    match value {
        Value::Scalar(scalar) => {
            writer
                .create_element(name)
                .write_text_content(BytesText::new(&scalar.to_string()))?;
        }
        Value::List(items) => {
            for item in items {
                write_element(writer, name, item)?;
            }
        }
        Value::Map(map) if map.is_positional() => {
            for (_, item) in map.iter() {
                write_element(writer, name, item)?;
            }
        }
        Value::Map(map) => write_map_element(writer, name, map)?,
        Value::Attributed(Attributed { text, attributes }) => {
            writer
                .create_element(name)
                .with_attributes(attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .write_text_content(BytesText::new(&text.to_string()))?;
        }
    }

    Ok(())
}

fn write_map_element<W: Write>(writer: &mut Writer<W>, name: &str, map: &Map) -> io::Result<()> {
    let attributes: Vec<(&str, String)> = map
        .get(ATTRIBUTES_KEY)
        .and_then(Value::as_map)
        .map(|attributes| {
            attributes
                .iter()
                .map(|(k, v)| (k, v.to_text().unwrap_or_default()))
                .collect()
        })
        .unwrap_or_default();
    let text = map.get(TEXT_KEY).and_then(Value::to_text);
    let mut children = map
        .iter()
        .filter(|(key, _)| *key != ATTRIBUTES_KEY && *key != TEXT_KEY)
        .peekable();

    let element = writer
        .create_element(name)
        .with_attributes(attributes.iter().map(|(k, v)| (*k, v.as_str())));

    if children.peek().is_some() {
        element.write_inner_content(|w| {
            for (key, child) in children {
                write_element(w, key, child)?;
            }
            Ok(())
        })?;
    } else if let Some(text) = text {
        element.write_text_content(BytesText::new(&text))?;
    } else {
        element.write_empty()?;
    }

    Ok(())
}
