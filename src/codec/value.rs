//! The generic tree shared by the XML encoder, the XML decoder and typed results.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::{SerializeMap as _, SerializeSeq as _, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Reserved key under which decoded XML attributes surface.
pub const ATTRIBUTES_KEY: &str = "@attributes";
/// Reserved key holding the text of an element that also carries attributes.
pub const TEXT_KEY: &str = "@text";

/// Leaf of a [`Value`] tree.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Insertion-ordered mapping with unique, case-sensitive keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Map(Vec<(String, Value)>);

impl Map {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`, replacing in place when the key exists.
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.0.iter_mut().map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// True when the keys are exactly `"0"`, `"1"`, ... `"n-1"` in order, i.e. the map is a
    /// list written with positional keys.
    #[must_use]
    pub fn is_positional(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .iter()
                .enumerate()
                .all(|(index, (key, _))| *key == index.to_string())
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.0.into_iter().map(|(_, v)| v).collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Scalar text plus XML attributes, e.g. `<StandardPrice currency="DEFAULT">9.99</StandardPrice>`.
///
/// Only built by callers assembling feed documents; the decoder never produces it.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct Attributed {
    pub text: Scalar,
    pub attributes: Vec<(String, String)>,
}

impl Attributed {
    #[must_use]
    pub fn new<T: Into<Scalar>>(text: T) -> Self {
        Self {
            text: text.into(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Map(Map),
    List(Vec<Value>),
    Attributed(Attributed),
}

impl Default for Value {
    fn default() -> Self {
        Value::Map(Map::new())
    }
}

impl Value {
    /// Child under `key` when this is a [`Value::Map`].
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Walks nested maps along `keys`.
    #[must_use]
    pub fn path(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().try_fold(self, |value, key| value.get(key))
    }

    /// The text of a string scalar, or of the `@text` of an element with attributes.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::String(s)) => Some(s),
            Value::Map(map) => map.get(TEXT_KEY).and_then(Value::as_str),
            Value::Attributed(Attributed {
                text: Scalar::String(s),
                ..
            }) => Some(s),
            _ => None,
        }
    }

    /// Any scalar rendered as text.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Scalar(s) => Some(s.to_string()),
            Value::Attributed(a) => Some(a.text.to_string()),
            Value::Map(map) => map.get(TEXT_KEY).and_then(Value::to_text),
            Value::List(_) => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Empty string, empty map or empty list. Empty XML elements decode to the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Scalar(Scalar::String(s)) => s.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::List(items) => items.is_empty(),
            _ => false,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Scalar(scalar) => scalar_to_json(scalar),
            Value::Map(map) => JsonValue::Object(
                map.iter()
                    .map(|(key, value)| (key.to_owned(), value.to_json()))
                    .collect(),
            ),
            Value::List(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Attributed(attributed) => {
                let attributes = attributed
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), JsonValue::String(v.clone())))
                    .collect();
                let mut object = serde_json::Map::new();
                object.insert(ATTRIBUTES_KEY.to_owned(), JsonValue::Object(attributes));
                object.insert(TEXT_KEY.to_owned(), scalar_to_json(&attributed.text));
                JsonValue::Object(object)
            }
        }
    }
}

fn scalar_to_json(scalar: &Scalar) -> JsonValue {
    match scalar {
        Scalar::String(s) => JsonValue::String(s.clone()),
        Scalar::Integer(i) => JsonValue::from(*i),
        Scalar::Float(x) => serde_json::Number::from_f64(*x)
            .map_or_else(|| JsonValue::String(x.to_string()), JsonValue::Number),
        Scalar::Bool(b) => JsonValue::Bool(*b),
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::from(""),
            JsonValue::Bool(b) => Value::from(b),
            JsonValue::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Value::from(i),
                (None, Some(x)) if !n.is_u64() => Value::from(x),
                _ => Value::from(n.to_string()),
            },
            JsonValue::String(s) => Value::from(s),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(object) => Value::Map(object.into_iter().collect()),
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Attributed> for Value {
    fn from(attributed: Attributed) -> Self {
        Value::Attributed(attributed)
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Scalar::$variant(v.into())
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}

scalar_from! {
    String => String,
    &str => String,
    i64 => Integer,
    i32 => Integer,
    u32 => Integer,
    f64 => Float,
    bool => Bool,
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::from(v.as_str())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(Scalar::String(s)) => serializer.serialize_str(s),
            Value::Scalar(Scalar::Integer(i)) => serializer.serialize_i64(*i),
            Value::Scalar(Scalar::Float(x)) => serializer.serialize_f64(*x),
            Value::Scalar(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            Value::Map(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
            Value::List(items) => {
                let mut state = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    state.serialize_element(item)?;
                }
                state.end()
            }
            Value::Attributed(_) => self.to_json().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Value::from)
    }
}
