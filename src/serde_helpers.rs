//! Serde helpers for turning decoded XML trees into typed results.
//!
//! When the `tracing` feature is enabled, [`from_value`] also logs warnings for any unknown
//! fields encountered during deserialization, helping detect MWS schema changes.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::ser::{SerializeSeq as _, Serializer};
use serde::{Deserialize as _, Serialize};
use serde_json::Value as JsonValue;
use serde_with::{DeserializeAs, SerializeAs};

use crate::codec::{Value, as_sequence};

/// A `serde_as` type for fields that may hold one element or many.
///
/// Use with `#[serde_as(as = "Sequence")]` on a `Vec<T>` field, together with
/// `#[serde(default)]` so an absent field yields an empty vector. An empty element yields an
/// empty vector as well.
pub struct Sequence;

impl<'de, T: DeserializeOwned> DeserializeAs<'de, Vec<T>> for Sequence {
    fn deserialize_as<D>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_empty() {
            return Ok(Vec::new());
        }

        as_sequence(value)
            .into_iter()
            .map(|item| T::deserialize(item.to_json()).map_err(D::Error::custom))
            .collect()
    }
}

impl<T: Serialize> SerializeAs<Vec<T>> for Sequence {
    fn serialize_as<S>(source: &Vec<T>, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(source.len()))?;
        for item in source {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

/// A `serde_as` type mapping an empty element (`<Orders/>`) to `T::default()`.
pub struct EmptyAsDefault;

impl<'de, T: DeserializeOwned + Default> DeserializeAs<'de, T> for EmptyAsDefault {
    fn deserialize_as<D>(deserializer: D) -> std::result::Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_empty() {
            return Ok(T::default());
        }
        T::deserialize(value.to_json()).map_err(D::Error::custom)
    }
}

impl<T: Serialize> SerializeAs<T> for EmptyAsDefault {
    fn serialize_as<S>(source: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        source.serialize(serializer)
    }
}

/// Deserializes a decoded tree into `T`.
pub fn from_value<T: DeserializeOwned>(value: &Value) -> crate::Result<T> {
    deserialize_with_warnings(value.to_json())
}

/// Deserialize JSON with unknown field warnings.
///
/// Unknown fields trigger warnings but do not cause deserialization to fail.
#[cfg(feature = "tracing")]
pub fn deserialize_with_warnings<T: DeserializeOwned>(value: JsonValue) -> crate::Result<T> {
    use std::any::type_name;

    tracing::trace!(
        type_name = %type_name::<T>(),
        json = %value,
        "deserializing decoded response"
    );

    // Kept to look up the offending values once deserialization is done
    let original = value.clone();
    let mut unknown_paths: Vec<String> = Vec::new();

    let result: T = serde_ignored::deserialize(value, |path| {
        unknown_paths.push(path.to_string());
    })
    .inspect_err(|_| {
        let path_result: std::result::Result<T, _> =
            serde_path_to_error::deserialize(original.clone());
        if let Err(path_err) = path_result {
            let path = path_err.path().to_string();
            tracing::error!(
                type_name = %type_name::<T>(),
                path = %path,
                value = %format_value(lookup_value(&original, &path)),
                error = %path_err.inner(),
                "deserialization failed"
            );
        }
    })?;

    for path in unknown_paths {
        tracing::warn!(
            type_name = %type_name::<T>(),
            field = %path,
            value = %format_value(lookup_value(&original, &path)),
            "unknown field in MWS response"
        );
    }

    Ok(result)
}

/// Pass-through deserialization when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub fn deserialize_with_warnings<T: DeserializeOwned>(value: JsonValue) -> crate::Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Finds the value a `serde_ignored` or `serde_path_to_error` path points at.
///
/// Both `a.b.0.c` and `a.b[0].c` forms are accepted; `?` segments (option wrappers) are skipped.
#[cfg(feature = "tracing")]
fn lookup_value<'value>(value: &'value JsonValue, path: &str) -> Option<&'value JsonValue> {
    path.split(['.', '[', ']'])
        .filter(|segment| !segment.is_empty() && *segment != "?")
        .try_fold(value, |current, segment| match current {
            JsonValue::Object(map) => map.get(segment),
            JsonValue::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

#[cfg(feature = "tracing")]
fn format_value(value: Option<&JsonValue>) -> String {
    value.map_or_else(|| "<unable to retrieve>".to_owned(), JsonValue::to_string)
}
