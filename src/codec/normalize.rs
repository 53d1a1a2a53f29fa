use super::value::Value;

/// Resolves the one-or-many ambiguity of XML-derived values.
///
/// A [`Value::List`] yields its items, a map with positional keys (`"0"`..`"n-1"`) yields its
/// values in order, anything else is wrapped as a one-element sequence. Apply this wherever a
/// list-shaped field is expected, because a single repeated element decodes without a list.
#[must_use]
pub fn as_sequence(value: Value) -> Vec<Value> {
    match value {
        Value::List(items) => items,
        Value::Map(map) if map.is_positional() => map.into_values(),
        other => vec![other],
    }
}
