use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde_json::Value as JsonValue;

/// Extract the named top-level field of a GraphQL `data` object
///
/// A `null` data, a missing field or a `null` field yield `Ok(None)`. Data
/// that is not an object, or a field of the wrong shape, is an error.
pub fn unwrap_field<T: DeserializeOwned>(
    data: JsonValue,
    field: &str,
) -> Result<Option<T>, serde_json::Error> {
    match data {
        JsonValue::Object(mut map) => match map.remove(field) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some),
        },
        JsonValue::Null => Ok(None),
        other => Err(serde_json::Error::invalid_type(
            unexpected(&other),
            &"a GraphQL data object",
        )),
    }
}

fn unexpected(value: &JsonValue) -> Unexpected<'_> {
    match value {
        JsonValue::Bool(b) => Unexpected::Bool(*b),
        JsonValue::Number(_) => Unexpected::Other("number"),
        JsonValue::String(s) => Unexpected::Str(s),
        JsonValue::Array(_) => Unexpected::Seq,
        JsonValue::Null => Unexpected::Unit,
        JsonValue::Object(_) => Unexpected::Map,
    }
}
