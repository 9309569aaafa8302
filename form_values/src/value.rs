/* Value tree - the nested shape collected from, and written back into, form controls */

use crate::control::FileHandle;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/* Keyed node of a value tree, also used as the root of every tree */
pub type ValueMap = IndexMap<String, FormValue>;

/* Single-level map keyed by full dotted paths */
pub type FlatMap = IndexMap<String, FormValue>;

/* One node of a value tree */
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    /* Explicit null, used to uncheck radio and checkbox controls */
    Null,

    /* Hole in a sparse sequence; skipped on write */
    Undefined,

    Bool(bool),

    String(String),

    /* Selected file of a file control */
    File(FileHandle),

    /* Ordered sequence of values */
    Array(Vec<FormValue>),

    /* Keyed sub-object */
    Map(ValueMap),
}

impl FormValue {
    pub fn string(value: impl Into<String>) -> Self {
        FormValue::String(value.into())
    }

    /* Build an array node from anything that yields values */
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FormValue>,
    {
        FormValue::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, FormValue::Undefined)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, FormValue::Array(_))
    }

    /* Leaves are everything that cannot hold children */
    pub fn is_primitive(&self) -> bool {
        !matches!(self, FormValue::Array(_) | FormValue::Map(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FormValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[FormValue]> {
        match self {
            FormValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            FormValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /* Strict boolean true, the marker used by probe lookups */
    pub fn is_true(&self) -> bool {
        matches!(self, FormValue::Bool(true))
    }

    /* A case-insensitive "on" string, the browser default for checkable controls */
    pub fn is_on(&self) -> bool {
        self.as_str()
            .is_some_and(|value| value.eq_ignore_ascii_case("on"))
    }

    /* Explicit absence or falsity, which unchecks checkable controls */
    pub fn is_off(&self) -> bool {
        matches!(self, FormValue::Null | FormValue::Bool(false))
    }

    /* Text representation used when assigning into a text-like control */
    pub fn to_control_text(&self) -> Option<String> {
        match self {
            FormValue::Null => Some(String::new()),
            FormValue::Bool(value) => Some(value.to_string()),
            FormValue::String(value) => Some(value.clone()),
            FormValue::Array(items) => {
                let parts: Option<Vec<String>> = items
                    .iter()
                    .map(|item| match item {
                        FormValue::Undefined => Some(String::new()),
                        other => other.to_control_text(),
                    })
                    .collect();
                parts.map(|parts| parts.join(","))
            }
            FormValue::Undefined | FormValue::File(_) | FormValue::Map(_) => None,
        }
    }

    /* Convert into a JSON value; holes and nulls both become JSON null */
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FormValue::Null | FormValue::Undefined => serde_json::Value::Null,
            FormValue::Bool(value) => serde_json::Value::Bool(*value),
            FormValue::String(value) => serde_json::Value::String(value.clone()),
            FormValue::File(file) => serde_json::json!({
                "name": file.name,
                "size": file.size,
                "type": file.mime,
            }),
            FormValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(FormValue::to_json).collect())
            }
            FormValue::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::String(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::String(value)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

impl From<FileHandle> for FormValue {
    fn from(value: FileHandle) -> Self {
        FormValue::File(value)
    }
}

impl From<ValueMap> for FormValue {
    fn from(value: ValueMap) -> Self {
        FormValue::Map(value)
    }
}

/* JSON numbers have no control representation, they become their decimal text */
impl From<serde_json::Value> for FormValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FormValue::Null,
            serde_json::Value::Bool(value) => FormValue::Bool(value),
            serde_json::Value::Number(value) => FormValue::String(value.to_string()),
            serde_json::Value::String(value) => FormValue::String(value),
            serde_json::Value::Array(items) => {
                FormValue::Array(items.into_iter().map(FormValue::from).collect())
            }
            serde_json::Value::Object(map) => FormValue::Map(
                map.into_iter()
                    .map(|(key, value)| (key, FormValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for FormValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FormValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(FormValue::from)
    }
}

/* Parse a JSON document into a value map; the document root must be an object */
pub fn map_from_json(input: &str) -> crate::errors::FormValuesResult<ValueMap> {
    Ok(serde_json::from_str(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_numbers_become_text() {
        let value = FormValue::from(serde_json::json!({ "qty": 3, "ok": true }));
        let map = value.as_map().expect("map");
        assert_eq!(map["qty"], FormValue::string("3"));
        assert_eq!(map["ok"], FormValue::Bool(true));
    }

    #[test]
    fn holes_serialize_as_null() {
        let value = FormValue::array([FormValue::Undefined, FormValue::string("b")]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[null,"b"]"#);
    }

    #[test]
    fn on_detection_ignores_case() {
        assert!(FormValue::string("ON").is_on());
        assert!(FormValue::string("On").is_on());
        assert!(!FormValue::string("yes").is_on());
        assert!(!FormValue::Bool(true).is_on());
    }

    #[test]
    fn control_text_joins_arrays() {
        let value = FormValue::array(["a", "b"]);
        assert_eq!(value.to_control_text().as_deref(), Some("a,b"));
        assert_eq!(FormValue::Null.to_control_text().as_deref(), Some(""));
        assert_eq!(FormValue::Map(ValueMap::new()).to_control_text(), None);
    }
}
