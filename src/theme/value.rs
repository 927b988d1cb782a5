//! Theme values and the deep-merge operation
//!
//! Theme documents are plain JSON, but composition works on a closed variant
//! type so merge semantics are total:
//!
//! - `Map ⊕ Map` merges key-wise, recursively (right side wins per key)
//! - anything else: the right side replaces the left wholesale
//!   (lists are never concatenated)

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Attribute map, in document order
pub type ThemeMap = IndexMap<String, ThemeValue>;

/// Leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Closed variant over everything a theme document can hold
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeValue {
    Scalar(Scalar),
    List(Vec<ThemeValue>),
    Map(ThemeMap),
}

impl ThemeValue {
    pub fn null() -> Self {
        ThemeValue::Scalar(Scalar::Null)
    }

    pub fn empty_map() -> Self {
        ThemeValue::Map(ThemeMap::new())
    }

    pub fn as_map(&self) -> Option<&ThemeMap> {
        match self {
            ThemeValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ThemeValue::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ThemeValue::Scalar(Scalar::Null))
    }

    /// Short type name for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            ThemeValue::Scalar(Scalar::Null) => "null",
            ThemeValue::Scalar(Scalar::Bool(_)) => "bool",
            ThemeValue::Scalar(Scalar::Int(_)) => "int",
            ThemeValue::Scalar(Scalar::Float(_)) => "float",
            ThemeValue::Scalar(Scalar::Str(_)) => "string",
            ThemeValue::List(_) => "list",
            ThemeValue::Map(_) => "map",
        }
    }

    /// Back to JSON for typed deserialization
    pub fn to_json(&self) -> Value {
        match self {
            ThemeValue::Scalar(Scalar::Null) => Value::Null,
            ThemeValue::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            ThemeValue::Scalar(Scalar::Int(i)) => Value::Number((*i).into()),
            ThemeValue::Scalar(Scalar::Float(f)) => {
                Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null)
            }
            ThemeValue::Scalar(Scalar::Str(s)) => Value::String(s.clone()),
            ThemeValue::List(items) => Value::Array(items.iter().map(|v| v.to_json()).collect()),
            ThemeValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for ThemeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ThemeValue::Scalar(Scalar::Null),
            Value::Bool(b) => ThemeValue::Scalar(Scalar::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) if !n.is_f64() => ThemeValue::Scalar(Scalar::Int(i)),
                _ => ThemeValue::Scalar(Scalar::Float(n.as_f64().unwrap_or_default())),
            },
            Value::String(s) => ThemeValue::Scalar(Scalar::Str(s)),
            Value::Array(items) => ThemeValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                ThemeValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&str> for ThemeValue {
    fn from(s: &str) -> Self {
        ThemeValue::Scalar(Scalar::Str(s.to_string()))
    }
}

impl From<ThemeMap> for ThemeValue {
    fn from(map: ThemeMap) -> Self {
        ThemeValue::Map(map)
    }
}

impl Serialize for ThemeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Deep merge, `over` wins
pub fn merge(base: &ThemeValue, over: &ThemeValue) -> ThemeValue {
    match (base, over) {
        (ThemeValue::Map(base), ThemeValue::Map(over)) => ThemeValue::Map(merge_maps(base, over)),
        (_, over) => over.clone(),
    }
}

/// Key-wise merge of two maps; keys keep first-seen order
pub fn merge_maps(base: &ThemeMap, over: &ThemeMap) -> ThemeMap {
    let mut out = base.clone();
    for (key, value) in over {
        let merged = match out.get(key) {
            Some(existing) => merge(existing, value),
            None => value.clone(),
        };
        out.insert(key.clone(), merged);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tv(v: Value) -> ThemeValue {
        v.into()
    }

    #[test]
    fn scalars_replace() {
        assert_eq!(merge(&tv(json!(1)), &tv(json!("x"))), tv(json!("x")));
        assert_eq!(merge(&tv(json!({"a": 1})), &tv(json!(null))), tv(json!(null)));
    }

    #[test]
    fn lists_replace_wholesale() {
        let merged = merge(&tv(json!({"l": [1, 2, 3]})), &tv(json!({"l": [9]})));
        assert_eq!(merged, tv(json!({"l": [9]})));
    }

    #[test]
    fn maps_merge_recursively() {
        let base = tv(json!({"font": {"name": "a", "size": 10}, "fill": "#000000"}));
        let over = tv(json!({"font": {"size": 12}, "text": "hi"}));
        assert_eq!(
            merge(&base, &over),
            tv(json!({
                "font": {"name": "a", "size": 12},
                "fill": "#000000",
                "text": "hi"
            }))
        );
    }

    #[test]
    fn merge_with_self_is_identity() {
        let doc = tv(json!({
            "a": {"b": [1, 2], "c": {"d": true}},
            "e": 1.5,
        }));
        assert_eq!(merge(&doc, &doc), doc);
    }

    #[test]
    fn ints_and_floats_stay_distinct() {
        assert_eq!(tv(json!(1)).kind(), "int");
        assert_eq!(tv(json!(1.0)).kind(), "float");
        assert_eq!(tv(json!(1.0)).to_json(), json!(1.0));
        assert_eq!(tv(json!(-3)).to_json(), json!(-3));
    }

    #[test]
    fn merged_keys_keep_document_order() {
        let base = tv(json!({"z": 1, "a": 2}));
        let over = tv(json!({"m": 3, "z": 4}));
        let merged = merge(&base, &over);
        let keys: Vec<_> = merged.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
