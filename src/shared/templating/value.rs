use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::fmt;

/// Variables available to one substitution pass, keyed by top-level name
pub type ContextMap = BTreeMap<String, ContextValue>;

/// A value in the context bag.
///
/// Each variant has a fixed textual form used when it is substituted into a template:
/// strings verbatim, numbers in their JSON form, booleans as `true`/`false`, lists as
/// their elements joined by `", "`, and maps as compact JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    /// Present but empty. Placeholders resolving to `Null` are left unresolved.
    Null,
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    List(Vec<ContextValue>),
    Map(ContextMap),
}

impl ContextValue {
    /// Walk a dotted path below this value.
    ///
    /// Only maps can be traversed; anything else ends the walk with `None`.
    pub fn lookup<'a, I>(&self, segments: I) -> Option<&ContextValue>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = self;
        for segment in segments {
            match current {
                ContextValue::Map(map) => current = map.get(segment)?,
                _ => return None,
            }
        }
        match current {
            ContextValue::Null => None,
            value => Some(value),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ContextValue::Null)
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Null => Ok(()),
            ContextValue::String(s) => f.write_str(s),
            ContextValue::Number(n) => write!(f, "{}", n),
            ContextValue::Bool(b) => write!(f, "{}", b),
            ContextValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            ContextValue::Map(_) => write!(f, "{}", serde_json::Value::from(self)),
        }
    }
}

/// Format a timestamp the way it is exposed to templates (`2024-05-01T09:30:00.000Z`)
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::String(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::String(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Number(value.into())
    }
}

impl From<i32> for ContextValue {
    fn from(value: i32) -> Self {
        ContextValue::Number(value.into())
    }
}

impl From<u64> for ContextValue {
    fn from(value: u64) -> Self {
        ContextValue::Number(value.into())
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        // NaN and infinities have no JSON number form
        match serde_json::Number::from_f64(value) {
            Some(n) => ContextValue::Number(n),
            None => ContextValue::String(value.to_string()),
        }
    }
}

impl From<DateTime<Utc>> for ContextValue {
    fn from(value: DateTime<Utc>) -> Self {
        ContextValue::String(iso_timestamp(value))
    }
}

impl From<uuid::Uuid> for ContextValue {
    fn from(value: uuid::Uuid) -> Self {
        ContextValue::String(value.to_string())
    }
}

impl From<ContextMap> for ContextValue {
    fn from(value: ContextMap) -> Self {
        ContextValue::Map(value)
    }
}

impl<T: Into<ContextValue>> From<Vec<T>> for ContextValue {
    fn from(value: Vec<T>) -> Self {
        ContextValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for ContextValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ContextValue::Null,
            serde_json::Value::Bool(b) => ContextValue::Bool(b),
            serde_json::Value::Number(n) => ContextValue::Number(n),
            serde_json::Value::String(s) => ContextValue::String(s),
            serde_json::Value::Array(items) => {
                ContextValue::List(items.into_iter().map(ContextValue::from).collect())
            }
            serde_json::Value::Object(map) => ContextValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, ContextValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&ContextValue> for serde_json::Value {
    fn from(value: &ContextValue) -> Self {
        match value {
            ContextValue::Null => serde_json::Value::Null,
            ContextValue::String(s) => serde_json::Value::String(s.clone()),
            ContextValue::Number(n) => serde_json::Value::Number(n.clone()),
            ContextValue::Bool(b) => serde_json::Value::Bool(*b),
            ContextValue::List(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            ContextValue::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_display_per_variant() {
        assert_eq!(ContextValue::from("hello").to_string(), "hello");
        assert_eq!(ContextValue::from(42i64).to_string(), "42");
        assert_eq!(ContextValue::from(1.5f64).to_string(), "1.5");
        assert_eq!(ContextValue::from(true).to_string(), "true");
        assert_eq!(ContextValue::from(vec!["a", "b", "c"]).to_string(), "a, b, c");
        assert_eq!(ContextValue::Null.to_string(), "");
    }

    #[test]
    fn test_map_displays_as_compact_json() {
        let value = ContextValue::from(json!({"b": 2, "a": "x"}));
        assert_eq!(value.to_string(), r#"{"a":"x","b":2}"#);
    }

    #[test]
    fn test_non_finite_float_falls_back_to_text() {
        assert_eq!(ContextValue::from(f64::NAN), ContextValue::String("NaN".into()));
    }

    #[test]
    fn test_timestamp_is_iso_8601_with_millis() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2024-05-01T09:30:00.000Z");
        assert_eq!(
            ContextValue::from(at),
            ContextValue::String("2024-05-01T09:30:00.000Z".into())
        );
    }

    #[test]
    fn test_lookup_walks_nested_maps() {
        let value = ContextValue::from(json!({
            "user": {"profile": {"name": "Sam"}, "tags": ["a"]},
            "empty": null
        }));

        assert_eq!(
            value.lookup(["user", "profile", "name"]),
            Some(&ContextValue::String("Sam".into()))
        );
        assert_eq!(value.lookup(["user", "missing"]), None);
        assert_eq!(value.lookup(["user", "tags", "0"]), None);
        assert_eq!(value.lookup(["empty"]), None);
    }

    #[test]
    fn test_json_conversion_is_lossless_for_json_input() {
        let original = json!({"n": 3, "list": [true, "x", 2.5], "nested": {"k": "v"}});
        let value = ContextValue::from(original.clone());
        assert_eq!(serde_json::Value::from(&value), original);
    }
}
