use serde_json::Value;

/// Follows `path` through nested objects. Any missing key or non-object step yields `None`.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, key| current.as_object()?.get(*key))
}

/// Same as [`lookup`] but rendered as a CSV cell; absent values become `""`.
pub fn lookup_str(value: &Value, path: &[&str]) -> String {
    lookup(value, path).map(render_value).unwrap_or_default()
}

pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
