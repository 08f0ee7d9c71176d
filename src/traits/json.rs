use serde_json::Value;

/// Optional field access over a JSON object node.
///
/// Every accessor returns `None` when the node is not an object, the field is absent, the field is
/// null, or the field has a different type. Nothing here fails.
pub trait JsonExt {
    /// The field's value if it is present and not null.
    fn field(&self, key: &str) -> Option<&Value>;

    fn string(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    /// The field's value if it is a string with at least one character.
    fn non_empty_string(&self, key: &str) -> Option<&str> {
        self.string(key).filter(|value| !value.is_empty())
    }

    fn bool(&self, key: &str) -> Option<bool> {
        self.field(key).and_then(Value::as_bool)
    }

    fn int(&self, key: &str) -> Option<i64> {
        self.field(key).and_then(Value::as_i64)
    }

    fn array(&self, key: &str) -> Option<&[Value]> {
        self.field(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// The field's value if it is a JSON object.
    fn object(&self, key: &str) -> Option<&Value> {
        self.field(key).filter(|value| value.is_object())
    }

    /// The non-empty strings of an array field, skipping elements of any other type.
    fn string_array(&self, key: &str) -> Vec<String> {
        self.array(key)
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

impl JsonExt for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|value| !value.is_null())
    }
}
