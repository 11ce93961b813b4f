//! A2UI Data Model
//!
//! The DataModel is the per-surface value store that bindings read from.
//! Values are addressed with JSON Pointer style paths.

use serde_json::{Map, Value};

use super::error::{A2uiError, A2uiResult};

/// Furthest a write may reach past the end of an array. Gaps are padded with
/// `null`, so this bounds the allocation a single message can cause.
const MAX_ARRAY_GROWTH: usize = 1024;

/// A nested JSON value tree addressed by slash-delimited paths.
///
/// # Path Format
///
/// Paths follow JSON Pointer (RFC 6901) format:
/// - `/` - root
/// - `/foo` - property "foo"
/// - `/foo/bar` - nested property
/// - `/items/0` - array element at index 0
/// - `/a~1b` - property "a/b"
///
/// Reads never fail: a path that walks off the tree is simply absent.
/// Writes materialize missing intermediate objects and arrays.
///
/// # Example
///
/// ```rust,ignore
/// let mut model = DataModel::new();
///
/// model.set("/user/name", json!("Alice"))?;
/// model.set("/items", json!([{"id": 1}, {"id": 2}]))?;
///
/// let name = model.get_string("/user/name"); // Some("Alice")
/// let id = model.get_number("/items/0/id");  // Some(1.0)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataModel {
    /// The root data value
    data: Value,

    /// Bumped on every successful write
    version: u64,
}

impl Default for DataModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DataModel {
    /// Create a new empty data model
    pub fn new() -> Self {
        DataModel {
            data: Value::Object(Map::new()),
            version: 0,
        }
    }

    /// Create a data model with initial data
    pub fn with_data(data: Value) -> Self {
        DataModel { data, version: 0 }
    }

    /// Get the current version number
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get a value at the given path
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.data;
        for segment in parse_pointer(path) {
            current = match current {
                Value::Object(map) => map.get(&segment)?,
                Value::Array(arr) => arr.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Get a string value at the given path
    pub fn get_string(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    /// Get a number value at the given path
    pub fn get_number(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(|v| v.as_f64())
    }

    /// Get a boolean value at the given path
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(|v| v.as_bool())
    }

    /// Get an array value at the given path
    pub fn get_array(&self, path: &str) -> Option<&Vec<Value>> {
        self.get(path).and_then(|v| v.as_array())
    }

    /// Overwrite the subtree at `path`.
    ///
    /// On error the model is left untouched.
    pub fn set(&mut self, path: &str, value: Value) -> A2uiResult<()> {
        let segments = parse_pointer(path);
        self.check_writable(path, &segments)?;

        let Some((last, parents)) = segments.split_last() else {
            self.data = value;
            self.version += 1;
            return Ok(());
        };

        let mut current = &mut self.data;
        for segment in parents {
            current = child_slot(current, segment, path)?;
        }
        *child_slot(current, last, path)? = value;
        self.version += 1;
        Ok(())
    }

    /// Shallow merge at `path`.
    ///
    /// When both the existing value and `value` are objects, the keys of
    /// `value` overwrite their counterparts and every other key is kept.
    /// Nested objects are replaced, not merged. In every other case this
    /// behaves like [`DataModel::set`].
    pub fn merge(&mut self, path: &str, value: Value) -> A2uiResult<()> {
        let Value::Object(incoming) = value else {
            return self.set(path, value);
        };

        let segments = parse_pointer(path);
        self.check_writable(path, &segments)?;

        match self.get_mut_by_segments(&segments) {
            Some(Value::Object(existing)) => {
                existing.extend(incoming);
                self.version += 1;
                Ok(())
            }
            _ => self.set(path, Value::Object(incoming)),
        }
    }

    /// Delete a value at the given path
    pub fn delete(&mut self, path: &str) -> bool {
        let segments = parse_pointer(path);

        let Some((last, parents)) = segments.split_last() else {
            self.data = Value::Object(Map::new());
            self.version += 1;
            return true;
        };

        let removed = match self.get_mut_by_segments(parents) {
            Some(Value::Object(map)) => map.remove(last).is_some(),
            Some(Value::Array(arr)) => match last.parse::<usize>() {
                Ok(index) if index < arr.len() => {
                    arr.remove(index);
                    true
                }
                _ => false,
            },
            _ => false,
        };

        if removed {
            self.version += 1;
        }
        removed
    }

    /// Get the entire data as a Value
    pub fn as_value(&self) -> &Value {
        &self.data
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn get_mut_by_segments(&mut self, segments: &[String]) -> Option<&mut Value> {
        let mut current = &mut self.data;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get_mut(segment)?,
                Value::Array(arr) => arr.get_mut(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Walk `segments` the way [`child_slot`] would and report whether the
    /// write can succeed. Missing, null and scalar slots become a container
    /// shaped by the next segment, so a numeric segment there starts a fresh
    /// array and is held to the same growth limit.
    fn check_writable(&self, path: &str, segments: &[String]) -> A2uiResult<()> {
        let mut current = Some(&self.data);
        for segment in segments {
            current = match current {
                Some(Value::Object(map)) => map.get(segment),
                Some(Value::Array(arr)) => {
                    let index = parse_index(segment, path)?;
                    check_growth(index, arr.len(), path)?;
                    arr.get(index)
                }
                _ => {
                    if let Ok(index) = segment.parse::<usize>() {
                        check_growth(index, 0, path)?;
                    }
                    None
                }
            };
        }
        Ok(())
    }
}

/// Return the slot for `segment` inside `current`, turning `current` into a
/// suitable container first if it is not one already.
fn child_slot<'a>(current: &'a mut Value, segment: &str, path: &str) -> A2uiResult<&'a mut Value> {
    if !current.is_object() && !current.is_array() {
        *current = empty_container_for(segment);
    }

    match current {
        Value::Object(map) => Ok(map.entry(segment.to_string()).or_insert(Value::Null)),
        Value::Array(arr) => {
            let index = parse_index(segment, path)?;
            check_growth(index, arr.len(), path)?;
            if index >= arr.len() {
                arr.resize(index + 1, Value::Null);
            }
            Ok(&mut arr[index])
        }
        _ => Err(invalid_path(path, "cannot descend into a scalar")),
    }
}

fn check_growth(index: usize, len: usize, path: &str) -> A2uiResult<()> {
    if index > len + MAX_ARRAY_GROWTH {
        return Err(invalid_path(path, "array index too far past the end"));
    }
    Ok(())
}

fn empty_container_for(segment: &str) -> Value {
    if segment.parse::<usize>().is_ok() {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

fn parse_index(segment: &str, path: &str) -> A2uiResult<usize> {
    segment
        .parse::<usize>()
        .map_err(|_| invalid_path(path, format!("`{}` is not an array index", segment)))
}

fn invalid_path(path: &str, reason: impl Into<String>) -> A2uiError {
    A2uiError::InvalidPath {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Split a JSON Pointer path into unescaped segments.
///
/// The leading slash is optional and a trailing slash is ignored, so `/`, ``
/// and `/user/` address the root and `user` respectively.
pub fn parse_pointer(path: &str) -> Vec<String> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return vec![];
    }

    trimmed
        .split('/')
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Append `key` to `base`, escaping it as a single pointer segment.
pub fn join_path(base: &str, key: &str) -> String {
    let key = key.replace('~', "~0").replace('/', "~1");
    let base = base.trim_end_matches('/');
    format!("{}/{}", base, key)
}

/// Resolve a path with optional scope prefix.
/// - If path starts with `/`, it's absolute (use as-is)
/// - Otherwise, it's relative (prepend scope)
pub fn resolve_path(path: &str, scope: Option<&str>) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else if let Some(scope_prefix) = scope {
        format!("{}/{}", scope_prefix.trim_end_matches('/'), path)
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_set_basic() {
        let mut model = DataModel::new();

        model.set("/name", json!("Alice")).unwrap();
        assert_eq!(model.get_string("/name"), Some("Alice"));

        model.set("/count", json!(42)).unwrap();
        assert_eq!(model.get_number("/count"), Some(42.0));

        model.set("/enabled", json!(true)).unwrap();
        assert_eq!(model.get_bool("/enabled"), Some(true));
    }

    #[test]
    fn test_nested_paths_materialize() {
        let mut model = DataModel::new();

        model.set("/user/name", json!("Alice")).unwrap();
        model.set("/user/email", json!("alice@example.com")).unwrap();
        model.set("/items/1/label", json!("second")).unwrap();

        assert_eq!(model.get_string("/user/name"), Some("Alice"));
        assert_eq!(model.get_string("/user/email"), Some("alice@example.com"));
        assert_eq!(model.get("/items/0"), Some(&Value::Null));
        assert_eq!(model.get_string("/items/1/label"), Some("second"));
    }

    #[test]
    fn test_array_access() {
        let mut model = DataModel::new();

        model.set("/items", json!([{"id": 1}, {"id": 2}, {"id": 3}])).unwrap();

        assert_eq!(model.get_number("/items/0/id"), Some(1.0));
        assert_eq!(model.get_number("/items/2/id"), Some(3.0));
        assert_eq!(model.get("/items/3/id"), None);
        assert_eq!(model.get("/items/x"), None);
    }

    #[test]
    fn test_missing_intermediate_is_absent() {
        let model = DataModel::with_data(json!({"user": "flat"}));
        assert_eq!(model.get("/user/name"), None);
        assert_eq!(model.get("/nobody/home"), None);
    }

    #[test]
    fn test_scalar_intermediate_is_replaced() {
        let mut model = DataModel::with_data(json!({"user": "flat"}));
        model.set("/user/name", json!("Bob")).unwrap();
        assert_eq!(model.as_value(), &json!({"user": {"name": "Bob"}}));
    }

    #[test]
    fn test_non_index_into_array_is_rejected_without_mutation() {
        let mut model = DataModel::with_data(json!({"items": [1, 2]}));
        let before = model.clone();

        let err = model.set("/items/name/deep", json!(1)).unwrap_err();
        assert!(matches!(err, A2uiError::InvalidPath { .. }));
        assert_eq!(model, before);
    }

    #[test]
    fn test_runaway_index_is_rejected() {
        let mut model = DataModel::with_data(json!({"items": []}));
        assert!(model.set("/items/100000", json!(1)).is_err());
        assert_eq!(model.get_array("/items").map(Vec::len), Some(0));
    }

    #[test]
    fn test_runaway_index_in_fresh_array_is_rejected_without_mutation() {
        let mut model = DataModel::with_data(json!({"a": null}));
        let before = model.clone();

        assert!(model.set("/fresh/100000", json!(1)).is_err());
        assert!(model.set("/a/5000", json!(1)).is_err());
        assert!(model.set("/a/b/0/9999", json!(1)).is_err());
        assert!(model.merge("/deep/70000", json!({"k": 1})).is_err());
        assert_eq!(model, before);

        model.set("/a/3", json!(1)).unwrap();
        assert_eq!(model.get("/a"), Some(&json!([null, null, null, 1])));
    }

    #[test]
    fn test_set_root_replaces_everything() {
        let mut model = DataModel::with_data(json!({"a": 1}));
        model.set("/", json!({"b": 2})).unwrap();
        assert_eq!(model.as_value(), &json!({"b": 2}));
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut model = DataModel::with_data(json!({"a": 1, "b": 2, "nested": {"x": 1, "y": 2}}));

        model.merge("/", json!({"b": 3, "nested": {"x": 9}})).unwrap();

        assert_eq!(
            model.as_value(),
            &json!({"a": 1, "b": 3, "nested": {"x": 9}})
        );
    }

    #[test]
    fn test_merge_at_missing_path_sets() {
        let mut model = DataModel::new();
        model.merge("/user", json!({"name": "Ann"})).unwrap();
        assert_eq!(model.get_string("/user/name"), Some("Ann"));
    }

    #[test]
    fn test_merge_scalar_overwrites() {
        let mut model = DataModel::with_data(json!({"user": {"name": "Ann"}}));
        model.merge("/user", json!("gone")).unwrap();
        assert_eq!(model.get_string("/user"), Some("gone"));
    }

    #[test]
    fn test_pointer_escapes() {
        let mut model = DataModel::new();
        model.set("/a~1b/c~0d", json!(1)).unwrap();
        assert_eq!(model.as_value(), &json!({"a/b": {"c~d": 1}}));
        assert_eq!(join_path("/", "a/b"), "/a~1b");
        assert_eq!(join_path("/x/", "c~d"), "/x/c~0d");
    }

    #[test]
    fn test_delete() {
        let mut model = DataModel::new();

        model.set("/name", json!("Alice")).unwrap();
        assert!(model.delete("/name"));
        assert!(model.get("/name").is_none());
        assert!(!model.delete("/name"));
    }

    #[test]
    fn test_version() {
        let mut model = DataModel::new();

        let v0 = model.version();
        model.set("/name", json!("Alice")).unwrap();
        let v1 = model.version();
        let _ = model.delete("/missing");

        assert!(v1 > v0);
        assert_eq!(model.version(), v1);
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(resolve_path("/abs", Some("/items/0")), "/abs");
        assert_eq!(resolve_path("name", Some("/items/0")), "/items/0/name");
        assert_eq!(resolve_path("name", None), "/name");
    }
}
