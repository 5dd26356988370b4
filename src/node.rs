//! Read-only navigation over parsed JSON.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A borrowed view of one JSON value inside a response.
///
/// Objects and arrays can be walked field by field with [`get`](Node::get)
/// and [`index`](Node::index); scalar leaves are read with the `as_*`
/// accessors.
///
/// # Examples
///
/// ```
/// use chessdotcom::Response;
///
/// let response = Response::new(r#"{"player": {"name": "Magnus", "ratings": [2830]}}"#, None, false);
/// let player = response.get("player")?;
///
/// assert_eq!(player.get("name")?.as_str(), Some("Magnus"));
/// assert_eq!(player.path("ratings.0")?.as_i64(), Some(2830));
/// # Ok::<(), chessdotcom::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node<'a> {
    value: &'a Value,
}

/// The shape of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind<'a> {
    /// A JSON object.
    Object(&'a Map<String, Value>),
    /// A JSON array.
    Array(&'a [Value]),
    /// A string, number, boolean or null.
    Leaf(&'a Value),
}

impl<'a> Node<'a> {
    /// Wraps a JSON value.
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Returns the underlying JSON value.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Returns the shape of this node.
    pub fn kind(&self) -> Kind<'a> {
        match self.value {
            Value::Object(map) => Kind::Object(map),
            Value::Array(items) => Kind::Array(items),
            leaf => Kind::Leaf(leaf),
        }
    }

    /// Looks up a field of an object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if this is not an object or the
    /// field is absent.
    pub fn get(&self, field: &str) -> Result<Node<'a>> {
        self.value
            .as_object()
            .and_then(|map| map.get(field))
            .map(Node::new)
            .ok_or_else(|| Error::missing(field))
    }

    /// Looks up an element of an array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if this is not an array or the index
    /// is out of bounds.
    pub fn index(&self, index: usize) -> Result<Node<'a>> {
        self.value
            .as_array()
            .and_then(|items| items.get(index))
            .map(Node::new)
            .ok_or_else(|| Error::missing(format!("[{}]", index)))
    }

    /// Follows a dot-separated path of field names and array indices.
    ///
    /// A segment that parses as an integer indexes into an array; any other
    /// segment is a field name.
    pub fn path(&self, path: &str) -> Result<Node<'a>> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(*self, |node, segment| match segment.parse::<usize>() {
                Ok(index) if node.value.is_array() => node.index(index),
                _ => node.get(segment),
            })
    }

    /// Returns `true` if the object has the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.value
            .as_object()
            .is_some_and(|map| map.contains_key(field))
    }

    /// Field names of an object, in document order. Empty for other kinds.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> {
        self.value
            .as_object()
            .into_iter()
            .flat_map(|map| map.keys().map(String::as_str))
    }

    /// Elements of an array. Empty for other kinds.
    pub fn iter(&self) -> impl Iterator<Item = Node<'a>> {
        self.value
            .as_array()
            .into_iter()
            .flat_map(|items| items.iter().map(Node::new))
    }

    /// Number of fields or elements; 0 for leaves.
    pub fn len(&self) -> usize {
        match self.kind() {
            Kind::Object(map) => map.len(),
            Kind::Array(items) => items.len(),
            Kind::Leaf(_) => 0,
        }
    }

    /// Returns `true` if [`len`](Node::len) is 0.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The string value, if this is a string.
    pub fn as_str(&self) -> Option<&'a str> {
        self.value.as_str()
    }

    /// The value as `i64`, if this is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        self.value.as_i64()
    }

    /// The value as `u64`, if this is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        self.value.as_u64()
    }

    /// The value as `f64`, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }

    /// The boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        self.value.as_bool()
    }

    /// Returns `true` if this is JSON `null`.
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Deserializes this node into a typed value.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(self.value).map_err(|e| Error::DeserializationFailed {
            raw_response: self.value.to_string(),
            serde_error: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_nested_lookup() {
        let value = json!({"a": {"b": {"c": [1, {"d": "deep"}]}}});
        let node = Node::new(&value);

        let deep = node
            .get("a")
            .and_then(|n| n.get("b"))
            .and_then(|n| n.get("c"))
            .and_then(|n| n.index(1))
            .and_then(|n| n.get("d"))
            .unwrap();
        assert_eq!(deep.as_str(), Some("deep"));
        assert_eq!(node.path("a.b.c.1.d").unwrap(), deep);
    }

    #[test]
    fn test_kinds() {
        let value = json!({"obj": {}, "arr": [1, 2], "num": 3, "nil": null});
        let node = Node::new(&value);

        assert!(matches!(node.get("obj").unwrap().kind(), Kind::Object(_)));
        assert!(matches!(node.get("arr").unwrap().kind(), Kind::Array(items) if items.len() == 2));
        assert!(matches!(node.get("num").unwrap().kind(), Kind::Leaf(_)));
        assert!(node.get("nil").unwrap().is_null());
    }

    #[test]
    fn test_missing_field_and_index() {
        let value = json!({"list": [1]});
        let node = Node::new(&value);

        match node.get("absent") {
            Err(Error::MissingField { field }) => assert_eq!(field, "absent"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
        match node.path("list.5") {
            Err(Error::MissingField { field }) => assert_eq!(field, "[5]"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
        // field lookup on a leaf fails the same way
        assert!(node.path("list.0.name").is_err());
    }

    #[test]
    fn test_numeric_object_keys() {
        let value = json!({"2024": {"games": 3}});
        let node = Node::new(&value);
        assert_eq!(node.path("2024.games").unwrap().as_u64(), Some(3));
    }

    #[test]
    fn test_keys_and_iter() {
        let value = json!({"players": ["hikaru", "magnuscarlsen"], "count": 2});
        let node = Node::new(&value);

        let keys: Vec<_> = node.keys().collect();
        assert!(keys.contains(&"players") && keys.contains(&"count"));

        let players: Vec<_> = node
            .get("players")
            .unwrap()
            .iter()
            .filter_map(|n| n.as_str())
            .collect();
        assert_eq!(players, ["hikaru", "magnuscarlsen"]);
        assert_eq!(node.get("count").unwrap().len(), 0);
    }

    #[test]
    fn test_deserialize() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Puzzle {
            title: String,
            publish_time: i64,
        }

        let value = json!({"title": "t", "publish_time": 1700000000});
        let puzzle: Puzzle = Node::new(&value).deserialize().unwrap();
        assert_eq!(
            puzzle,
            Puzzle {
                title: "t".to_string(),
                publish_time: 1700000000
            }
        );

        let err = Node::new(&json!("string")).deserialize::<Puzzle>().unwrap_err();
        assert!(matches!(err, Error::DeserializationFailed { .. }));
    }
}
