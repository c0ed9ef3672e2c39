//! Ordered answer collection produced by a prompt session.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Accumulated results of a prompt session.
///
/// Keys are question names (or positional indices for unnamed questions) in
/// the order the questions were answered. The map grows append-only while a
/// session runs; committed answers are never rewritten. A question skipped by
/// its `when` gate contributes no entry, so lookups for it read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Answers {
    map: IndexMap<String, Value>,
}

impl Answers {
    pub fn new() -> Self {
        Self { map: IndexMap::new() }
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.map.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.map.iter()
    }

    /// Snapshot of the answers as a JSON object, used as the evaluation
    /// context for templated question fields.
    pub fn to_value(&self) -> Value {
        let mut object = serde_json::Map::new();
        for (key, value) in &self.map {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insertion_order_is_preserved() {
        let mut answers = Answers::new();
        answers.insert("z", json!(1));
        answers.insert("a", json!(2));
        answers.insert("m", json!(3));

        let keys: Vec<&str> = answers.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn missing_key_reads_as_none() {
        let answers = Answers::new();
        assert!(answers.get("absent").is_none());
        assert!(!answers.contains("absent"));
        assert!(answers.get_i64("absent").is_none());
    }

    #[test]
    fn typed_accessors() {
        let mut answers = Answers::new();
        answers.insert("age", json!(25));
        answers.insert("name", json!("sam"));
        answers.insert("agree", json!(true));
        answers.insert("drinks", json!(["Wine"]));

        assert_eq!(answers.get_i64("age"), Some(25));
        assert_eq!(answers.get_str("name"), Some("sam"));
        assert_eq!(answers.get_bool("agree"), Some(true));
        assert_eq!(answers.get_array("drinks").map(Vec::len), Some(1));
        // Wrong-typed reads are a miss, not a panic.
        assert_eq!(answers.get_i64("name"), None);
    }

    #[test]
    fn to_value_produces_a_json_object() {
        let mut answers = Answers::new();
        answers.insert("age", json!(15));
        assert_eq!(answers.to_value(), json!({ "age": 15 }));
    }
}
