/*!
Short keys for question texts.

Survey exports label their columns with the full text of each question,
which makes for unwieldy identifiers. A [`QuestionKeyMap`] hands out short
keys (`"1"`, `"2"`, ...) in the order the texts are first seen and keeps
the reverse lookup for reports.

The map belongs to the caller: one map per analysis run, passed to whatever
needs to resolve keys or texts.

```
use likert_stats::question_map::QuestionKeyMap;

let mut qmap = QuestionKeyMap::new();
let k = qmap.get_or_create_key("The course was well organized.");
assert_eq!(k, "1");
assert_eq!(qmap.get_or_create_key("The course was well organized."), "1");
assert_eq!(qmap.text_for_key("1"), Some("The course was well organized."));
```
*/

use std::collections::HashMap;

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct QuestionKeyMap {
    key_by_text: HashMap<String, String>,
    text_by_key: HashMap<String, String>,
    counter: u32,
}

impl QuestionKeyMap {
    pub fn new() -> QuestionKeyMap {
        QuestionKeyMap::default()
    }

    /// Returns the key of a question text, allocating the next free key if
    /// the text has not been seen yet.
    pub fn get_or_create_key(&mut self, text: &str) -> String {
        if let Some(k) = self.key_by_text.get(text) {
            return k.clone();
        }
        let key = loop {
            self.counter += 1;
            let candidate = self.counter.to_string();
            // Skip keys that were registered explicitly.
            if !self.text_by_key.contains_key(&candidate) {
                break candidate;
            }
        };
        self.insert(&key, text);
        key
    }

    /// Registers an explicit key for a text. Any previous pairing of either
    /// the key or the text is replaced.
    pub fn insert(&mut self, key: &str, text: &str) {
        if let Some(old_text) = self.text_by_key.remove(key) {
            self.key_by_text.remove(&old_text);
        }
        if let Some(old_key) = self.key_by_text.remove(text) {
            self.text_by_key.remove(&old_key);
        }
        self.key_by_text.insert(text.to_string(), key.to_string());
        self.text_by_key.insert(key.to_string(), text.to_string());
    }

    pub fn key_for_text(&self, text: &str) -> Option<&str> {
        self.key_by_text.get(text).map(|s| s.as_str())
    }

    pub fn text_for_key(&self, key: &str) -> Option<&str> {
        self.text_by_key.get(key).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.text_by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text_by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_allocated_in_order() {
        let mut qmap = QuestionKeyMap::new();
        assert_eq!(qmap.get_or_create_key("a"), "1");
        assert_eq!(qmap.get_or_create_key("b"), "2");
        assert_eq!(qmap.get_or_create_key("a"), "1");
        assert_eq!(qmap.len(), 2);
        assert_eq!(qmap.key_for_text("b"), Some("2"));
        assert_eq!(qmap.text_for_key("3"), None);
    }

    #[test]
    fn maps_are_independent() {
        let mut m1 = QuestionKeyMap::new();
        let mut m2 = QuestionKeyMap::new();
        m1.get_or_create_key("a");
        m1.get_or_create_key("b");
        assert_eq!(m2.get_or_create_key("b"), "1");
        assert_eq!(m1.key_for_text("b"), Some("2"));
    }

    #[test]
    fn explicit_keys_are_not_reused() {
        let mut qmap = QuestionKeyMap::new();
        qmap.insert("1", "representation");
        assert_eq!(qmap.get_or_create_key("belonging"), "2");
        assert_eq!(qmap.get_or_create_key("representation"), "1");
    }

    #[test]
    fn insert_replaces_previous_pairing() {
        let mut qmap = QuestionKeyMap::new();
        qmap.insert("question7", "old text");
        qmap.insert("question7", "new text");
        assert_eq!(qmap.text_for_key("question7"), Some("new text"));
        assert_eq!(qmap.key_for_text("old text"), None);
        assert_eq!(qmap.len(), 1);
    }
}
