//! Query parameters sent to the API, and their wire encoding.

use std::collections::BTreeMap;

/// Wire name → one or more values.
///
/// Keys iterate in ascending byte order and each key keeps its values in
/// insertion order, so [`ParameterSet::encode`] is deterministic. The signer
/// and the transmitted URL both rely on that: they encode the same set and
/// must produce the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: BTreeMap<String, Vec<String>>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the values already held under `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .entry(key.into())
            .or_default()
            .push(value.into());
    }

    /// Replaces every value held under `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), vec![value.into()]);
    }

    /// First value under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.values.remove(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Every `(key, value)` pair in encoding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Moves every pair of `other` into `self`, appending to existing keys.
    pub fn extend_from(&mut self, other: ParameterSet) {
        for (key, values) in other.values {
            self.values.entry(key).or_default().extend(values);
        }
    }

    /// `key=value` pairs joined with `&`, sorted by key, both sides escaped
    /// with [`query_escape`].
    pub fn encode(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}={}", query_escape(key), query_escape(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (key, value) in iter {
            set.add(key, value);
        }
        set
    }
}

/// Escapes one query component.
///
/// `A-Z a-z 0-9 - _ . ~` pass through, a space becomes `+` and every other
/// byte becomes `%XX` with uppercase hex. The API recomputes signatures from
/// this exact form.
pub fn query_escape(text: &str) -> String {
    // urlencoding emits a space as %20; a literal '%' is always %25, so
    // every %20 in its output stands for a space.
    urlencoding::encode(text).replace("%20", "+")
}
