use std::collections::btree_map::{BTreeMap, Iter, Keys};
use std::fmt;

/// Configuration of a Connector or of a Task.
///
/// Values are stored in their string representation and parsed on read by the typed accessors.
/// Entries are kept sorted by key: two [`ConnectKeyValue`] with the same entries iterate
/// (and render via [`fmt::Display`]) identically, no matter the order they were inserted in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct ConnectKeyValue {
    properties: BTreeMap<String, String>,
}

impl ConnectKeyValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to the string representation of `value`, returning the previous value (if any).
    pub fn put<K: Into<String>, V: ToString>(&mut self, key: K, value: V) -> Option<String> {
        self.properties.insert(key.into(), value.to_string())
    }

    /// Builder-style variant of [`Self::put`].
    pub fn with<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.put(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.properties.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn get_string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_string(key).unwrap_or(default)
    }

    /// Value of `key` as `i32`, or `default` if absent or not a valid integer.
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        self.get_string(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default)
    }

    /// Value of `key` as `i64`, or `default` if absent or not a valid integer.
    pub fn get_long(&self, key: &str, default: i64) -> i64 {
        self.get_string(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default)
    }

    /// `true` only if `key` is set to `"true"` (ignoring case).
    pub fn get_bool(&self, key: &str) -> bool {
        self.get_string(key).is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    pub fn keys(&self) -> Keys<'_, String, String> {
        self.properties.keys()
    }

    pub fn iter(&self) -> Iter<'_, String, String> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<'a> IntoIterator for &'a ConnectKeyValue {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for ConnectKeyValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ckv = Self::new();
        for (k, v) in iter {
            ckv.put(k, v);
        }
        ckv
    }
}

impl<K: Into<String>, V: ToString, const N: usize> From<[(K, V); N]> for ConnectKeyValue {
    fn from(entries: [(K, V); N]) -> Self {
        Self::from_iter(entries)
    }
}

impl fmt::Display for ConnectKeyValue {
    /// Renders as `{k1=v1, k2=v2, ...}`, in key order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str("}")
    }
}
