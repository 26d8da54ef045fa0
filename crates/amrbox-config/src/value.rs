//! Loosely typed configuration values.

use amrbox_geom::IndexBox;
use indexmap::IndexMap;
use std::fmt;

/// Key of a [`ConfigValue::Map`] entry.
///
/// Refinement levels may be keyed by name (`"L0"`) or by number (`0`), and
/// named boxes by name (`"B0"`), so map keys carry either form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MapKey {
    /// A string key.
    Name(String),
    /// An integer key.
    Index(i64),
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name:?}"),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for MapKey {
    fn from(v: &str) -> Self {
        Self::Name(v.to_string())
    }
}

impl From<String> for MapKey {
    fn from(v: String) -> Self {
        Self::Name(v)
    }
}

impl From<i64> for MapKey {
    fn from(v: i64) -> Self {
        Self::Index(v)
    }
}

impl From<i32> for MapKey {
    fn from(v: i32) -> Self {
        Self::Index(i64::from(v))
    }
}

/// A single configuration value as supplied by a front end.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    /// Explicitly absent (`None` on the front-end side).
    None,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered sequence (lists and tuples alike).
    List(Vec<ConfigValue>),
    /// An insertion-ordered mapping.
    Map(IndexMap<MapKey, ConfigValue>),
    /// An already-constructed box.
    Box(IndexBox),
}

impl ConfigValue {
    /// Build a [`ConfigValue::Map`] from key/value pairs, keeping their order.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<MapKey>,
        V: Into<ConfigValue>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Box(_) => "box",
        }
    }

    /// Whether this is [`ConfigValue::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The integer payload, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ConfigValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<IndexBox> for ConfigValue {
    fn from(v: IndexBox) -> Self {
        Self::Box(v)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ConfigValue>, const N: usize> From<[T; N]> for ConfigValue {
    fn from(v: [T; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::None, Into::into)
    }
}

impl From<IndexMap<MapKey, ConfigValue>> for ConfigValue {
    fn from(v: IndexMap<MapKey, ConfigValue>) -> Self {
        Self::Map(v)
    }
}

/// Raw, insertion-ordered option map handed over by a simulation front end.
///
/// Order matters only for reporting: when several keys are unknown, the
/// first one inserted is the one reported.
///
/// # Examples
///
/// ```
/// use amrbox_config::{ConfigValue, RawConfig};
/// use amrbox_geom::IndexBox;
///
/// let raw = RawConfig::new()
///     .with("cells", [65])
///     .with(
///         "refinement_boxes",
///         ConfigValue::map([("L0", vec![IndexBox::span(5, 55).unwrap()])]),
///     )
///     .with("nesting_buffer", 1);
/// assert_eq!(raw.len(), 3);
/// assert_eq!(raw.get("nesting_buffer"), Some(&ConfigValue::Int(1)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawConfig {
    entries: IndexMap<String, ConfigValue>,
}

impl RawConfig {
    /// An empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace an option, returning the previous value.
    ///
    /// Replacing keeps the key's original position.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove an option, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.entries.shift_remove(key)
    }

    /// Look up an option.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Whether an option is present (even if it holds [`ConfigValue::None`]).
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no options are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for RawConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_expected_variants() {
        assert_eq!(ConfigValue::from(3), ConfigValue::Int(3));
        assert_eq!(ConfigValue::from(0.5), ConfigValue::Float(0.5));
        assert_eq!(ConfigValue::from("yee"), ConfigValue::Str("yee".into()));
        assert_eq!(ConfigValue::from(None::<i64>), ConfigValue::None);
        assert_eq!(
            ConfigValue::from([1, 2]),
            ConfigValue::List(vec![ConfigValue::Int(1), ConfigValue::Int(2)])
        );
    }

    #[test]
    fn map_keeps_insertion_order() {
        let v = ConfigValue::map([("L1", 1), ("L0", 0)]);
        match v {
            ConfigValue::Map(m) => {
                let keys: Vec<String> = m.keys().map(|k| k.to_string()).collect();
                assert_eq!(keys, vec!["\"L1\"", "\"L0\""]);
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn replacing_a_key_keeps_its_position() {
        let mut raw = RawConfig::new().with("cells", 65).with("nesting_buffer", 0);
        let old = raw.set("cells", 100);
        assert_eq!(old, Some(ConfigValue::Int(65)));
        let keys: Vec<&str> = raw.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["cells", "nesting_buffer"]);
    }

    #[test]
    fn remove_preserves_order() {
        let mut raw: RawConfig = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        raw.remove("b");
        let keys: Vec<&str> = raw.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "c"]);
        assert!(!raw.contains_key("b"));
    }

    #[test]
    fn type_names() {
        assert_eq!(ConfigValue::None.type_name(), "none");
        assert_eq!(ConfigValue::from(vec![1]).type_name(), "list");
        assert_eq!(
            ConfigValue::from(IndexBox::span(0, 1).unwrap()).type_name(),
            "box"
        );
    }
}
