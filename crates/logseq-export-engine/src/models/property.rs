use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// A `name:: value` pair attached to a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

fn property_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([a-zA-Z][a-zA-Z0-9_-]*):: (.*)$").expect("Invalid property regex")
    })
}

/// Strips a single `[[...]]` wrapper, if the whole value is one.
pub fn unwrap_page_link(value: &str) -> &str {
    value
        .strip_prefix("[[")
        .and_then(|v| v.strip_suffix("]]"))
        .unwrap_or(value)
}

impl Property {
    pub const LIST_SEPARATOR: char = ',';

    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parses a `name:: value` line. Returns `None` for ordinary text.
    pub fn parse_line(line: &str) -> Option<Self> {
        let caps = property_regex().captures(line)?;
        Some(Self::new(&caps[1], &caps[2]))
    }

    /// The value with any `[[...]]` wrapper removed.
    pub fn as_str(&self) -> &str {
        unwrap_page_link(self.value.trim())
    }

    /// Only the literal `true` is true.
    pub fn to_bool(&self) -> bool {
        self.value.trim() == "true"
    }

    pub fn is_page_link(&self) -> bool {
        let v = self.value.trim();
        v.starts_with("[[") && v.ends_with("]]") && v.len() > 4
    }

    /// Splits a comma separated value, unwrapping any `[[page]]` items.
    pub fn to_list(&self) -> Vec<String> {
        self.value
            .split(Self::LIST_SEPARATOR)
            .map(|item| unwrap_page_link(item.trim()).trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A block's properties, keyed by lowercase name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertyMap {
    properties: BTreeMap<String, Property>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.get(&name.to_lowercase())
    }

    /// Inserts or replaces a property, returning the previous one.
    pub fn set(&mut self, property: Property) -> Option<Property> {
        self.properties
            .insert(property.name.to_lowercase(), property)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(&name.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// The value of `name` as a list, or empty when unset.
    pub fn list(&self, name: &str) -> Vec<String> {
        self.get(name).map(Property::to_list).unwrap_or_default()
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).map(Property::to_bool)
    }
}
