//! Property-list values and the object table.

use crate::error::{ModelError, ModelResult};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Dictionaries keep keys in byte order, which is also the order Xcode writes.
pub type Dict = BTreeMap<String, Value>;

/// An OpenStep property-list value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Array(Vec<Value>),
    Dict(Dict),
    Data(Vec<u8>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Remove every array element equal to the string `needle`, at any depth.
    fn strip_string(&mut self, needle: &str) -> usize {
        match self {
            Value::Array(items) => {
                let before = items.len();
                items.retain(|v| v.as_str() != Some(needle));
                let mut removed = before - items.len();
                for item in items.iter_mut() {
                    removed += item.strip_string(needle);
                }
                removed
            }
            Value::Dict(d) => d.values_mut().map(|v| v.strip_string(needle)).sum(),
            Value::String(_) | Value::Data(_) => 0,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&ObjectId> for Value {
    fn from(id: &ObjectId) -> Self {
        Value::String(id.0.clone())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

/// Identifier of an object in the `objects` table (24 hex digits in Xcode's output).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A record in the object table: its `isa` plus the remaining fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    isa: String,
    fields: Dict,
}

impl Object {
    pub fn new(isa: impl Into<String>) -> Self {
        Self {
            isa: isa.into(),
            fields: Dict::new(),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub(crate) fn from_dict(id: &str, mut dict: Dict) -> ModelResult<Self> {
        let isa = match dict.remove("isa") {
            Some(Value::String(isa)) => isa,
            _ => {
                return Err(ModelError::structure(format!(
                    "object {id} has no string `isa`"
                )));
            }
        };
        Ok(Self { isa, fields: dict })
    }

    pub fn isa(&self) -> &str {
        &self.isa
    }

    pub fn fields(&self) -> &Dict {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_array(&self, key: &str) -> Option<&[Value]> {
        self.get(key).and_then(Value::as_array)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Append to the array at `key`, creating it when missing.
    pub fn push_to_array(&mut self, key: &str, value: impl Into<Value>) {
        let entry = self
            .fields
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        match entry.as_array_mut() {
            Some(items) => items.push(value.into()),
            None => *entry = Value::Array(vec![value.into()]),
        }
    }

    /// String elements of the array at `key` (typically child or phase ids).
    pub fn ids<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.get_array(key)
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_str)
    }

    /// `name`, else `path`.
    pub fn display_name(&self) -> Option<&str> {
        self.get_str("name").or_else(|| self.get_str("path"))
    }

    pub fn is_group(&self) -> bool {
        matches!(self.isa.as_str(), "PBXGroup" | "PBXVariantGroup")
    }

    pub fn is_build_phase(&self) -> bool {
        self.isa.ends_with("BuildPhase")
    }
}

/// The `objects` dictionary of a project manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Objects {
    map: BTreeMap<ObjectId, Object>,
}

impl Objects {
    pub fn get(&self, id: &str) -> Option<&Object> {
        self.map.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Object> {
        self.map.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    pub fn insert(&mut self, id: ObjectId, object: Object) -> Option<Object> {
        self.map.insert(id, object)
    }

    /// Delete a single entry. Other objects may still list `id`; see
    /// [`Objects::strip_references`].
    pub fn remove(&mut self, id: &str) -> Option<Object> {
        self.map.remove(id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &Object)> {
        self.map.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&ObjectId, &mut Object)> {
        self.map.iter_mut()
    }

    /// Objects of one record kind, in id order.
    pub fn of_isa<'a>(&'a self, isa: &'a str) -> impl Iterator<Item = (&'a ObjectId, &'a Object)> {
        self.map.iter().filter(move |(_, o)| o.isa == isa)
    }

    /// Remove `id` from every array in the table. Returns how many entries went.
    pub fn strip_references(&mut self, id: &str) -> usize {
        self.map
            .values_mut()
            .flat_map(|o| o.fields.values_mut())
            .map(|v| v.strip_string(id))
            .sum()
    }

    /// A fresh 24-hex-digit identifier not yet present in the table.
    pub fn generate_id(&self) -> ObjectId {
        loop {
            let raw = Uuid::new_v4().simple().to_string().to_uppercase();
            let candidate = &raw[..24];
            if !self.contains(candidate) {
                debug!(id = candidate, "generated object id");
                return ObjectId::new(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Objects {
        let mut objects = Objects::default();
        objects.insert(
            ObjectId::from("G1"),
            Object::new("PBXGroup").with(
                "children",
                vec![Value::from("F1"), Value::from("F2")],
            ),
        );
        objects.insert(
            ObjectId::from("F1"),
            Object::new("PBXFileReference").with("path", "A.swift"),
        );
        objects.insert(
            ObjectId::from("F2"),
            Object::new("PBXFileReference")
                .with("path", "Sources/B.swift")
                .with("name", "B.swift"),
        );
        objects
    }

    #[test]
    fn of_isa_filters_by_kind() {
        let objects = table();
        let ids: Vec<&str> = objects
            .of_isa("PBXFileReference")
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(ids, vec!["F1", "F2"]);
    }

    #[test]
    fn display_name_prefers_name() {
        let objects = table();
        assert_eq!(objects.get("F1").unwrap().display_name(), Some("A.swift"));
        assert_eq!(objects.get("F2").unwrap().display_name(), Some("B.swift"));
    }

    #[test]
    fn strip_references_clears_array_membership() {
        let mut objects = table();
        assert_eq!(objects.strip_references("F1"), 1);
        let children: Vec<&str> = objects.get("G1").unwrap().ids("children").collect();
        assert_eq!(children, vec!["F2"]);
        assert_eq!(objects.strip_references("F1"), 0);
    }

    #[test]
    fn generated_ids_are_24_hex_digits() {
        let objects = table();
        let id = objects.generate_id();
        assert_eq!(id.as_str().len(), 24);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!objects.contains(id.as_str()));
    }

    #[test]
    fn push_to_array_creates_missing_key() {
        let mut group = Object::new("PBXGroup");
        group.push_to_array("children", "F9");
        assert_eq!(group.ids("children").collect::<Vec<_>>(), vec!["F9"]);
    }

    #[test]
    fn from_dict_requires_isa() {
        let err = Object::from_dict("X", Dict::new()).unwrap_err();
        assert!(err.to_string().contains("isa"));
    }
}
