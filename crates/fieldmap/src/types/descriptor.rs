// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field and type descriptors produced by discovery.
//!
//! A `TypeDescriptor` is the flattened, breadth-first list of every mapped
//! field reachable from a record type, including fields promoted from
//! embedded records. Descriptors are immutable once built.

use crate::reflect::{FieldDef, Reflect, TypeInfo};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// One mapped field: where it lives and what it is called.
#[derive(Clone)]
pub struct FieldDescriptor {
    /// Declared-field positions from the root record down to this field.
    pub location: Vec<usize>,
    /// Dot-joined logical name; the public lookup key.
    pub path: String,
    /// Logical name of this field alone, options stripped.
    pub name: String,
    /// Tag value after the policy's tag transform (empty when untagged).
    pub tag: String,
    /// Options parsed from the raw name (`"omitempty"` -> `""`).
    pub options: HashMap<String, String>,
    /// True for the marker entry of an anonymously composed record.
    pub embedded: bool,
    /// Declared field metadata.
    pub field: FieldDef,
    /// Zero-value template of the declared type. Never mutated.
    pub zero: Arc<dyn Reflect>,
}

impl FieldDescriptor {
    /// Declared type of the field.
    pub fn type_info(&self) -> TypeInfo {
        self.field.type_info()
    }

    /// True when the option `key` was given in the field's name.
    pub fn has_option(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    /// Value of option `key` (`Some("")` for a bare option).
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("location", &self.location)
            .field("path", &self.path)
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("options", &self.options)
            .field("embedded", &self.embedded)
            .field("field", &self.field.name)
            .field("type", &self.type_info().name())
            .finish()
    }
}

/// Ordered field descriptors of one record type, in discovery order.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    type_info: TypeInfo,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn new(type_info: TypeInfo, fields: Vec<FieldDescriptor>) -> Self {
        Self { type_info, fields }
    }

    /// Record type this descriptor was discovered from.
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First field whose path equals `path`.
    ///
    /// Discovery order is breadth-first, so a shallow field shadows a
    /// same-named one promoted from deeper embedding.
    pub fn get_by_path(&self, path: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|fi| fi.path == path)
    }

    /// Field at exactly `location` (a prefix does not match).
    pub fn get_by_location(&self, location: &[usize]) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|fi| fi.location == location)
    }

    /// Path -> descriptor map of the addressable fields.
    ///
    /// Embedded markers and unnamed fields are left out. When two fields share
    /// a path, the later one in discovery order wins; use
    /// [`TypeDescriptor::get_by_path`] for shallow-first shadowing.
    pub fn field_map(&self) -> HashMap<&str, &FieldDescriptor> {
        let mut map = HashMap::with_capacity(self.fields.len());
        for fi in &self.fields {
            if !fi.name.is_empty() && !fi.embedded {
                map.insert(fi.path.as_str(), fi);
            }
        }
        map
    }
}

impl<'a> IntoIterator for &'a TypeDescriptor {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
