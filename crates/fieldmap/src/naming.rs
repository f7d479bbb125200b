// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Naming policy: how declared fields map to logical names.
//!
//! A field's raw name comes from its metadata tag under the policy's tag key
//! when present, otherwise from the name transform applied to the declared
//! field name. The raw name may carry comma-separated options
//! (`"addr,omitempty"`, `"id,type=uuid"`).

use convert_case::{Case, Casing};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Shared `&str -> String` transform.
pub type NameFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Tag key plus optional name and tag-value transforms.
///
/// Fixed at mapper construction and shared read-only by all lookups.
#[derive(Clone, Default)]
pub struct NamingPolicy {
    tag_key: String,
    name_func: Option<NameFn>,
    tag_func: Option<NameFn>,
}

impl NamingPolicy {
    /// Policy obeying the tag key `tag_key`; an empty key disables tags.
    pub fn new(tag_key: impl Into<String>) -> Self {
        Self {
            tag_key: tag_key.into(),
            name_func: None,
            tag_func: None,
        }
    }

    /// Transform applied to declared field names that carry no tag.
    pub fn name_func<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.name_func = Some(Arc::new(f));
        self
    }

    /// Transform applied to the raw tag value. Its result is kept on the
    /// field descriptor as `tag` and decides whether an embedded record
    /// prefixes its children.
    pub fn tag_func<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.tag_func = Some(Arc::new(f));
        self
    }

    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    pub fn has_name_func(&self) -> bool {
        self.name_func.is_some()
    }

    pub fn has_tag_func(&self) -> bool {
        self.tag_func.is_some()
    }

    /// Raw tag for a field, if tags are enabled and the field carries one.
    pub(crate) fn raw_tag(&self, tags: &'static [(&'static str, &'static str)]) -> Option<&'static str> {
        if self.tag_key.is_empty() {
            return None;
        }
        tags.iter()
            .find(|(key, _)| *key == self.tag_key)
            .map(|(_, value)| *value)
    }

    /// Raw name: the tag when present, else the transformed declared name,
    /// else empty.
    pub(crate) fn raw_name(&self, raw_tag: Option<&str>, declared: &str) -> String {
        match (raw_tag, &self.name_func) {
            (Some(tag), _) => tag.to_string(),
            (None, Some(f)) => f(declared),
            (None, None) => String::new(),
        }
    }

    /// Tag value after the tag transform. An absent tag is treated as empty.
    pub(crate) fn mapped_tag(&self, raw_tag: Option<&str>) -> String {
        let tag = raw_tag.unwrap_or("");
        match &self.tag_func {
            Some(f) => f(tag),
            None => tag.to_string(),
        }
    }
}

impl fmt::Debug for NamingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamingPolicy")
            .field("tag_key", &self.tag_key)
            .field("name_func", &self.name_func.is_some())
            .field("tag_func", &self.tag_func.is_some())
            .finish()
    }
}

/// Split `"name,opt,key=value"` into the name and its options.
///
/// A bare option maps to `""`. For `key=value` only the text between the
/// first and second `=` is kept. Later duplicates overwrite earlier ones.
pub fn split_options(raw: &str) -> (String, HashMap<String, String>) {
    let mut parts = raw.split(',');
    let name = parts.next().unwrap_or_default().to_string();

    let mut options = HashMap::new();
    for opt in parts {
        let mut kv = opt.split('=');
        let key = kv.next().unwrap_or_default();
        let value = kv.next().unwrap_or_default();
        options.insert(key.to_string(), value.to_string());
    }
    (name, options)
}

/// Lower-case transform, the usual default for column-style names.
pub fn lower_case(name: &str) -> String {
    name.to_lowercase()
}

/// Case conventions for declared-name transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config-loaders", derive(serde::Deserialize))]
#[cfg_attr(feature = "config-loaders", serde(rename_all = "snake_case"))]
pub enum NameCase {
    /// `UserName` -> `username`
    Lower,
    /// `UserName` -> `USERNAME`
    Upper,
    /// `UserName` -> `user_name`
    Snake,
    /// `UserName` -> `userName`
    Camel,
    /// `user_name` -> `UserName`
    Pascal,
    /// `UserName` -> `user-name`
    Kebab,
}

impl NameCase {
    pub fn apply(self, name: &str) -> String {
        match self {
            NameCase::Lower => name.to_lowercase(),
            NameCase::Upper => name.to_uppercase(),
            NameCase::Snake => name.to_case(Case::Snake),
            NameCase::Camel => name.to_case(Case::Camel),
            NameCase::Pascal => name.to_case(Case::Pascal),
            NameCase::Kebab => name.to_case(Case::Kebab),
        }
    }
}
