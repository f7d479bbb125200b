// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declarative mapper configuration.
//!
//! With the `config-loaders` feature a [`MapperConfig`] can be read from YAML:
//!
//! ```yaml
//! # mapper.yaml
//! tag_key: db
//! name_case: snake
//! ```
//!
//! Missing keys fall back to [`MapperConfig::default`]: no tag key and no
//! name transform.

use crate::mapper::Mapper;
use crate::naming::{NameCase, NamingPolicy};

#[cfg(feature = "config-loaders")]
use crate::error::{Error, Result};
#[cfg(feature = "config-loaders")]
use std::path::Path;

/// Tag key and declared-name case convention for a [`Mapper`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config-loaders", derive(serde::Deserialize))]
#[cfg_attr(feature = "config-loaders", serde(default, deny_unknown_fields))]
pub struct MapperConfig {
    /// Metadata key whose tag values name fields (empty: tags ignored).
    pub tag_key: String,
    /// Transform for declared names of untagged fields.
    pub name_case: Option<NameCase>,
}

impl MapperConfig {
    pub fn new(tag_key: impl Into<String>) -> Self {
        Self {
            tag_key: tag_key.into(),
            name_case: None,
        }
    }

    #[must_use]
    pub fn tag_key(mut self, tag_key: impl Into<String>) -> Self {
        self.tag_key = tag_key.into();
        self
    }

    #[must_use]
    pub fn name_case(mut self, case: NameCase) -> Self {
        self.name_case = Some(case);
        self
    }

    pub fn into_policy(self) -> NamingPolicy {
        let policy = NamingPolicy::new(self.tag_key);
        match self.name_case {
            Some(case) => policy.name_func(move |name| case.apply(name)),
            None => policy,
        }
    }

    /// Fresh mapper (with an empty cache) for this configuration.
    pub fn build(self) -> Mapper {
        log::debug!(
            "[fieldmap] mapper configured: tag_key={:?} name_case={:?}",
            self.tag_key,
            self.name_case
        );
        Mapper::with_policy(self.into_policy())
    }
}

#[cfg(feature = "config-loaders")]
impl MapperConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse YAML: {}", e)))
    }

    /// Read and parse a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }
}
