// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Name-to-field mapper.
//!
//! A [`Mapper`] resolves logical field names (from metadata tags or a name
//! transform) to field locations inside nested and embedded records, and
//! memoizes the resolution per record type.
//!
//! # Example
//!
//! ```rust
//! use fieldmap::{Mapper, Reflect};
//!
//! #[derive(Default, Reflect)]
//! pub struct Address {
//!     #[reflect(tag(db = "city"))]
//!     pub city: String,
//! }
//!
//! #[derive(Default, Reflect)]
//! pub struct Person {
//!     #[reflect(tag(db = "name"))]
//!     pub name: String,
//!     #[reflect(tag(db = "addr,omitempty"))]
//!     pub address: Address,
//! }
//!
//! let mapper = Mapper::new("db");
//! let mut person = Person::default();
//!
//! let city = mapper.field_by_name(&mut person, "addr.city").unwrap();
//! *city.downcast_mut::<String>().unwrap() = "Lyon".to_string();
//! assert_eq!(person.address.city, "Lyon");
//! ```

use crate::access::{field_by_location, field_by_location_read_only};
use crate::error::{Error, Result};
use crate::naming::NamingPolicy;
use crate::reflect::{Kind, Reflect, TypeInfo, Typed};
use crate::types::{discover, LookupStats, TypeCache, TypeDescriptor};
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves logical names to record fields, caching one descriptor per type.
///
/// `Mapper` is `Send + Sync`; share it behind an `Arc` or a `static`.
#[derive(Debug)]
pub struct Mapper {
    cache: TypeCache,
    policy: NamingPolicy,
}

/// Kind of `value` after looking through one optional reference, or
/// `Optional` when that reference is empty.
fn indirect_kind(value: &dyn Reflect) -> Kind {
    value.indirect().map_or(Kind::Optional, |inner| inner.kind())
}

/// Kind a writable `value` will have once indirected; an empty optional
/// reference is filled rather than rejected.
fn target_kind(value: &dyn Reflect) -> Kind {
    value.reflect_type().deref().kind()
}

fn must_be_record(method: &'static str, kind: Kind) -> Result<()> {
    if kind == Kind::Record {
        Ok(())
    } else {
        Err(Error::InvalidUsage { method, kind })
    }
}

impl Mapper {
    /// Mapper obeying the tag key `tag_key`; an empty key disables tags and
    /// leaves every field unnamed.
    pub fn new(tag_key: impl Into<String>) -> Self {
        Self::with_policy(NamingPolicy::new(tag_key))
    }

    /// Mapper obeying `tag_key`, naming untagged fields with `name_func`.
    pub fn with_name_func<F>(tag_key: impl Into<String>, name_func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::with_policy(NamingPolicy::new(tag_key).name_func(name_func))
    }

    /// Mapper with both a name transform and a tag-value transform.
    pub fn with_tag_func<F, G>(tag_key: impl Into<String>, name_func: F, tag_func: G) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
        G: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::with_policy(
            NamingPolicy::new(tag_key)
                .name_func(name_func)
                .tag_func(tag_func),
        )
    }

    pub fn with_policy(policy: NamingPolicy) -> Self {
        Self {
            cache: TypeCache::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &NamingPolicy {
        &self.policy
    }

    /// Descriptor for record type `ty`, discovered on first request.
    ///
    /// Cached under `ty`'s own identity; an optional-reference type is
    /// dereferenced once for discovery.
    pub fn type_map(&self, ty: TypeInfo) -> Result<Arc<TypeDescriptor>> {
        must_be_record("Mapper::type_map", ty.deref().kind())?;
        Ok(self
            .cache
            .get_or_build(ty.type_id(), || discover(ty, &self.policy)))
    }

    /// Descriptor for `T`.
    pub fn type_map_of<T: Typed>(&self) -> Result<Arc<TypeDescriptor>> {
        self.type_map(T::type_info())
    }

    /// Writable field named `name`.
    ///
    /// Empty optional references on the way, `value` itself included, are
    /// allocated. When no field is named `name` the record itself is
    /// returned; use [`Mapper::try_field_by_name`] to tell a miss apart.
    pub fn field_by_name<'a>(
        &self,
        value: &'a mut dyn Reflect,
        name: &str,
    ) -> Result<&'a mut dyn Reflect> {
        must_be_record("Mapper::field_by_name", target_kind(value))?;
        let record = value.indirect_mut();
        let tm = self.type_map(record.reflect_type())?;
        match tm.get_by_path(name) {
            Some(fi) => field_by_location(record, &fi.location),
            None => Ok(record),
        }
    }

    /// Writable field named `name`, `None` on a miss.
    pub fn try_field_by_name<'a>(
        &self,
        value: &'a mut dyn Reflect,
        name: &str,
    ) -> Result<Option<&'a mut dyn Reflect>> {
        must_be_record("Mapper::try_field_by_name", target_kind(value))?;
        let record = value.indirect_mut();
        let tm = self.type_map(record.reflect_type())?;
        match tm.get_by_path(name) {
            Some(fi) => field_by_location(record, &fi.location).map(Some),
            None => Ok(None),
        }
    }

    /// Field named `name` without allocating; `None` on a miss or when an
    /// optional reference on the way is empty.
    pub fn field_by_name_read_only<'a>(
        &self,
        value: &'a dyn Reflect,
        name: &str,
    ) -> Result<Option<&'a dyn Reflect>> {
        let kind = indirect_kind(value);
        must_be_record("Mapper::field_by_name_read_only", kind)?;
        let Some(record) = value.indirect() else {
            return Err(Error::InvalidUsage {
                method: "Mapper::field_by_name_read_only",
                kind,
            });
        };
        let tm = self.type_map(record.reflect_type())?;
        Ok(tm
            .get_by_path(name)
            .and_then(|fi| field_by_location_read_only(record, &fi.location)))
    }

    /// Fields named by `names`, aligned with `names`; `None` for a miss.
    ///
    /// Every found field's path is made reachable first (as
    /// [`Mapper::field_by_name`] would), then shared references are handed
    /// out.
    pub fn fields_by_name<'a, S: AsRef<str>>(
        &self,
        value: &'a mut dyn Reflect,
        names: &[S],
    ) -> Result<Vec<Option<&'a dyn Reflect>>> {
        must_be_record("Mapper::fields_by_name", target_kind(value))?;
        let record = value.indirect_mut();
        let tm = self.type_map(record.reflect_type())?;

        let locations: Vec<Option<&[usize]>> = names
            .iter()
            .map(|name| tm.get_by_path(name.as_ref()).map(|fi| fi.location.as_slice()))
            .collect();
        for location in locations.iter().flatten() {
            field_by_location(&mut *record, location)?;
        }

        let record: &'a dyn Reflect = record;
        Ok(locations
            .into_iter()
            .map(|location| location.and_then(|loc| field_by_location_read_only(record, loc)))
            .collect())
    }

    /// Hands each field named by `names` to `visit` as a writable value,
    /// with the index of its name; misses are skipped.
    ///
    /// Fields are visited one at a time in `names` order, so `visit` can
    /// write several fields in one call. Returns the number of fields
    /// visited.
    pub fn fields_by_name_mut<S, F>(
        &self,
        value: &mut dyn Reflect,
        names: &[S],
        mut visit: F,
    ) -> Result<usize>
    where
        S: AsRef<str>,
        F: FnMut(usize, &mut dyn Reflect),
    {
        must_be_record("Mapper::fields_by_name_mut", target_kind(value))?;
        let record = value.indirect_mut();
        let tm = self.type_map(record.reflect_type())?;

        let mut visited = 0;
        for (i, name) in names.iter().enumerate() {
            if let Some(fi) = tm.get_by_path(name.as_ref()) {
                visit(i, field_by_location(&mut *record, &fi.location)?);
                visited += 1;
            }
        }
        Ok(visited)
    }

    /// Location paths for `names` in record type `ty`, aligned with
    /// `names`; an empty path for a miss.
    pub fn traversals_by_name<S: AsRef<str>>(
        &self,
        ty: TypeInfo,
        names: &[S],
    ) -> Result<Vec<Vec<usize>>> {
        let ty = ty.deref();
        must_be_record("Mapper::traversals_by_name", ty.kind())?;
        let tm = self.type_map(ty)?;
        Ok(names
            .iter()
            .map(|name| {
                tm.get_by_path(name.as_ref())
                    .map(|fi| fi.location.clone())
                    .unwrap_or_default()
            })
            .collect())
    }

    /// Every addressable field of `value`, keyed by path.
    ///
    /// Same shadowing rule as [`TypeDescriptor::field_map`].
    pub fn field_map<'a>(
        &self,
        value: &'a mut dyn Reflect,
    ) -> Result<HashMap<String, &'a dyn Reflect>> {
        must_be_record("Mapper::field_map", target_kind(value))?;
        let record = value.indirect_mut();
        let tm = self.type_map(record.reflect_type())?;
        let fields = tm.field_map();

        for fi in fields.values() {
            field_by_location(&mut *record, &fi.location)?;
        }

        let record: &'a dyn Reflect = record;
        Ok(fields
            .into_iter()
            .filter_map(|(path, fi)| {
                field_by_location_read_only(record, &fi.location).map(|v| (path.to_string(), v))
            })
            .collect())
    }

    /// Cache statistics; `misses` is the number of discovery runs.
    pub fn stats(&self) -> LookupStats {
        self.cache.stats()
    }

    /// Number of record types discovered so far.
    pub fn cached_types(&self) -> usize {
        self.cache.len()
    }
}
