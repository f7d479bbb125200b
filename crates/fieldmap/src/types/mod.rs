// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors, their discovery, and the cache that memoizes them.
//!
//! Provides `TypeDescriptor` / `FieldDescriptor` for the flattened field
//! layout of a record type, and `TypeCache` for paying discovery once per
//! type.

pub mod cache;
pub mod descriptor;
mod discovery;

pub use cache::{LookupStats, TypeCache};
pub use descriptor::{FieldDescriptor, TypeDescriptor};

pub(crate) use discovery::discover;
