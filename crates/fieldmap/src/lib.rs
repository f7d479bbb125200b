// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # fieldmap - name-to-field resolution for nested records
//!
//! Maps logical field names, taken from metadata tags or derived from
//! declared names, to locations inside nested and embedded record types, and
//! navigates live values to those locations. The expensive part (walking a
//! type's field tree) runs once per type and is memoized by a [`Mapper`].
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldmap::{Mapper, Reflect, Result};
//!
//! #[derive(Default, Reflect)]
//! pub struct Audit {
//!     #[reflect(tag(db = "created_by"))]
//!     pub created_by: String,
//! }
//!
//! #[derive(Default, Reflect)]
//! pub struct Order {
//!     #[reflect(tag(db = "id"))]
//!     pub id: u64,
//!     #[reflect(embed)]
//!     pub audit: Audit,
//!     #[reflect(tag(db = "note"))]
//!     pub note: Option<String>,
//! }
//!
//! fn main() -> Result<()> {
//!     let mapper = Mapper::new("db");
//!     let mut order = Order::default();
//!
//!     // Embedded fields are promoted; empty optionals are allocated.
//!     let who = mapper.field_by_name(&mut order, "created_by")?;
//!     if let Some(who) = who.downcast_mut::<String>() {
//!         *who = "ops".into();
//!     }
//!     mapper.field_by_name(&mut order, "note")?;
//!
//!     assert_eq!(order.audit.created_by, "ops");
//!     assert_eq!(order.note.as_deref(), Some(""));
//!     Ok(())
//! }
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Mapper`] | Name resolution with a per-type descriptor cache |
//! | [`TypeDescriptor`] | Flattened, ordered field layout of one record type |
//! | [`FieldDescriptor`] | One reachable field: location, path, name, options |
//! | [`NamingPolicy`] | Tag key plus name and tag-value transforms |
//! | [`MapperConfig`] | Declarative policy, optionally loaded from YAML |
//!
//! ## Modules Overview
//!
//! - [`reflect`] - static record metadata and the `Reflect` trait
//! - [`types`] - descriptors, discovery and the type cache
//! - [`access`] - location-path navigation of live values
//! - [`naming`] - tag parsing and name transforms

extern crate self as fieldmap;

pub mod access;
pub mod config;
pub mod error;
pub mod mapper;
pub mod naming;
pub mod reflect;
pub mod types;

pub use access::{field_by_location, field_by_location_read_only};
pub use config::MapperConfig;
pub use error::{Error, Result};
pub use mapper::Mapper;
pub use naming::{lower_case, NameCase, NamingPolicy};
pub use reflect::{deref, FieldDef, Kind, Reflect, TypeInfo, Typed};
pub use types::{FieldDescriptor, LookupStats, TypeCache, TypeDescriptor};

/// `#[derive(Reflect)]`: implements [`Reflect`] and [`Typed`] for a record.
pub use fieldmap_codegen::Reflect;
