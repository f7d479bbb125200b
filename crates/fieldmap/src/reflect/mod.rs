// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Static record metadata and type-erased field access.
//!
//! Record types describe themselves once through [`Typed::type_info`]: a
//! [`TypeInfo`] carrying the declared fields in declaration order, each
//! described by a [`FieldDef`]. Live values are navigated through the object
//! safe [`Reflect`] trait, which only needs positional field access and
//! optional-reference handling.
//!
//! Implementations are normally generated with `#[derive(Reflect)]`:
//!
//! ```rust
//! use fieldmap::{Kind, Reflect, Typed};
//!
//! #[derive(Default, Reflect)]
//! pub struct Point {
//!     #[reflect(tag(db = "x"))]
//!     pub x: i32,
//!     #[reflect(tag(db = "y,omitempty"))]
//!     pub y: i32,
//! }
//!
//! let info = Point::type_info();
//! assert_eq!(info.kind(), Kind::Record);
//! assert_eq!(info.fields()[1].tag("db"), Some("y,omitempty"));
//! ```

mod impls;

use std::any::{Any, TypeId};
use std::fmt;

/// Structural kind of a reflected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Char,
    Int,
    Uint,
    Float,
    String,
    /// Growable or fixed list of elements.
    Sequence,
    /// Unordered or ordered key-value container.
    Map,
    /// Optional reference (`Option<T>`): may hold no value.
    Optional,
    /// Composite record with declared fields.
    Record,
    /// Anything the mapper cannot look into.
    Opaque,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Char => "char",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Sequence => "sequence",
            Kind::Map => "map",
            Kind::Optional => "optional",
            Kind::Record => "record",
            Kind::Opaque => "opaque",
        };
        f.write_str(name)
    }
}

/// Compile-time description of one declared record field.
///
/// `tags` holds the raw metadata attached to the field as `(key, value)`
/// pairs, e.g. `("db", "addr,omitempty")`. A key that is present with an
/// empty value still counts as present.
#[derive(Clone, Copy)]
pub struct FieldDef {
    /// Declared field name.
    pub name: &'static str,
    /// Raw metadata tags.
    pub tags: &'static [(&'static str, &'static str)],
    /// Anonymous composition: the field's own fields are promoted.
    pub embedded: bool,
    /// Externally visible field. Hidden fields keep their position but are
    /// never mapped.
    pub exported: bool,
    ty: fn() -> TypeInfo,
}

impl FieldDef {
    /// Exported, untagged, non-embedded field of the given type.
    pub const fn new(name: &'static str, ty: fn() -> TypeInfo) -> Self {
        Self {
            name,
            tags: &[],
            embedded: false,
            exported: true,
            ty,
        }
    }

    /// Attach metadata tags.
    pub const fn with_tags(mut self, tags: &'static [(&'static str, &'static str)]) -> Self {
        self.tags = tags;
        self
    }

    /// Mark as anonymously composed.
    pub const fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Mark as not externally visible.
    pub const fn hidden(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Raw tag value for `key`, if the key is present.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }

    /// Declared type of the field.
    pub fn type_info(&self) -> TypeInfo {
        (self.ty)()
    }
}

impl fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("embedded", &self.embedded)
            .field("exported", &self.exported)
            .field("type", &self.type_info().name())
            .finish()
    }
}

/// Runtime handle on a type's static metadata.
///
/// Cheap to copy; identity is the underlying [`TypeId`].
#[derive(Clone, Copy)]
pub struct TypeInfo {
    name: &'static str,
    type_id: TypeId,
    kind: Kind,
    fields: &'static [FieldDef],
    elem: Option<fn() -> TypeInfo>,
    zero: fn() -> Box<dyn Reflect>,
}

fn zero_of<T: Typed>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

impl TypeInfo {
    /// Leaf type (no fields, no element).
    pub fn leaf<T: Typed>(kind: Kind) -> Self {
        Self {
            name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            kind,
            fields: &[],
            elem: None,
            zero: zero_of::<T>,
        }
    }

    /// Record type with its declared fields, in declaration order.
    pub fn record<T: Typed>(name: &'static str, fields: &'static [FieldDef]) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
            kind: Kind::Record,
            fields,
            elem: None,
            zero: zero_of::<T>,
        }
    }

    /// Container type (`Optional`, `Sequence` or `Map`) over element `E`.
    pub fn container<T: Typed, E: Typed>(kind: Kind) -> Self {
        Self {
            name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            kind,
            fields: &[],
            elem: Some(E::type_info),
            zero: zero_of::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Declared fields (empty unless this is a record).
    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    /// Element type of an optional reference, sequence or map value.
    pub fn elem(&self) -> Option<TypeInfo> {
        self.elem.map(|elem| elem())
    }

    /// Strip one level of optional reference. Any other type is returned
    /// unchanged.
    pub fn deref(self) -> TypeInfo {
        match (self.kind, self.elem) {
            (Kind::Optional, Some(elem)) => elem(),
            _ => self,
        }
    }

    /// Fresh zero value of this type.
    pub fn zero(&self) -> Box<dyn Reflect> {
        (self.zero)()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeInfo {}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("fields", &self.fields.len())
            .finish()
    }
}

/// Strip one level of optional reference from a type.
pub fn deref(ty: TypeInfo) -> TypeInfo {
    ty.deref()
}

/// Type-erased access to a live value.
///
/// Field positions are declaration indices over all fields of a record,
/// hidden ones included, so they agree with [`TypeInfo::fields`].
pub trait Reflect: Any + Send + Sync {
    /// Static metadata of the concrete type.
    fn reflect_type(&self) -> TypeInfo;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The value behind an optional reference, `None` when it holds nothing.
    /// Every other type returns itself.
    fn indirect(&self) -> Option<&dyn Reflect>;

    /// Mutable counterpart of [`Reflect::indirect`]. An empty optional
    /// reference is filled with a zero value first.
    fn indirect_mut(&mut self) -> &mut dyn Reflect;

    /// Record field at `index`.
    fn field(&self, _index: usize) -> Option<&dyn Reflect> {
        None
    }

    /// Mutable record field at `index`.
    fn field_mut(&mut self, _index: usize) -> Option<&mut dyn Reflect> {
        None
    }

    /// True for an optional reference holding no value.
    fn is_nil(&self) -> bool {
        false
    }

    /// Install a zero value into an empty optional reference. No-op for
    /// everything else.
    fn allocate(&mut self) {}
}

impl dyn Reflect {
    pub fn kind(&self) -> Kind {
        self.reflect_type().kind()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_type().name())
    }
}

/// Types with static metadata and a zero value.
pub trait Typed: Reflect + Default {
    fn type_info() -> TypeInfo;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reflect;
    use std::collections::HashMap;

    #[derive(Default, Reflect)]
    pub struct Inner {
        #[reflect(tag(db = "city"))]
        pub city: String,
    }

    #[derive(Default, Reflect)]
    pub struct Outer {
        pub id: u64,
        hidden: bool,
        #[reflect(embed)]
        pub inner: Option<Inner>,
        pub labels: HashMap<String, String>,
    }

    #[test]
    fn test_record_type_info() {
        let info = Outer::type_info();
        assert_eq!(info.kind(), Kind::Record);
        assert_eq!(info.name(), "Outer");
        assert_eq!(info.fields().len(), 4);
        assert!(!info.fields()[1].exported);
        assert!(info.fields()[2].embedded);
        assert_eq!(info.fields()[2].type_info().kind(), Kind::Optional);
        assert_eq!(info.fields()[3].type_info().kind(), Kind::Map);
    }

    #[test]
    fn test_deref_strips_one_optional_level() {
        let opt = <Option<Inner>>::type_info();
        assert_eq!(opt.deref(), Inner::type_info());

        let nested = <Option<Option<Inner>>>::type_info();
        assert_eq!(nested.deref(), opt);

        assert_eq!(deref(Inner::type_info()), Inner::type_info());
    }

    #[test]
    fn test_field_tag_lookup() {
        let city = Inner::type_info().fields()[0];
        assert_eq!(city.tag("db"), Some("city"));
        assert_eq!(city.tag("json"), None);
    }

    #[test]
    fn test_positional_field_access() {
        let mut outer = Outer {
            id: 7,
            ..Outer::default()
        };
        let value: &mut dyn Reflect = &mut outer;

        assert_eq!(value.field(0).and_then(|f| f.downcast_ref::<u64>()), Some(&7));
        assert!(value.field(4).is_none());

        // hidden fields keep their position but are not reachable
        assert!(value.field_mut(1).is_none());
        assert!(value.field_mut(3).is_some());
        assert!(!outer.hidden);
    }

    #[test]
    fn test_optional_indirect() {
        let mut inner: Option<Inner> = None;
        assert!(Reflect::is_nil(&inner));
        assert!(Reflect::indirect(&inner).is_none());

        let target = inner.indirect_mut();
        assert_eq!(target.kind(), Kind::Record);
        assert!(inner.is_some());
    }

    #[test]
    fn test_zero_value() {
        let zero = Outer::type_info().zero();
        let outer = zero.downcast_ref::<Outer>().expect("zero is an Outer");
        assert_eq!(outer.id, 0);
        assert!(outer.inner.is_none());
    }
}
