// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `Reflect` / `Typed` for std types.

use super::{Kind, Reflect, TypeInfo, Typed};
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

macro_rules! impl_leaf {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect_type(&self) -> TypeInfo {
                    <$ty as Typed>::type_info()
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn as_any_mut(&mut self) -> &mut dyn Any {
                    self
                }

                fn indirect(&self) -> Option<&dyn Reflect> {
                    Some(self)
                }

                fn indirect_mut(&mut self) -> &mut dyn Reflect {
                    self
                }
            }

            impl Typed for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::leaf::<$ty>($kind)
                }
            }
        )+
    };
}

impl_leaf!(Kind::Bool => bool);
impl_leaf!(Kind::Char => char);
impl_leaf!(Kind::Int => i8, i16, i32, i64, i128, isize);
impl_leaf!(Kind::Uint => u8, u16, u32, u64, u128, usize);
impl_leaf!(Kind::Float => f32, f64);
impl_leaf!(Kind::String => String);
impl_leaf!(Kind::Opaque => ());

/// Implements the plumbing shared by all non-optional containers.
macro_rules! impl_container {
    ($kind:expr, $elem:ident, [$($gen:tt)*], $ty:ty) => {
        impl<$($gen)*> Reflect for $ty {
            fn reflect_type(&self) -> TypeInfo {
                <Self as Typed>::type_info()
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }

            fn indirect(&self) -> Option<&dyn Reflect> {
                Some(self)
            }

            fn indirect_mut(&mut self) -> &mut dyn Reflect {
                self
            }
        }

        impl<$($gen)*> Typed for $ty {
            fn type_info() -> TypeInfo {
                TypeInfo::container::<Self, $elem>($kind)
            }
        }
    };
}

impl_container!(Kind::Sequence, T, [T: Typed], Vec<T>);
impl_container!(Kind::Map, V, [K: Typed + Eq + Hash, V: Typed], HashMap<K, V>);
impl_container!(Kind::Map, V, [K: Typed + Ord, V: Typed], BTreeMap<K, V>);

impl<T: Typed> Reflect for Option<T> {
    fn reflect_type(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn indirect(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    fn indirect_mut(&mut self) -> &mut dyn Reflect {
        self.get_or_insert_with(T::default)
    }

    fn is_nil(&self) -> bool {
        self.is_none()
    }

    fn allocate(&mut self) {
        if self.is_none() {
            *self = Some(T::default());
        }
    }
}

impl<T: Typed> Typed for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::container::<Self, T>(Kind::Optional)
    }
}

// Box never holds nothing, so it is transparent: it reports and forwards to
// the boxed value.
impl<T: Typed> Reflect for Box<T> {
    fn reflect_type(&self) -> TypeInfo {
        T::type_info()
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        (**self).as_any_mut()
    }

    fn indirect(&self) -> Option<&dyn Reflect> {
        (**self).indirect()
    }

    fn indirect_mut(&mut self) -> &mut dyn Reflect {
        (**self).indirect_mut()
    }

    fn field(&self, index: usize) -> Option<&dyn Reflect> {
        (**self).field(index)
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        (**self).field_mut(index)
    }

    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }

    fn allocate(&mut self) {
        (**self).allocate();
    }
}

impl<T: Typed> Typed for Box<T> {
    fn type_info() -> TypeInfo {
        T::type_info()
    }
}
