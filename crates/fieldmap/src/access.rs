// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Navigation from a live record to the field at a location path.
//!
//! Each step looks through one optional reference and then takes the field
//! at the next position. [`field_by_location`] fills empty optional
//! references (and therefore uninitialized optional maps) with zero values
//! as it goes, so the target is always writable; [`field_by_location_read_only`]
//! never touches the record.

use crate::error::{Error, Result};
use crate::reflect::Reflect;

/// Field at `location`, allocating empty optional references on the way.
///
/// The returned value is the field itself: an optional-reference field comes
/// back as the (now filled) `Option`.
///
/// # Example
///
/// ```rust
/// use fieldmap::{field_by_location, Reflect};
///
/// #[derive(Default, Reflect)]
/// pub struct Geo {
///     pub lat: f64,
/// }
///
/// #[derive(Default, Reflect)]
/// pub struct Place {
///     pub geo: Option<Geo>,
/// }
///
/// let mut place = Place::default();
/// let lat = field_by_location(&mut place, &[0, 0]).unwrap();
/// *lat.downcast_mut::<f64>().unwrap() = 48.85;
/// assert_eq!(place.geo.map(|g| g.lat), Some(48.85));
/// ```
pub fn field_by_location<'a>(
    value: &'a mut dyn Reflect,
    location: &[usize],
) -> Result<&'a mut dyn Reflect> {
    let mut current = value;
    for (depth, &index) in location.iter().enumerate() {
        let record = current.indirect_mut();
        let type_name = record.reflect_type().name();
        current = match record.field_mut(index) {
            Some(field) => field,
            None => {
                return Err(Error::InvalidLocation {
                    index,
                    depth,
                    type_name,
                })
            }
        };
        if current.is_nil() {
            current.allocate();
        }
    }
    Ok(current)
}

/// Field at `location` without allocating.
///
/// Returns `None` when an intermediate optional reference is empty or a
/// position does not exist.
pub fn field_by_location_read_only<'a>(
    value: &'a dyn Reflect,
    location: &[usize],
) -> Option<&'a dyn Reflect> {
    let mut current = value;
    for &index in location {
        current = current.indirect()?.field(index)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reflect;
    use std::collections::HashMap;

    #[derive(Default, Reflect)]
    pub struct Leaf {
        pub value: i32,
        pub labels: Option<HashMap<String, String>>,
    }

    #[derive(Default, Reflect)]
    pub struct Middle {
        pub leaf: Option<Leaf>,
        pub boxed: Box<Leaf>,
    }

    #[derive(Default, Reflect)]
    pub struct Root {
        pub name: String,
        pub middle: Option<Middle>,
    }

    #[test]
    fn test_allocates_through_empty_optionals() {
        let mut root = Root::default();
        let target = field_by_location(&mut root, &[1, 0, 0]).expect("path exists");
        *target.downcast_mut::<i32>().expect("i32 field") = 42;

        let leaf = root
            .middle
            .as_ref()
            .and_then(|m| m.leaf.as_ref())
            .expect("allocated chain");
        assert_eq!(leaf.value, 42);
    }

    #[test]
    fn test_allocates_target_optional() {
        let mut root = Root::default();
        let target = field_by_location(&mut root, &[1, 0]).expect("path exists");
        assert!(!target.is_nil());
        assert!(root.middle.and_then(|m| m.leaf).is_some());
    }

    #[test]
    fn test_initializes_optional_map() {
        let mut root = Root::default();
        let labels = field_by_location(&mut root, &[1, 0, 1]).expect("path exists");
        let labels = labels
            .downcast_mut::<Option<HashMap<String, String>>>()
            .expect("optional map");
        labels
            .as_mut()
            .expect("initialized")
            .insert("k".to_string(), "v".to_string());

        let stored = root
            .middle
            .and_then(|m| m.leaf)
            .and_then(|l| l.labels)
            .expect("map kept");
        assert_eq!(stored.get("k").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_navigates_through_box() {
        let mut root = Root::default();
        let target = field_by_location(&mut root, &[1, 1, 0]).expect("path exists");
        *target.downcast_mut::<i32>().expect("i32 field") = 7;
        assert_eq!(root.middle.map(|m| m.boxed.value), Some(7));
    }

    #[test]
    fn test_empty_location_returns_value() {
        let mut root = Root {
            name: "r".to_string(),
            ..Root::default()
        };
        let same = field_by_location(&mut root, &[]).expect("empty path");
        assert!(same.is::<Root>());
    }

    #[test]
    fn test_invalid_position_is_an_error() {
        let mut root = Root::default();
        match field_by_location(&mut root, &[1, 9]) {
            Err(Error::InvalidLocation { index, depth, .. }) => {
                assert_eq!(index, 9);
                assert_eq!(depth, 1);
            }
            other => panic!("expected InvalidLocation, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_read_only_does_not_allocate() {
        let root = Root::default();
        assert!(field_by_location_read_only(&root, &[1, 0, 0]).is_none());
        assert!(root.middle.is_none());

        let name = field_by_location_read_only(&root, &[0]).expect("direct field");
        assert_eq!(name.downcast_ref::<String>().map(String::as_str), Some(""));
    }

    #[test]
    fn test_read_only_reaches_populated_fields() {
        let root = Root {
            name: String::new(),
            middle: Some(Middle {
                leaf: Some(Leaf {
                    value: 5,
                    labels: None,
                }),
                boxed: Box::default(),
            }),
        };
        let value = field_by_location_read_only(&root, &[1, 0, 0]).expect("populated");
        assert_eq!(value.downcast_ref::<i32>(), Some(&5));

        // an empty optional at the end of the path is returned as is
        let labels = field_by_location_read_only(&root, &[1, 0, 1]).expect("field exists");
        assert!(labels.is_nil());
    }
}
