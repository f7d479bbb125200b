// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Breadth-first field discovery.
//!
//! Walks a record type's declared fields and, through a work queue, the
//! fields of every embedded or nested record, producing the flat descriptor
//! list a mapper caches. Record composition is acyclic, so the queue always
//! drains.

use super::descriptor::{FieldDescriptor, TypeDescriptor};
use crate::naming::{split_options, NamingPolicy};
use crate::reflect::{Kind, TypeInfo};
use std::collections::VecDeque;
use std::sync::Arc;

/// A record type waiting to have its fields walked.
struct Pending {
    ty: TypeInfo,
    /// Location of the field that led here (empty for the root).
    location: Vec<usize>,
    /// Path prefix for this record's fields (empty: no prefix).
    parent_path: String,
}

/// Location of a child field: a fresh copy of the parent's plus `position`.
fn extend(location: &[usize], position: usize) -> Vec<usize> {
    let mut child = Vec::with_capacity(location.len() + 1);
    child.extend_from_slice(location);
    child.push(position);
    child
}

/// Build the descriptor for `ty` (one optional-reference level is stripped).
pub(crate) fn discover(ty: TypeInfo, policy: &NamingPolicy) -> TypeDescriptor {
    let root = ty.deref();
    let mut fields = Vec::new();

    let mut queue = VecDeque::new();
    queue.push_back(Pending {
        ty: root,
        location: Vec::new(),
        parent_path: String::new(),
    });

    while let Some(pending) = queue.pop_front() {
        for (position, def) in pending.ty.fields().iter().enumerate() {
            let raw_tag = policy.raw_tag(def.tags);
            let (name, options) = split_options(&policy.raw_name(raw_tag, def.name));
            let tag = policy.mapped_tag(raw_tag);

            let path = if pending.parent_path.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", pending.parent_path, name)
            };

            if name == "-" {
                log::trace!("[fieldmap] {}.{} excluded by name", root.name(), def.name);
                continue;
            }
            if !def.exported {
                continue;
            }

            let location = extend(&pending.location, position);
            let field_ty = def.type_info();

            let embedded = def.embedded;
            if embedded {
                // An untagged embedding is transparent: its fields keep the
                // enclosing prefix.
                let child_path = if tag.is_empty() {
                    pending.parent_path.clone()
                } else {
                    path.clone()
                };
                queue.push_back(Pending {
                    ty: field_ty.deref(),
                    location: location.clone(),
                    parent_path: child_path,
                });
            } else if field_ty.kind() == Kind::Record {
                queue.push_back(Pending {
                    ty: field_ty,
                    location: location.clone(),
                    parent_path: path.clone(),
                });
            }

            fields.push(FieldDescriptor {
                location,
                path,
                name,
                tag,
                options,
                embedded,
                field: *def,
                zero: Arc::from(field_ty.zero()),
            });
        }
    }

    log::debug!(
        "[fieldmap] discovered {} fields for {}",
        fields.len(),
        root.name()
    );
    TypeDescriptor::new(root, fields)
}
