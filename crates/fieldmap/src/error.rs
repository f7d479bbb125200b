// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type for mapper and accessor operations.

use crate::reflect::Kind;
use std::fmt;

/// Errors returned by fieldmap operations.
///
/// A name that resolves to nothing is *not* an error: lookups report misses
/// through `Option` or positional placeholders.
///
/// # Example
///
/// ```rust
/// use fieldmap::{Error, Kind, Mapper, Typed};
///
/// let mapper = Mapper::new("db");
/// match mapper.type_map(u32::type_info()) {
///     Err(Error::InvalidUsage { kind: Kind::Uint, .. }) => {}
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug)]
pub enum Error {
    /// Contract violation: an operation that requires a record was handed
    /// something else. This is a programming error in the caller.
    InvalidUsage {
        /// Operation whose contract was violated.
        method: &'static str,
        /// Kind actually encountered.
        kind: Kind,
    },
    /// A location path step does not exist in the value.
    InvalidLocation {
        /// Position that could not be followed.
        index: usize,
        /// Step of the path at which navigation stopped.
        depth: usize,
        /// Type being navigated at that step.
        type_name: &'static str,
    },
    /// Mapper configuration could not be loaded.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidUsage { method, kind } => {
                write!(f, "{} requires a record, got {}", method, kind)
            }
            Error::InvalidLocation {
                index,
                depth,
                type_name,
            } => write!(
                f,
                "No field at position {} (step {}) of {}",
                index, depth, type_name
            ),
            Error::Config(msg) => write!(f, "Invalid mapper configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Convenient alias for results using the crate `Error` type.
pub type Result<T> = core::result::Result<T, Error>;
