//! # classref
//!
//! Statically tagged, runtime-checked references to classes.
//!
//! A [`TypedClassRef<T>`] stores a handle to a runtime class and is tagged at
//! compile time with a base class `T`. Conversions between references are
//! only allowed from subclass to base ([`Inherits`]), and every read checks
//! the stored handle against `T` in a [`TypeRegistry`], yielding `None` for
//! anything that does not fit.
//!
//! ## Architecture
//!
//! - **Class tags**: [`Reflected`] / [`HasParent`], usually derived
//! - **Registry**: the [`TypeRegistry`] seam and the bundled [`ClassRegistry`]
//! - **References**: [`TypedClassRef`] and typed default instances ([`TypedObject`])
//! - **Detection**: [`IsTypedClassRef`] and [`is_typed_class_ref!`]
//!
//! The registry is always passed in explicitly; there is no global state.
//!
//! ## Features
//!
//! - `derive` (default): re-exports `#[derive(Reflected)]`
//! - `diagnostics`: keeps [`TypedClassRef::debug_access_raw_class`] in
//!   release builds

#![warn(missing_docs)]
#![warn(clippy::all)]

// Derive output names `::classref`; this makes it resolve in the crate's own tests
extern crate self as classref;

pub mod class;
pub mod class_ref;
pub mod config;
pub mod error;
pub mod object;
pub mod probe;
pub mod reflect;
pub mod registry;

// Re-export main types
pub use class::{ClassDescriptor, ClassId};
pub use class_ref::TypedClassRef;
pub use config::RegistryConfig;
pub use error::{RegistryError, Result};
pub use object::{Object, ObjectRef, TypedObject};
pub use probe::IsTypedClassRef;
pub use reflect::{HasParent, Here, Inherits, Reflected, There};
pub use registry::{ClassRegistry, DefaultFactory, TypeRegistry};

#[cfg(feature = "derive")]
pub use classref_derive::Reflected;

/// classref version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
