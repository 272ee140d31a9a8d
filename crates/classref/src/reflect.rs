//! Compile-time class tags and inheritance
//!
//! A Rust type becomes a class tag by implementing [`Reflected`]. Non-root
//! classes also implement [`HasParent`], which gives the compiler enough to
//! derive [`Inherits`] along the whole parent chain:
//!
//! ```
//! use classref::{HasParent, Inherits, Reflected};
//!
//! struct Object;
//! impl Reflected for Object {
//!     const CLASS_NAME: &'static str = "Object";
//! }
//!
//! struct Actor;
//! impl Reflected for Actor {
//!     const CLASS_NAME: &'static str = "Actor";
//!     const PARENT_NAME: Option<&'static str> = Some(Object::CLASS_NAME);
//! }
//! impl HasParent for Actor {
//!     type Parent = Object;
//! }
//!
//! fn requires_object<T: Inherits<Object, I>, I>() {}
//! requires_object::<Actor, _>();
//! requires_object::<Object, _>();
//! ```

use std::marker::PhantomData;

/// A Rust type tagged with a runtime class name.
///
/// Usually implemented with `#[derive(Reflected)]`.
pub trait Reflected: 'static {
    /// Name the class is registered under.
    const CLASS_NAME: &'static str;

    /// Name of the direct parent class, `None` for roots.
    const PARENT_NAME: Option<&'static str> = None;
}

/// Links a class tag to its direct parent.
///
/// Root classes do not implement this.
pub trait HasParent: Reflected {
    /// The direct parent class.
    type Parent: Reflected;
}

/// Index: `Base` is `Self`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Here;

/// Index: `Base` is reached through `Self`'s parent after `I` more steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct There<I>(PhantomData<I>);

/// `Self` is `Base` or one of its descendants.
///
/// The index parameter keeps the reflexive and inherited impls disjoint and
/// is always inferred, so generic code takes it as a free type parameter:
/// `fn f<U: Inherits<Base, I>, I>()`.
pub trait Inherits<Base: Reflected, I = Here>: Reflected {}

impl<T: Reflected> Inherits<T, Here> for T {}

impl<T, B, I> Inherits<B, There<I>> for T
where
    T: HasParent,
    B: Reflected,
    T::Parent: Inherits<B, I>,
{
}
