//! Detecting `TypedClassRef` instantiations
//!
//! Generic code can bound on [`IsTypedClassRef`] to accept only class
//! references and recover their tag through `Base`. For a yes/no answer on
//! an arbitrary concrete type, use [`is_typed_class_ref!`](crate::is_typed_class_ref).

use std::marker::PhantomData;

use crate::class_ref::TypedClassRef;

mod sealed {
    pub trait Sealed {}

    impl<T> Sealed for super::TypedClassRef<T> {}
}

/// Implemented by every `TypedClassRef<T>` and nothing else.
pub trait IsTypedClassRef: sealed::Sealed {
    /// The compile-time base class tag.
    type Base;
}

impl<T> IsTypedClassRef for TypedClassRef<T> {
    type Base = T;
}

/// Answer "is `$ty` a `TypedClassRef<_>`?" for any concrete type.
///
/// Dispatch happens during method resolution, so the result is fixed at
/// compile time. Inside generic code the type parameter is not known to be
/// a class reference and the macro answers `false`; bound on
/// [`IsTypedClassRef`] there instead.
///
/// ```
/// use classref::{is_typed_class_ref, ClassId, TypedClassRef};
///
/// struct Actor;
///
/// assert!(is_typed_class_ref!(TypedClassRef<Actor>));
/// assert!(!is_typed_class_ref!(ClassId));
/// assert!(!is_typed_class_ref!(Option<TypedClassRef<Actor>>));
/// ```
#[macro_export]
macro_rules! is_typed_class_ref {
    ($ty:ty) => {{
        #[allow(unused_imports)]
        use $crate::probe::{ClassRefProbe as _, FallbackProbe as _};
        (&&$crate::probe::Probe::<$ty>::new()).is_typed_class_ref()
    }};
}

#[doc(hidden)]
pub struct Probe<X: ?Sized>(PhantomData<X>);

impl<X: ?Sized> Probe<X> {
    #[doc(hidden)]
    pub const fn new() -> Self {
        Probe(PhantomData)
    }
}

#[doc(hidden)]
pub trait ClassRefProbe {
    fn is_typed_class_ref(&self) -> bool {
        true
    }
}

impl<X: IsTypedClassRef> ClassRefProbe for &Probe<X> {}

#[doc(hidden)]
pub trait FallbackProbe {
    fn is_typed_class_ref(&self) -> bool {
        false
    }
}

impl<X: ?Sized> FallbackProbe for Probe<X> {}
