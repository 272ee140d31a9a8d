//! Reflected object instances

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::reflect::Reflected;

/// A reflected runtime object.
///
/// Every `Reflected + Send + Sync` type is an `Object` whose class is the
/// one its Rust type is tagged with.
pub trait Object: Any + Send + Sync {
    /// Name of the class this instance belongs to.
    fn class_name(&self) -> &'static str;

    /// Borrow as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Convert a shared handle into `Any` for downcasting.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Reflected + Send + Sync> Object for T {
    fn class_name(&self) -> &'static str {
        T::CLASS_NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl fmt::Debug for dyn Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} instance>", self.class_name())
    }
}

/// Shared handle to a reflected object.
pub type ObjectRef = Arc<dyn Object>;

/// An object known to be an instance of `T`'s class or one of its subclasses.
///
/// The concrete Rust type may be any descendant of `T`, so access to the
/// data goes through [`downcast_ref`](Self::downcast_ref).
pub struct TypedObject<T> {
    object: ObjectRef,
    _class: PhantomData<fn() -> T>,
}

impl<T: Reflected> TypedObject<T> {
    /// Wrap an object the caller has already checked against `T`'s class.
    pub(crate) fn new_unchecked(object: ObjectRef) -> Self {
        Self {
            object,
            _class: PhantomData,
        }
    }

    /// The untyped object.
    pub fn object(&self) -> &ObjectRef {
        &self.object
    }

    /// Name of the instance's own (most derived) class.
    pub fn class_name(&self) -> &'static str {
        self.object.class_name()
    }

    /// Unwrap into the untyped handle.
    pub fn into_inner(self) -> ObjectRef {
        self.object
    }

    /// Borrow the instance as concrete type `C`, if that is what it is.
    pub fn downcast_ref<C: Reflected>(&self) -> Option<&C> {
        self.object.as_any().downcast_ref::<C>()
    }

    /// Take a shared handle to the instance as concrete type `C`.
    pub fn downcast_arc<C: Reflected + Send + Sync>(&self) -> Option<Arc<C>> {
        Arc::clone(&self.object).into_any().downcast::<C>().ok()
    }

    /// Check if two typed handles point at the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }
}

impl<T> Clone for TypedObject<T> {
    fn clone(&self) -> Self {
        Self {
            object: Arc::clone(&self.object),
            _class: PhantomData,
        }
    }
}

impl<T: Reflected> fmt::Debug for TypedObject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedObject")
            .field("as", &T::CLASS_NAME)
            .field("class", &self.object.class_name())
            .finish()
    }
}
