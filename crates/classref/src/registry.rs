//! The type registry seam
//!
//! Everything a [`TypedClassRef`](crate::TypedClassRef) needs to know about
//! the runtime class hierarchy goes through [`TypeRegistry`]. The registry is
//! passed in explicitly on every query, so any implementation can stand
//! behind it: the bundled [`ClassRegistry`], an engine's own reflection
//! tables, or a test double.

mod class_registry;

pub use class_registry::{ClassRegistry, DefaultFactory};

use std::sync::Arc;

use crate::class::{ClassDescriptor, ClassId};
use crate::object::{Object, ObjectRef};
use crate::reflect::Reflected;

/// Runtime class information consumed by class references.
pub trait TypeRegistry {
    /// Look up a class by its registered name.
    fn class_named(&self, name: &str) -> Option<ClassId>;

    /// Descriptor for a class handle issued by this registry.
    fn descriptor(&self, class: ClassId) -> Option<Arc<ClassDescriptor>>;

    /// Whether `class` is `base` or derives from it.
    ///
    /// Handles this registry does not know are never children of anything.
    fn is_child_of(&self, class: ClassId, base: ClassId) -> bool;

    /// The canonical default instance of `class`, if it has one.
    fn default_object(&self, class: ClassId) -> Option<ObjectRef>;

    /// Class registered for the compile-time tag `T`.
    fn static_class<T: Reflected>(&self) -> Option<ClassId>
    where
        Self: Sized,
    {
        self.class_named(T::CLASS_NAME)
    }

    /// Class of a live object.
    fn class_of(&self, object: &dyn Object) -> Option<ClassId> {
        self.class_named(object.class_name())
    }

    /// Whether `object` is an instance of `base` or one of its subclasses.
    fn is_a(&self, object: &dyn Object, base: ClassId) -> bool {
        self.class_of(object)
            .is_some_and(|class| self.is_child_of(class, base))
    }
}

impl<R: TypeRegistry + ?Sized> TypeRegistry for &R {
    fn class_named(&self, name: &str) -> Option<ClassId> {
        (**self).class_named(name)
    }

    fn descriptor(&self, class: ClassId) -> Option<Arc<ClassDescriptor>> {
        (**self).descriptor(class)
    }

    fn is_child_of(&self, class: ClassId, base: ClassId) -> bool {
        (**self).is_child_of(class, base)
    }

    fn default_object(&self, class: ClassId) -> Option<ObjectRef> {
        (**self).default_object(class)
    }

    fn class_of(&self, object: &dyn Object) -> Option<ClassId> {
        (**self).class_of(object)
    }

    fn is_a(&self, object: &dyn Object, base: ClassId) -> bool {
        (**self).is_a(object, base)
    }
}

impl<R: TypeRegistry + ?Sized> TypeRegistry for Arc<R> {
    fn class_named(&self, name: &str) -> Option<ClassId> {
        (**self).class_named(name)
    }

    fn descriptor(&self, class: ClassId) -> Option<Arc<ClassDescriptor>> {
        (**self).descriptor(class)
    }

    fn is_child_of(&self, class: ClassId, base: ClassId) -> bool {
        (**self).is_child_of(class, base)
    }

    fn default_object(&self, class: ClassId) -> Option<ObjectRef> {
        (**self).default_object(class)
    }

    fn class_of(&self, object: &dyn Object) -> Option<ClassId> {
        (**self).class_of(object)
    }

    fn is_a(&self, object: &dyn Object, base: ClassId) -> bool {
        (**self).is_a(object, base)
    }
}
