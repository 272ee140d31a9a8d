//! Statically tagged class references

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::class::{ClassDescriptor, ClassId};
use crate::object::TypedObject;
use crate::reflect::{Inherits, Reflected};
use crate::registry::TypeRegistry;

/// A nullable reference to a class that is `T` or one of its subclasses.
///
/// The tag `T` is checked at compile time: a `TypedClassRef<U>` converts
/// into a `TypedClassRef<T>` only when `U: Inherits<T, _>`. The stored
/// handle itself is checked at runtime, on read rather than on write: any
/// handle can be stored, but [`resolve`](Self::resolve) yields it only if
/// the registry confirms it is a subclass of `T`.
///
/// # Example
///
/// ```
/// use classref::{ClassRegistry, HasParent, Reflected, TypedClassRef};
///
/// struct Actor;
/// impl Reflected for Actor {
///     const CLASS_NAME: &'static str = "Actor";
/// }
///
/// struct Pawn;
/// impl Reflected for Pawn {
///     const CLASS_NAME: &'static str = "Pawn";
///     const PARENT_NAME: Option<&'static str> = Some("Actor");
/// }
/// impl HasParent for Pawn {
///     type Parent = Actor;
/// }
///
/// let registry = ClassRegistry::new();
/// let actor = registry.register::<Actor>().unwrap();
/// let pawn = registry.register::<Pawn>().unwrap();
///
/// let pawn_class = TypedClassRef::<Pawn>::from(pawn);
/// let actor_class: TypedClassRef<Actor> = pawn_class.upcast();
/// assert_eq!(actor_class.resolve(&registry), Some(pawn));
///
/// // Stored unchecked, rejected on read
/// let wrong = TypedClassRef::<Pawn>::from(actor);
/// assert_eq!(wrong.resolve(&registry), None);
/// ```
pub struct TypedClassRef<T> {
    class: Option<ClassId>,
    _base: PhantomData<fn() -> T>,
}

impl<T> TypedClassRef<T> {
    /// A null reference.
    pub const fn new() -> Self {
        Self {
            class: None,
            _base: PhantomData,
        }
    }

    /// Wrap a raw handle without checking it.
    ///
    /// The type is checked on get, not on set.
    pub const fn from_raw(class: Option<ClassId>) -> Self {
        Self {
            class,
            _base: PhantomData,
        }
    }

    /// Replace the stored handle without checking it.
    ///
    /// The type is checked on get, not on set.
    pub fn set(&mut self, class: Option<ClassId>) {
        self.class = class;
    }

    /// Reset to null.
    pub fn clear(&mut self) {
        self.class = None;
    }

    /// Check if nothing is stored. Does not consult any registry.
    pub fn is_null(&self) -> bool {
        self.class.is_none()
    }

    /// The stored handle, unvalidated.
    ///
    /// Development-only diagnostics; clients must go through
    /// [`resolve`](Self::resolve) for type-safe access.
    #[cfg(any(debug_assertions, feature = "diagnostics"))]
    pub fn debug_access_raw_class(&self) -> Option<ClassId> {
        self.class
    }
}

impl<T: Reflected> TypedClassRef<T> {
    /// Copy the handle out of a reference tagged with `T` or a subclass.
    ///
    /// A base-class reference does not convert into a subclass one:
    ///
    /// ```compile_fail
    /// # use classref::{HasParent, Reflected, TypedClassRef};
    /// # struct Actor;
    /// # impl Reflected for Actor {
    /// #     const CLASS_NAME: &'static str = "Actor";
    /// # }
    /// # struct Pawn;
    /// # impl Reflected for Pawn {
    /// #     const CLASS_NAME: &'static str = "Pawn";
    /// #     const PARENT_NAME: Option<&'static str> = Some("Actor");
    /// # }
    /// # impl HasParent for Pawn {
    /// #     type Parent = Actor;
    /// # }
    /// let actor = TypedClassRef::<Actor>::new();
    /// let pawn = TypedClassRef::<Pawn>::from_compatible(&actor);
    /// ```
    pub fn from_compatible<U, I>(other: &TypedClassRef<U>) -> Self
    where
        U: Inherits<T, I>,
    {
        Self::from_raw(other.class)
    }

    /// Replace the stored handle with that of a compatible reference.
    ///
    /// Only references tagged with `T` or a subclass are accepted:
    ///
    /// ```compile_fail
    /// # use classref::{HasParent, Reflected, TypedClassRef};
    /// # struct Actor;
    /// # impl Reflected for Actor {
    /// #     const CLASS_NAME: &'static str = "Actor";
    /// # }
    /// # struct Pawn;
    /// # impl Reflected for Pawn {
    /// #     const CLASS_NAME: &'static str = "Pawn";
    /// #     const PARENT_NAME: Option<&'static str> = Some("Actor");
    /// # }
    /// # impl HasParent for Pawn {
    /// #     type Parent = Actor;
    /// # }
    /// let mut pawn = TypedClassRef::<Pawn>::new();
    /// pawn.assign(&TypedClassRef::<Actor>::new());
    /// ```
    pub fn assign<U, I>(&mut self, other: &TypedClassRef<U>)
    where
        U: Inherits<T, I>,
    {
        self.class = other.class;
    }

    /// Retag as an ancestor class. The handle is copied unchanged.
    ///
    /// Retagging as a subclass does not compile:
    ///
    /// ```compile_fail
    /// # use classref::{HasParent, Reflected, TypedClassRef};
    /// # struct Actor;
    /// # impl Reflected for Actor {
    /// #     const CLASS_NAME: &'static str = "Actor";
    /// # }
    /// # struct Pawn;
    /// # impl Reflected for Pawn {
    /// #     const CLASS_NAME: &'static str = "Pawn";
    /// #     const PARENT_NAME: Option<&'static str> = Some("Actor");
    /// # }
    /// # impl HasParent for Pawn {
    /// #     type Parent = Actor;
    /// # }
    /// let pawn: TypedClassRef<Pawn> = TypedClassRef::<Actor>::new().upcast();
    /// ```
    pub fn upcast<B, I>(self) -> TypedClassRef<B>
    where
        B: Reflected,
        T: Inherits<B, I>,
    {
        TypedClassRef::from_compatible(&self)
    }

    /// Resolve to the stored handle if it is `T` or a subclass of `T`.
    ///
    /// Yields `None` for a null reference, when `T` is not registered, and
    /// when the stored class is not a subclass of `T`.
    pub fn resolve<R>(&self, registry: &R) -> Option<ClassId>
    where
        R: TypeRegistry + ?Sized,
    {
        let class = self.class?;
        let Some(base) = registry.class_named(T::CLASS_NAME) else {
            log::debug!("{} is not registered; {} rejected", T::CLASS_NAME, class);
            return None;
        };
        if !registry.is_child_of(class, base) {
            log::debug!("{} is not a subclass of {}; rejected", class, T::CLASS_NAME);
            return None;
        }
        Some(class)
    }

    /// Same as [`resolve`](Self::resolve).
    pub fn get<R>(&self, registry: &R) -> Option<ClassId>
    where
        R: TypeRegistry + ?Sized,
    {
        self.resolve(registry)
    }

    /// Consume the reference, yielding the checked raw handle.
    pub fn into_class<R>(self, registry: &R) -> Option<ClassId>
    where
        R: TypeRegistry + ?Sized,
    {
        self.resolve(registry)
    }

    /// Descriptor of the resolved class.
    pub fn descriptor<R>(&self, registry: &R) -> Option<Arc<ClassDescriptor>>
    where
        R: TypeRegistry + ?Sized,
    {
        self.resolve(registry)
            .and_then(|class| registry.descriptor(class))
    }

    /// Check if the reference resolves to a class.
    pub fn is_valid<R>(&self, registry: &R) -> bool
    where
        R: TypeRegistry + ?Sized,
    {
        self.resolve(registry).is_some()
    }

    /// The canonical default instance of the referenced class.
    ///
    /// Returns `None` for a null or incompatible reference without asking
    /// the registry for a default instance.
    ///
    /// # Panics
    ///
    /// If the registry has no default instance for a valid class, or hands
    /// back one that is not an instance of `T`. Either means the registry's
    /// own bookkeeping is broken.
    pub fn default_object<R>(&self, registry: &R) -> Option<TypedObject<T>>
    where
        R: TypeRegistry + ?Sized,
    {
        let class = self.resolve(registry)?;
        let object = registry.default_object(class);
        let base = registry.class_named(T::CLASS_NAME);
        let consistent = match (&object, base) {
            (Some(object), Some(base)) => registry.is_a(object.as_ref(), base),
            _ => false,
        };
        assert!(
            consistent,
            "default object of {} is not an instance of {}: {:?}",
            class,
            T::CLASS_NAME,
            object
        );
        object.map(TypedObject::new_unchecked)
    }
}

impl<T> Default for TypedClassRef<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedClassRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedClassRef<T> {}

impl<T> PartialEq for TypedClassRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class
    }
}

impl<T> Eq for TypedClassRef<T> {}

impl<T> Hash for TypedClassRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class.hash(state);
    }
}

impl<T> fmt::Debug for TypedClassRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = std::any::type_name::<T>();
        let tag = tag.rsplit("::").next().unwrap_or(tag);
        match self.class {
            Some(class) => write!(f, "TypedClassRef<{}>({})", tag, class),
            None => write!(f, "TypedClassRef<{}>(null)", tag),
        }
    }
}

impl<T> From<ClassId> for TypedClassRef<T> {
    fn from(class: ClassId) -> Self {
        Self::from_raw(Some(class))
    }
}

impl<T> From<Option<ClassId>> for TypedClassRef<T> {
    fn from(class: Option<ClassId>) -> Self {
        Self::from_raw(class)
    }
}
