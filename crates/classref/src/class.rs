//! Runtime class handles and descriptors

use std::fmt;

/// Opaque handle to a class registered in a [`TypeRegistry`](crate::TypeRegistry).
///
/// Handles are only meaningful for the registry that issued them. They are
/// plain values: copying one copies the reference, not the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    /// Build a handle from a raw index.
    ///
    /// Registries use this to mint handles; client code normally receives
    /// them from a registry instead.
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// The raw index backing this handle.
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class#{}", self.0)
    }
}

/// Reflective description of a registered class.
///
/// Descriptors are immutable once registered and shared behind `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    id: ClassId,
    name: String,
    parent: Option<ClassId>,
    depth: usize,
    has_default: bool,
}

impl ClassDescriptor {
    /// Create a descriptor. `depth` is 0 for root classes.
    pub fn new(
        id: ClassId,
        name: impl Into<String>,
        parent: Option<ClassId>,
        depth: usize,
        has_default: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
            depth,
            has_default,
        }
    }

    /// The class handle.
    pub fn id(&self) -> ClassId {
        self.id
    }

    /// The registered class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct parent, or `None` for a root class.
    pub fn parent(&self) -> Option<ClassId> {
        self.parent
    }

    /// Number of ancestors above this class.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Check if this is a root class.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether a default-instance factory was installed for this class.
    pub fn has_default(&self) -> bool {
        self.has_default
    }
}

impl fmt::Display for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_id_roundtrips_index() {
        let id = ClassId::from_raw(7);
        assert_eq!(id.index(), 7);
        assert_eq!(id.to_string(), "class#7");
    }

    #[test]
    fn test_descriptor_root() {
        let desc = ClassDescriptor::new(ClassId::from_raw(0), "Object", None, 0, true);
        assert!(desc.is_root());
        assert!(desc.has_default());
        assert_eq!(desc.to_string(), "Object (class#0)");
    }

    #[test]
    fn test_descriptor_child() {
        let parent = ClassId::from_raw(0);
        let desc = ClassDescriptor::new(ClassId::from_raw(1), "Actor", Some(parent), 1, false);
        assert!(!desc.is_root());
        assert_eq!(desc.parent(), Some(parent));
        assert_eq!(desc.depth(), 1);
        assert_eq!(desc.name(), "Actor");
    }
}
