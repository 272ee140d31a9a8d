//! In-memory concurrent class registry

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::TypeRegistry;
use crate::class::{ClassDescriptor, ClassId};
use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::object::ObjectRef;
use crate::reflect::Reflected;

/// Builds the default instance of a class.
pub type DefaultFactory = Arc<dyn Fn(ClassId) -> ObjectRef + Send + Sync>;

/// A thread-safe registry of classes, their parents and default instances.
///
/// Classes are registered parent-first and never removed, so every handle
/// the registry issues stays valid for its whole lifetime.
///
/// # Example
///
/// ```
/// use classref::{ClassRegistry, TypeRegistry};
///
/// let registry = ClassRegistry::new();
/// let object = registry.register_class("Object", None, None).unwrap();
/// let actor = registry.register_class("Actor", Some("Object"), None).unwrap();
///
/// assert!(registry.is_child_of(actor, object));
/// assert!(!registry.is_child_of(object, actor));
/// assert_eq!(registry.class_named("Actor"), Some(actor));
/// ```
pub struct ClassRegistry {
    config: RegistryConfig,

    /// Descriptors by handle
    classes: DashMap<ClassId, Arc<ClassDescriptor>>,

    /// Handles by name
    names: DashMap<String, ClassId>,

    /// Default-instance factories, for classes that have one
    factories: DashMap<ClassId, DefaultFactory>,

    /// Cached canonical default instances
    defaults: DashMap<ClassId, ObjectRef>,

    next_id: AtomicU32,
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    /// Create an empty registry with default settings.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with the given settings.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            classes: DashMap::new(),
            names: DashMap::new(),
            factories: DashMap::new(),
            defaults: DashMap::new(),
            next_id: AtomicU32::new(0),
        }
    }

    /// The settings this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ═══════════════════════════════════════════════════════════════════
    // Registration
    // ═══════════════════════════════════════════════════════════════════

    /// Register a class by name.
    ///
    /// The parent, if any, must already be registered. `factory` builds the
    /// class's default instance on demand.
    pub fn register_class(
        &self,
        name: &str,
        parent: Option<&str>,
        factory: Option<DefaultFactory>,
    ) -> Result<ClassId> {
        if name.is_empty() || name.trim() != name {
            return Err(RegistryError::InvalidName(name.to_string()));
        }

        // Resolve the parent before taking the entry lock on `names`
        let (parent_id, depth) = match parent {
            Some(parent_name) => {
                let parent_desc = self
                    .class_named(parent_name)
                    .and_then(|id| self.descriptor(id))
                    .ok_or_else(|| RegistryError::UnknownParent {
                        name: name.to_string(),
                        parent: parent_name.to_string(),
                    })?;
                (Some(parent_desc.id()), parent_desc.depth() + 1)
            }
            None => (None, 0),
        };

        if depth > self.config.max_depth {
            return Err(RegistryError::HierarchyTooDeep {
                name: name.to_string(),
                depth,
                max: self.config.max_depth,
            });
        }

        match self.names.entry(name.to_string()) {
            Entry::Occupied(existing) => Err(RegistryError::DuplicateClass {
                name: name.to_string(),
                existing: *existing.get(),
            }),
            Entry::Vacant(slot) => {
                let id = ClassId::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed));
                let descriptor =
                    ClassDescriptor::new(id, name, parent_id, depth, factory.is_some());
                if let Some(factory) = factory {
                    self.factories.insert(id, factory);
                }
                self.classes.insert(id, Arc::new(descriptor));
                slot.insert(id);

                log::debug!("registered class {} as {} (parent: {:?})", name, id, parent);
                Ok(id)
            }
        }
    }

    /// Register the class tagged by `T`, without a default instance.
    pub fn register<T: Reflected>(&self) -> Result<ClassId> {
        self.register_class(T::CLASS_NAME, T::PARENT_NAME, None)
    }

    /// Register the class tagged by `T` with `T::default()` as its default
    /// instance.
    pub fn register_default<T>(&self) -> Result<ClassId>
    where
        T: Reflected + Default + Send + Sync,
    {
        self.register_with_default::<T, _>(|_| Arc::new(T::default()) as ObjectRef)
    }

    /// Register the class tagged by `T` with a custom default-instance factory.
    pub fn register_with_default<T, F>(&self, factory: F) -> Result<ClassId>
    where
        T: Reflected,
        F: Fn(ClassId) -> ObjectRef + Send + Sync + 'static,
    {
        self.register_class(T::CLASS_NAME, T::PARENT_NAME, Some(Arc::new(factory)))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if no classes are registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All descriptors, in registration order.
    pub fn classes(&self) -> Vec<Arc<ClassDescriptor>> {
        let mut all: Vec<_> = self
            .classes
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        all.sort_by_key(|desc| desc.id());
        all
    }

    /// Direct parent of `class`.
    pub fn parent_of(&self, class: ClassId) -> Option<ClassId> {
        self.classes.get(&class).and_then(|desc| desc.parent())
    }

    /// Ancestors of `class`, nearest first, not including `class` itself.
    pub fn ancestors(&self, class: ClassId) -> Vec<ClassId> {
        let mut chain = Vec::new();
        let mut current = self.parent_of(class);
        while let Some(id) = current {
            chain.push(id);
            current = self.parent_of(id);
        }
        chain
    }

    /// Check if a default instance has already been created for `class`.
    pub fn has_cached_default(&self, class: ClassId) -> bool {
        self.defaults.contains_key(&class)
    }
}

impl TypeRegistry for ClassRegistry {
    fn class_named(&self, name: &str) -> Option<ClassId> {
        self.names.get(name).map(|entry| *entry.value())
    }

    fn descriptor(&self, class: ClassId) -> Option<Arc<ClassDescriptor>> {
        self.classes.get(&class).map(|entry| Arc::clone(entry.value()))
    }

    fn is_child_of(&self, class: ClassId, base: ClassId) -> bool {
        if !self.classes.contains_key(&class) {
            return false;
        }
        let mut current = Some(class);
        while let Some(id) = current {
            if id == base {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }

    fn default_object(&self, class: ClassId) -> Option<ObjectRef> {
        if self.config.cache_default_objects {
            if let Some(cached) = self.defaults.get(&class) {
                return Some(Arc::clone(cached.value()));
            }
        }

        // Clone the factory out so no map guard is held while it runs
        let factory = self.factories.get(&class).map(|f| Arc::clone(f.value()))?;
        let object = factory(class);
        log::trace!("created default {} instance for {}", object.class_name(), class);

        if !self.config.cache_default_objects {
            return Some(object);
        }

        // Another thread may have won the race; keep whichever got in first
        let canonical = self.defaults.entry(class).or_insert(object);
        Some(Arc::clone(canonical.value()))
    }
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .classes()
            .iter()
            .map(|desc| desc.name().to_string())
            .collect();
        f.debug_struct("ClassRegistry")
            .field("config", &self.config)
            .field("classes", &names)
            .finish()
    }
}
