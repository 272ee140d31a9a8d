//! Error types for class registration

use thiserror::Error;

use crate::class::ClassId;

/// Main error type for registry operations.
///
/// Resolving a class reference never produces one of these: an
/// incompatible or dangling reference resolves to `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Class names must be non-empty and free of surrounding whitespace
    #[error("Invalid class name: {0:?}")]
    InvalidName(String),

    /// A class with this name already exists
    #[error("Class '{name}' is already registered as {existing}")]
    DuplicateClass {
        /// Name that was registered twice
        name: String,
        /// Handle of the earlier registration
        existing: ClassId,
    },

    /// The named parent has not been registered yet
    #[error("Unknown parent class '{parent}' for '{name}'")]
    UnknownParent {
        /// Class being registered
        name: String,
        /// Parent name that failed to resolve
        parent: String,
    },

    /// Registering the class would exceed the configured hierarchy depth
    #[error("Class hierarchy too deep for '{name}': depth {depth} > max {max}")]
    HierarchyTooDeep {
        /// Class being registered
        name: String,
        /// Depth the class would have
        depth: usize,
        /// Configured maximum
        max: usize,
    },
}

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
