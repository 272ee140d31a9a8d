//! Registry configuration

/// Default limit on the number of ancestors a class may have.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration for a [`ClassRegistry`](crate::ClassRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum hierarchy depth (a root class has depth 0)
    pub max_depth: usize,

    /// Keep the first default instance created for each class and hand it
    /// out on every later request. When off, every request runs the factory.
    pub cache_default_objects: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            cache_default_objects: true,
        }
    }
}

impl RegistryConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with a custom depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Turn default-instance caching on or off.
    pub fn cache_default_objects(mut self, cache: bool) -> Self {
        self.cache_default_objects = cache;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::new();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.cache_default_objects);
    }

    #[test]
    fn test_builder_style() {
        let config = RegistryConfig::with_max_depth(2).cache_default_objects(false);
        assert_eq!(config.max_depth, 2);
        assert!(!config.cache_default_objects);
    }
}
