//! Backend Address Map
//!
//! Maps node identities on the ring to the base URLs of their cache
//! nodes. Addressing lives entirely in router configuration; the ring
//! only ever sees opaque identities.

use std::collections::HashMap;

/// Node identity to base URL mapping
#[derive(Debug, Clone, Default)]
pub struct BackendMap {
    targets: HashMap<String, String>,
}

impl BackendMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            targets: HashMap::new(),
        }
    }

    /// Build from (node identity, base URL) pairs. Trailing slashes are
    /// stripped so URL assembly stays uniform.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = Self::new();
        for (node, url) in pairs {
            map.insert(node, url);
        }
        map
    }

    /// Register a backend
    pub fn insert(&mut self, node: impl Into<String>, base_url: impl Into<String>) {
        let url = base_url.into();
        self.targets
            .insert(node.into(), url.trim_end_matches('/').to_string());
    }

    /// Base URL for a node identity
    pub fn url_for(&self, node: &str) -> Option<&str> {
        self.targets.get(node).map(String::as_str)
    }

    /// All registered node identities
    pub fn node_ids(&self) -> Vec<String> {
        self.targets.keys().cloned().collect()
    }

    /// Number of registered backends
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Check if no backends are registered
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let mut map = BackendMap::new();
        map.insert("cache0", "http://localhost:3000");

        assert_eq!(map.url_for("cache0"), Some("http://localhost:3000"));
        assert_eq!(map.url_for("cache9"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let mut map = BackendMap::new();
        map.insert("cache0", "http://localhost:3000/");
        assert_eq!(map.url_for("cache0"), Some("http://localhost:3000"));
    }

    #[test]
    fn test_from_pairs() {
        let map = BackendMap::from_pairs(vec![
            ("cache0".to_string(), "http://localhost:3000".to_string()),
            ("cache1".to_string(), "http://localhost:3001".to_string()),
        ]);

        let mut ids = map.node_ids();
        ids.sort();
        assert_eq!(ids, vec!["cache0", "cache1"]);
    }
}
