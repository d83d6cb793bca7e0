use serde::Deserialize;

/// Identifies the ConfigMap holding ServiceAccount-to-uid associations
///
/// Passed to the resolver at construction time; there is no ambient
/// process-wide configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Namespace the mapping ConfigMap lives in
    pub namespace: String,
    /// Name of the mapping ConfigMap
    pub mapping_name: String,
}

impl ResolverConfig {
    pub fn new(namespace: impl Into<String>, mapping_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            mapping_name: mapping_name.into(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new("default", "uid-mapping")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_identifiers() {
        let config = ResolverConfig::default();
        assert_eq!(config.namespace, "default");
        assert_eq!(config.mapping_name, "uid-mapping");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ResolverConfig =
            serde_json::from_value(serde_json::json!({ "namespace": "build" })).unwrap();
        assert_eq!(config.namespace, "build");
        assert_eq!(config.mapping_name, "uid-mapping");
    }
}
