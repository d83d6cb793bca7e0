use std::collections::BTreeMap;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::{Api, Client};

use crate::config::ResolverConfig;
use crate::error::{Error, Result};

/// ServiceAccount name to string-encoded uid associations
pub type UidMapping = BTreeMap<String, String>;

/// Source of the ServiceAccount-to-uid mapping
///
/// The resolver depends only on this capability so the mapping can be served
/// from an in-memory table in tests instead of a live cluster.
#[async_trait]
pub trait MappingSource: Send + Sync {
    /// Fetches the current mapping
    ///
    /// Called once per admission request; implementations must not cache.
    async fn fetch(&self) -> Result<UidMapping>;
}

/// Fetches the mapping from a named ConfigMap using in-cluster credentials
#[derive(Clone, Debug)]
pub struct ConfigMapSource {
    config: ResolverConfig,
}

impl ConfigMapSource {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl MappingSource for ConfigMapSource {
    async fn fetch(&self) -> Result<UidMapping> {
        let client = Client::try_default()
            .await
            .map_err(|source| Error::ClientInit { source })?;

        let api: Api<ConfigMap> = Api::namespaced(client, &self.config.namespace);
        let config_map = api
            .get(&self.config.mapping_name)
            .await
            .map_err(|source| Error::MappingFetch {
                name: self.config.mapping_name.clone(),
                namespace: self.config.namespace.clone(),
                source,
            })?;

        Ok(config_map.data.unwrap_or_default())
    }
}
