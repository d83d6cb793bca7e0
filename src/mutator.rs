use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::core::admission::AdmissionRequest;
use tracing::info;

use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::identity;
use crate::mapping::{ConfigMapSource, MappingSource};

/// A single mutation rule applied to incoming Pods
///
/// Implementations receive the Pod and the originating admission request and
/// return either an unchanged copy, a mutated copy, or an error. Errors abort
/// the admission of the Pod; a rule must never return a partially mutated Pod.
#[async_trait]
pub trait PodMutator: Send + Sync {
    /// Returns the name of this rule for logging purposes
    fn name(&self) -> &'static str;

    /// Mutates the Pod in the admission request
    async fn mutate(&self, pod: &Pod, req: &AdmissionRequest<Pod>) -> Result<Pod>;
}

/// Defaults a Pod's `runAsUser` from the requesting ServiceAccount
///
/// Pods that already declare a `runAsUser`, and requests not made by a
/// ServiceAccount, pass through unchanged. Everything else must have a uid
/// mapped for its ServiceAccount or the request is rejected.
pub struct RunAsUserDefaulter<S = ConfigMapSource> {
    source: S,
}

impl RunAsUserDefaulter {
    /// Creates a defaulter backed by the cluster's mapping ConfigMap
    pub fn in_cluster(config: ResolverConfig) -> Self {
        Self::new(ConfigMapSource::new(config))
    }
}

impl<S> RunAsUserDefaulter<S>
where
    S: MappingSource,
{
    /// Creates a defaulter reading uids from the given source
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Resolves the uid mapped for a ServiceAccount
    ///
    /// The mapping is fetched fresh on every call. A missing or empty entry
    /// is an [`Error::UnmappedPrincipal`]; a non-integer entry is an operator
    /// error surfaced as [`Error::MalformedUid`].
    async fn resolve(&self, service_account: &str) -> Result<i64> {
        let mapping = self.source.fetch().await?;

        let value = mapping
            .get(service_account)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::UnmappedPrincipal {
                service_account: service_account.to_owned(),
            })?;

        let uid = value.parse::<i64>().map_err(|source| Error::MalformedUid {
            service_account: service_account.to_owned(),
            value: value.clone(),
            source,
        })?;

        info!(service_account, uid, "resolved uid for service account");
        Ok(uid)
    }
}

#[async_trait]
impl<S> PodMutator for RunAsUserDefaulter<S>
where
    S: MappingSource,
{
    fn name(&self) -> &'static str {
        "default_run_as_user"
    }

    async fn mutate(&self, pod: &Pod, req: &AdmissionRequest<Pod>) -> Result<Pod> {
        let mut mutated = pod.clone();

        if run_as_user(pod).is_some() {
            return Ok(mutated);
        }

        let Some(sa) = identity::service_account(&req.user_info) else {
            return Ok(mutated);
        };

        info!(
            service_account = %sa.name,
            "no runAsUser rule found, applying default for service account"
        );

        let uid = self.resolve(&sa.name).await?;
        mutated
            .spec
            .get_or_insert_with(Default::default)
            .security_context
            .get_or_insert_with(Default::default)
            .run_as_user = Some(uid);

        Ok(mutated)
    }
}

fn run_as_user(pod: &Pod) -> Option<i64> {
    pod.spec
        .as_ref()
        .and_then(|spec| spec.security_context.as_ref())
        .and_then(|ctx| ctx.run_as_user)
}
