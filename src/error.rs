use thiserror::Error;

/// Errors that can occur while resolving and applying a default uid
#[derive(Error, Debug)]
pub enum Error {
    /// Could not build a client for the cluster API
    #[error("failed to initialize Kubernetes client: {source}")]
    ClientInit {
        #[source]
        source: kube::Error,
    },

    /// Could not retrieve the uid mapping ConfigMap
    #[error("failed to fetch uid mapping {name} in namespace {namespace}: {source}")]
    MappingFetch {
        name: String,
        namespace: String,
        #[source]
        source: kube::Error,
    },

    /// The ServiceAccount has no uid entry in the mapping
    #[error("service account {service_account} has no uid mapped")]
    UnmappedPrincipal { service_account: String },

    /// The mapped value is not a base-10 64-bit integer
    #[error("uid {value:?} mapped for service account {service_account} is not a valid integer")]
    MalformedUid {
        service_account: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Result type for mutation operations
pub type Result<T, E = Error> = std::result::Result<T, E>;
