//! Mutating admission rule that defaults a Pod's `runAsUser`
//!
//! When a Pod is created without an explicit `runAsUser` by a ServiceAccount
//! that has a uid mapped in a well-known ConfigMap, the rule injects that uid
//! into the Pod's security context. Pods with an explicit `runAsUser`, and
//! requests not made by a ServiceAccount, pass through unchanged. A
//! ServiceAccount without a mapping (or with a malformed one) gets its request
//! denied rather than admitted without a uid.
//!
//! The webhook server, TLS termination, and webhook registration are the
//! embedding application's concern; [`review_pod`] is the seam between the two.

mod admission;
mod config;
mod error;
mod identity;
mod mapping;
mod mutator;

pub use admission::review_pod;
pub use config::ResolverConfig;
pub use error::{Error, Result};
pub use identity::{ServiceAccountRef, service_account};
pub use mapping::{ConfigMapSource, MappingSource, UidMapping};
pub use mutator::{PodMutator, RunAsUserDefaulter};
