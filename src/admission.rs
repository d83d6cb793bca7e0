use json_patch::diff;
use k8s_openapi::api::core::v1::Pod;
use kube::ResourceExt;
use kube::api::DynamicObject;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview};
use tracing::{error, info};

use crate::mutator::PodMutator;

/// Runs a chain of pod mutation rules over an admission review
///
/// Each rule sees the output of the previous one, so patches compose. The
/// first failing rule denies the request; a Pod is never admitted with a
/// partially applied mutation. The caller owns serving the returned review
/// back to the API server.
pub async fn review_pod(
    mutators: &[Box<dyn PodMutator>],
    review: AdmissionReview<Pod>,
) -> AdmissionReview<DynamicObject> {
    let req: AdmissionRequest<Pod> = match review.try_into() {
        Ok(req) => req,
        Err(err) => {
            error!("invalid admission request: {}", err);
            return AdmissionResponse::invalid(err.to_string()).into_review();
        }
    };

    let res = AdmissionResponse::from(&req);
    let Some(original) = &req.object else {
        return res.into_review();
    };
    let name = original.name_any();

    let mut current = original.clone();
    for mutator in mutators {
        match mutator.mutate(&current, &req).await {
            Ok(mutated) => {
                info!(
                    mutator = mutator.name(),
                    operation = ?req.operation,
                    name = %name,
                    "mutated pod"
                );
                current = mutated;
            }
            Err(err) => {
                error!(
                    mutator = mutator.name(),
                    operation = ?req.operation,
                    name = %name,
                    error = %err,
                    "mutation failed"
                );
                return res
                    .deny(format!("{}: {}", mutator.name(), err))
                    .into_review();
            }
        }
    }

    let (Ok(before), Ok(after)) = (
        serde_json::to_value(original),
        serde_json::to_value(&current),
    ) else {
        return AdmissionResponse::invalid("failed to serialize pod").into_review();
    };

    let patch = diff(&before, &after);
    if patch.0.is_empty() {
        return res.into_review();
    }

    match res.with_patch(patch) {
        Ok(res) => res.into_review(),
        Err(err) => AdmissionResponse::invalid(err.to_string()).into_review(),
    }
}
