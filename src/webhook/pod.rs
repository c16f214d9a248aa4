//! Pod Mutation Webhook
//!
//! Handles AdmissionReview requests for workload objects, attaching the
//! `cumulo.ai` label patch decided by the [`patch`](crate::patch) engine.

use axum::Json;
use kube::core::{
    admission::{AdmissionRequest, AdmissionResponse, AdmissionReview},
    DynamicObject, Status,
};
use tracing::{debug, error, info};

use crate::patch::{self, PatchDocument};
use crate::{Error, Result};

/// Status reason reported when the patch cannot be encoded
pub const ENCODING_FAILURE_REASON: &str = "EncodingFailure";

/// Handle mutating admission review
///
/// This handler:
/// 1. Converts the review into an admission request
/// 2. Reads the object's labels
/// 3. Asks the patch engine for the label patch
/// 4. Returns the review with the patched response
pub async fn mutate_handler(
    Json(body): Json<AdmissionReview<DynamicObject>>,
) -> Json<AdmissionReview<DynamicObject>> {
    let req: AdmissionRequest<DynamicObject> = match body.try_into() {
        Ok(req) => req,
        Err(e) => {
            error!(error = %e, "Failed to parse admission request");
            return Json(AdmissionResponse::invalid(e.to_string()).into_review());
        }
    };

    Json(mutate(&req).into_review())
}

/// Process a single admission request
///
/// Never fails: encoding errors are turned into a denied response.
pub fn mutate(request: &AdmissionRequest<DynamicObject>) -> AdmissionResponse {
    let uid = &request.uid;

    info!(
        uid = %uid,
        kind = %request.kind.kind,
        namespace = ?request.namespace,
        name = %request.name,
        operation = ?request.operation,
        "Incoming admission request"
    );

    let obj = match &request.object {
        Some(obj) => obj,
        None => {
            debug!(uid = %uid, "No object in request, allowing unchanged");
            return AdmissionResponse::from(request);
        }
    };

    let document = patch::decide(obj.metadata.labels.as_ref());

    debug!(
        uid = %uid,
        ops = ?document.operations(),
        "Decided label patch"
    );

    match admit_with_patch(request, document) {
        Ok(response) => response,
        Err(e) => {
            error!(uid = %uid, error = %e, "Failed to encode patch");
            deny(request, &e)
        }
    }
}

/// Allow the request with the patch attached
fn admit_with_patch(
    request: &AdmissionRequest<DynamicObject>,
    document: PatchDocument,
) -> Result<AdmissionResponse> {
    let mut response = AdmissionResponse::from(request)
        .with_patch(document.into())
        .map_err(|e| Error::encoding(e.to_string()))?;
    response.result = Status::success();
    Ok(response)
}

/// Deny the request, keeping the uid so the API server can correlate it
fn deny(request: &AdmissionRequest<DynamicObject>, err: &Error) -> AdmissionResponse {
    let message = err.to_string();
    let mut response = AdmissionResponse::from(request).deny(&message);
    response.result = Status::failure(&message, ENCODING_FAILURE_REASON);
    response
}
