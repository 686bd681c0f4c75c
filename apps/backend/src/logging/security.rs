use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a rejected bearer token on a guarded route.
pub fn auth_failed(reason: &str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_AUTH_FAILED",
        %trace_id,
        reason,
        path,
        "Authentication failure"
    );
}

/// Log a webhook call whose body signature did not verify.
pub fn webhook_signature_rejected(signature: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_WEBHOOK_SIGNATURE_REJECTED",
        %trace_id,
        signature = %Redacted(signature.unwrap_or("<missing>")),
        "Payment webhook signature rejected"
    );
}

/// Log a non-admin attempting a moderation action.
pub fn forbidden_role(user_id: &str, required: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_FORBIDDEN_ROLE",
        %trace_id,
        user_id,
        required,
        "Insufficient role"
    );
}
