#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::{
    assert_problem_details_from_parts, ProblemDetailsLike,
};
use habitat_backend::db::txn_policy::{set_txn_policy, TxnPolicy};

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

// Each test gets its own in-memory database, so handlers commit by default;
// `HABITAT_TXN_POLICY=rollback` flips that for debugging.
#[ctor::ctor]
fn init_txn_policy() {
    let policy = match std::env::var("HABITAT_TXN_POLICY")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "rollback" => TxnPolicy::RollbackOnOk,
        _ => TxnPolicy::CommitOnOk,
    };
    set_txn_policy(policy);
}

/// Assert the problem details contract on a service response.
///
/// Also checks the status-specific headers: 401 carries
/// `WWW-Authenticate: Bearer`, 503 carries `Retry-After`, nothing else does.
pub async fn assert_problem_details_structure(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
    expected_detail: Option<&str>,
) -> ProblemDetailsLike {
    let status = resp.status();
    let headers = resp.headers().clone();

    match expected_status {
        401 => {
            assert_eq!(
                headers.get("www-authenticate").map(|v| v.to_str().unwrap()),
                Some("Bearer")
            );
            assert!(headers.get("retry-after").is_none());
        }
        503 => {
            assert!(headers.get("retry-after").is_some());
            assert!(headers.get("www-authenticate").is_none());
        }
        _ => {
            assert!(headers.get("www-authenticate").is_none());
            assert!(headers.get("retry-after").is_none());
        }
    }

    let body = test::read_body(resp).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        expected_code,
        StatusCode::from_u16(expected_status).unwrap(),
        expected_detail,
    )
}

/// Read a JSON response body.
pub async fn read_json(resp: ServiceResponse<BoxBody>) -> serde_json::Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!("response is not JSON ({e}): {}", String::from_utf8_lossy(&body))
    })
}
