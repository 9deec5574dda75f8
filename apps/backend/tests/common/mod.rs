#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use backend_test_support::problem_details::{assert_problem, Problem};
use larder::db::txn_policy::{set_txn_policy, TxnPolicy};

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

// Every test owns a private in-memory database, so committing is the
// default; `LARDER_TXN_POLICY=rollback` flips a whole binary.
#[ctor::ctor]
fn init_txn_policy() {
    let policy = match std::env::var("LARDER_TXN_POLICY")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "rollback" => TxnPolicy::RollbackOnOk,
        _ => TxnPolicy::CommitOnOk,
    };
    set_txn_policy(policy);
}

/// Assert a problem-details error and its exact detail text.
pub async fn assert_error(
    resp: ServiceResponse<BoxBody>,
    status: u16,
    code: &str,
    detail: &str,
) -> Problem {
    let status = StatusCode::from_u16(status).expect("valid status");
    assert_problem(resp, status, code, Some(detail)).await
}

/// Assert a problem-details error without pinning the detail text.
pub async fn assert_error_code(resp: ServiceResponse<BoxBody>, status: u16, code: &str) -> Problem {
    let status = StatusCode::from_u16(status).expect("valid status");
    assert_problem(resp, status, code, None).await
}
