#![allow(dead_code)]

use dynamic_cors_rs::{CorsDecision, Headers, Rejection};

pub fn assert_simple(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::SimpleAccepted { headers } => headers,
        other => panic!("expected accepted simple request, got {:?}", other),
    }
}

pub fn assert_preflight(decision: CorsDecision) -> (Headers, u16) {
    match decision {
        CorsDecision::PreflightAccepted { headers, status } => (headers, status),
        other => panic!("expected accepted preflight, got {:?}", other),
    }
}

pub fn assert_rejected(decision: CorsDecision) -> Rejection {
    match decision {
        CorsDecision::Rejected(rejection) => rejection,
        other => panic!("expected rejection, got {:?}", other),
    }
}

pub fn assert_header_eq(headers: &Headers, name: &str, expected: &str) {
    assert_eq!(
        super::headers::header_value(headers, name),
        Some(expected),
        "unexpected value for {name}"
    );
}
