use award_lookup_core::contract::{
    AwardLookupEvent, AwardResponseBody, AwardResponseData, ErrorBody, MessageBody,
    INVALID_AWARD_MESSAGE, MISSING_AWARD_MESSAGE,
};
use award_lookup_core::query_params::QueryParamsValidator;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::record_store::{RecordStore, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("malformed event: {0}")]
    MalformedEvent(#[source] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to serialize response: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl HandlerError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedEvent(_) => "malformed_event",
            Self::Store(StoreError::Request { .. }) => "store_request_failed",
            Self::Store(StoreError::MalformedRecord(_)) => "malformed_record",
            Self::Serialization(_) => "serialization_failed",
        }
    }
}

/// Looks up an award by its `awardBody` path parameter and, when the query
/// parameters validate, attaches the award's cast.
///
/// Every failure is folded into the returned response: 404 for a missing or
/// unknown award, 500 for anything unexpected.
pub fn handle_award_event(
    event: Value,
    validator: &dyn QueryParamsValidator,
    store: &dyn RecordStore,
) -> ApiGatewayResponse {
    tracing::info!(event = %event, "award lookup requested");

    match lookup_award(event, validator, store) {
        Ok(response) => response,
        Err(error) => {
            tracing::error!(code = error.code(), error = %error, "award lookup failed");
            error_response(500, ErrorBody::internal(error.code()).to_json())
        }
    }
}

fn lookup_award(
    event: Value,
    validator: &dyn QueryParamsValidator,
    store: &dyn RecordStore,
) -> Result<ApiGatewayResponse, HandlerError> {
    let event = AwardLookupEvent::from_value(event).map_err(HandlerError::MalformedEvent)?;

    let Some(award_body) = event.award_body() else {
        tracing::info!("award body path parameter missing or invalid");
        return Ok(message_response(404, MISSING_AWARD_MESSAGE));
    };

    let Some(award) = store.get_award(award_body)? else {
        tracing::info!(award_body = award_body.get(), "award not found");
        return Ok(message_response(404, INVALID_AWARD_MESSAGE));
    };

    let mut data = AwardResponseData {
        award_body: award,
        cast: None,
    };

    if validator.is_valid(event.query_string_parameters.as_ref()) {
        let cast = store.query_cast(award_body)?;
        tracing::info!(
            award_body = award_body.get(),
            cast_count = cast.len(),
            "cast included"
        );
        data.cast = Some(cast);
    } else {
        tracing::debug!(award_body = award_body.get(), "cast omitted");
    }

    success_response(200, &AwardResponseBody { data })
}

fn json_headers() -> Value {
    json!({"content-type": "application/json"})
}

fn message_response(status_code: u16, message: &str) -> ApiGatewayResponse {
    error_response(status_code, MessageBody::new(message).to_json())
}

fn success_response(
    status_code: u16,
    payload: &impl Serialize,
) -> Result<ApiGatewayResponse, HandlerError> {
    let body = serde_json::to_string(payload).map_err(HandlerError::Serialization)?;
    Ok(ApiGatewayResponse {
        status_code,
        headers: json_headers(),
        body,
    })
}

fn error_response(status_code: u16, body: Value) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json_headers(),
        body: body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use award_lookup_core::contract::{AwardBody, AwardRecord, CastRecord};
    use award_lookup_core::query_params::{MovieQueryParamsValidator, UnconstrainedValidator};

    use super::*;

    struct CapturingStore {
        award: Option<AwardRecord>,
        cast: Vec<CastRecord>,
        calls: Mutex<Vec<String>>,
    }

    impl CapturingStore {
        fn with_award(award_body: i64) -> Self {
            let award = json!({"awardBody": award_body, "category": "Best Picture"});
            let cast = json!({"awardBody": award_body, "actorName": "Jane"});
            Self {
                award: Some(record(award)),
                cast: vec![record(cast)],
                calls: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self {
                award: None,
                cast: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("poisoned mutex").clone()
        }
    }

    impl RecordStore for CapturingStore {
        fn get_award(&self, award_body: AwardBody) -> Result<Option<AwardRecord>, StoreError> {
            self.calls
                .lock()
                .expect("poisoned mutex")
                .push(format!("get_award:{award_body}"));
            Ok(self.award.clone())
        }

        fn query_cast(&self, award_body: AwardBody) -> Result<Vec<CastRecord>, StoreError> {
            self.calls
                .lock()
                .expect("poisoned mutex")
                .push(format!("query_cast:{award_body}"));
            Ok(self.cast.clone())
        }
    }

    fn record<T: From<serde_json::Map<String, Value>>>(value: Value) -> T {
        T::from(value.as_object().cloned().expect("record must be an object"))
    }

    fn event(award_body: &str, query: Value) -> Value {
        json!({"pathParameters": {"awardBody": award_body}, "queryStringParameters": query})
    }

    fn body(response: &ApiGatewayResponse) -> Value {
        serde_json::from_str(&response.body).expect("body should be json")
    }

    #[test]
    fn missing_path_parameter_skips_store() {
        let store = CapturingStore::with_award(3);
        let response = handle_award_event(json!({}), &MovieQueryParamsValidator, &store);

        assert_eq!(response.status_code, 404);
        assert_eq!(response.body, r#"{"Message":"Missing award Name"}"#);
        assert!(store.calls().is_empty());
    }

    #[test]
    fn unknown_award_skips_cast_lookup() {
        let store = CapturingStore::empty();
        let event = event("99", json!({"movieId": "1"}));
        let response = handle_award_event(event, &MovieQueryParamsValidator, &store);

        assert_eq!(response.status_code, 404);
        assert_eq!(response.body, r#"{"Message":"Invalid Award Name"}"#);
        assert_eq!(store.calls(), vec!["get_award:99".to_string()]);
    }

    #[test]
    fn negative_award_body_is_looked_up() {
        let store = CapturingStore::empty();
        let event = event("-4", json!(null));
        let response = handle_award_event(event, &MovieQueryParamsValidator, &store);

        assert_eq!(response.status_code, 404);
        assert_eq!(body(&response), json!({"Message": "Invalid Award Name"}));
        assert_eq!(store.calls(), vec!["get_award:-4".to_string()]);
    }

    #[test]
    fn valid_query_params_attach_cast() {
        let store = CapturingStore::with_award(3);
        let event = event("3", json!({"movieId": "1234"}));
        let response = handle_award_event(event, &MovieQueryParamsValidator, &store);
        let expected_cast = json!([{"awardBody": 3, "actorName": "Jane"}]);

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers, json_headers());
        assert_eq!(body(&response)["data"]["cast"], expected_cast);
        assert_eq!(
            store.calls(),
            vec!["get_award:3".to_string(), "query_cast:3".to_string()]
        );
    }

    #[test]
    fn unconstrained_validator_attaches_cast_without_query() {
        let store = CapturingStore::with_award(3);
        let event = event("3", json!(null));
        let response = handle_award_event(event, &UnconstrainedValidator, &store);

        assert_eq!(response.status_code, 200);
        assert!(body(&response)["data"].get("cast").is_some());
    }

    #[test]
    fn malformed_event_maps_to_opaque_500() {
        let store = CapturingStore::with_award(3);
        let event = json!({"pathParameters": "not-an-object"});
        let response = handle_award_event(event, &MovieQueryParamsValidator, &store);
        let expected = r#"{"error":{"code":"malformed_event","message":"Internal server error"}}"#;

        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, expected);
        assert!(store.calls().is_empty());
    }

    #[test]
    fn store_errors_expose_stable_codes() {
        let request = HandlerError::from(StoreError::Request {
            operation: "GetItem",
            message: "timeout".to_string(),
        });
        let malformed = HandlerError::from(StoreError::MalformedRecord("bad".to_string()));

        assert_eq!(request.code(), "store_request_failed");
        assert_eq!(malformed.code(), "malformed_record");
        assert_matches!(request, HandlerError::Store(StoreError::Request { .. }));
    }
}
