#![allow(dead_code)]

pub mod store;

use award_lookup_lambda::handlers::award::ApiGatewayResponse;
use serde_json::{json, Value};

pub fn award_event(award_body: &str, query: Option<Value>) -> Value {
    let mut event = json!({
        "version": "2.0",
        "routeKey": "GET /awards/{awardBody}/movies",
        "pathParameters": {"awardBody": award_body},
    });
    if let Some(query) = query {
        event["queryStringParameters"] = query;
    }
    event
}

pub fn response_body(response: &ApiGatewayResponse) -> Value {
    serde_json::from_str(&response.body).expect("response body should be json")
}
