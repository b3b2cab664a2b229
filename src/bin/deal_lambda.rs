//! AWS Lambda HTTP handler for solving a deal
//!
//! POST a scenario JSON body (see `deal_calc::scenario`). Responses:
//! - 200 with the solved deal summary
//! - 422 with the conflict reason when the locks cannot be solved
//! - 400 when the body is not a valid scenario

use deal_calc::scenario::load_scenario_from_reader;
use lambda_http::{run, service_fn, Body, Request, Response};
use lambda_runtime::Error;
use log::{info, warn};
use serde_json::json;

fn json_response(status: u16, body: serde_json::Value) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?;
    Ok(response)
}

/// Map a request body to its response
fn respond(body: &[u8]) -> Result<Response<Body>, Error> {
    let scenario = match load_scenario_from_reader(body) {
        Ok(scenario) => scenario,
        Err(e) => {
            warn!("bad request: {}", e);
            return json_response(400, json!({ "error": e.to_string() }));
        }
    };

    match scenario.solve() {
        Ok(solved) => {
            info!("solved deal under locks {}", scenario.locks);
            json_response(200, serde_json::to_value(solved.summary())?)
        }
        Err(reason) => json_response(
            422,
            json!({ "error": reason.to_string(), "code": reason.code() }),
        ),
    }
}

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    respond(event.body())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn call(body: &str) -> (u16, Value) {
        let response = respond(body.as_bytes()).unwrap();
        assert_eq!(response.headers()["content-type"], "application/json");
        let value: Value = serde_json::from_slice(response.body()).unwrap();
        (response.status().as_u16(), value)
    }

    #[test]
    fn test_solved_deal_is_200() {
        let (status, value) = call(
            r#"{
                "terms": { "brokerCPA": 1200, "brokerCRG": 10, "affiliateCRG": 10, "margin": 20 },
                "locks": { "brokerTerms": true, "margin": true }
            }"#,
        );
        assert_eq!(status, 200);
        assert_eq!(value["affiliateCPA"], 960.0);
        assert_eq!(value["margin"], 20.0);
    }

    #[test]
    fn test_conflicting_locks_are_422() {
        let body = r#"{ "locks": { "brokerTerms": true, "affiliateTerms": true } }"#;
        let (status, value) = call(body);
        assert_eq!(status, 422);
        assert_eq!(value["code"], "both_sides_locked");
        assert_eq!(
            value["error"],
            "Cannot lock both Broker and Affiliate terms at the same time."
        );
    }

    #[test]
    fn test_malformed_body_is_400() {
        let (status, value) = call("{ terms: ");
        assert_eq!(status, 400);
        assert!(value["error"].is_string());
    }

    #[tokio::test]
    async fn test_handler_reads_request_body() {
        let request = Request::new(Body::from("{}"));
        let response = handler(request).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }
}
