//! HTTP helpers for Lambda functions.

use lambda_http::{Body, Request, RequestExt, Response};
use serde::Serialize;
use tracing::error;

use crate::models::{Envelope, Row};
use crate::validate::Params;

/// Collect the query string into a map. A repeated key keeps its last value.
pub fn query_params(event: &Request) -> Params {
    event
        .query_string_parameters()
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(
    status: u16,
    data: &T,
) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(data)?))?)
}

/// Create a plain-text response.
pub fn text_response(
    status: u16,
    message: impl Into<String>,
) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "text/plain; charset=utf-8")
        .body(Body::from(message.into()))?)
}

/// `{ok, error?}` envelope. Failures are still delivered with status 200.
pub fn envelope_response(envelope: &Envelope) -> Result<Response<Body>, lambda_http::Error> {
    json_response(200, envelope)
}

/// Rows as a bare JSON array, or `null` when there are none.
pub fn rows_response(rows: Vec<Row>) -> Result<Response<Body>, lambda_http::Error> {
    if rows.is_empty() {
        json_response(200, &serde_json::Value::Null)
    } else {
        json_response(200, &rows)
    }
}

/// Turn an error that escaped a handler into a 500 text response.
pub fn recover(
    result: Result<Response<Body>, lambda_http::Error>,
) -> Result<Response<Body>, lambda_http::Error> {
    match result {
        Ok(response) => Ok(response),
        Err(e) => {
            error!(error = %e, "Unhandled error");
            text_response(500, e.to_string())
        }
    }
}
