//! Endpoint handlers.
//!
//! Endpoints:
//! - GET /deldata?id= - Delete an event (plain text)
//! - GET /getData?name=&year=&month=&day= - Search events (JSON array)
//! - GET /getId - Highest id in use (JSON object)
//! - GET /getYears - Distinct years with events (JSON array)
//! - GET /insert?id=&name=&year=&month=&day=&time= - Create an event (JSON envelope)
//! - GET /update?id=&name=&year=&month=&day=&time= - Overwrite an event (plain text)

use lambda_http::{Body, Error, Response};
use shared::http::{envelope_response, json_response, rows_response, text_response};
use shared::{
    query, safe_get, Envelope, EventFilter, EventUpdate, NewEvent, Params, Pattern, StoreConnector,
};
use tracing::{info, warn};

/// Envelope for a store failure on the JSON endpoints.
fn store_failure(err: &shared::Error) -> Envelope {
    match err {
        shared::Error::Connection(_) => Envelope::error(err.to_string()),
        other => Envelope::error(format!("Query error: {}", other)),
    }
}

pub async fn delete_record<S>(store: &S, params: &Params) -> Result<Response<Body>, Error>
where
    S: StoreConnector + ?Sized,
{
    let id = safe_get(params, "id", "", Some(Pattern::Numeric));
    if id.is_empty() {
        warn!("Rejected delete without a numeric id");
        return text_response(500, "");
    }

    match store.execute(&query::delete(&id)).await {
        Ok(()) => {
            info!("Deleted calendar record {}", id);
            text_response(200, "Record deleted successfully")
        }
        Err(e @ shared::Error::Connection(_)) => text_response(500, e.to_string()),
        Err(e) => {
            warn!(error = %e, id = %id, "Delete failed");
            text_response(500, format!("Error deleting record: {}", e))
        }
    }
}

pub async fn search_records<S>(store: &S, params: &Params) -> Result<Response<Body>, Error>
where
    S: StoreConnector + ?Sized,
{
    let filter = EventFilter::from_params(params);

    match store.fetch_all(&query::search(&filter)).await {
        Ok(rows) => {
            info!(count = rows.len(), "Matched calendar records");
            rows_response(rows)
        }
        Err(e) => {
            warn!(error = %e, "Search failed");
            envelope_response(&store_failure(&e))
        }
    }
}

pub async fn max_id<S>(store: &S) -> Result<Response<Body>, Error>
where
    S: StoreConnector + ?Sized,
{
    match store.fetch_all(&query::max_id()).await {
        Ok(rows) => match rows.into_iter().next() {
            Some(row) => json_response(200, &row),
            None => json_response(200, &serde_json::Value::Null),
        },
        Err(e) => {
            warn!(error = %e, "Max id lookup failed");
            envelope_response(&store_failure(&e))
        }
    }
}

pub async fn list_years<S>(store: &S) -> Result<Response<Body>, Error>
where
    S: StoreConnector + ?Sized,
{
    match store.fetch_all(&query::years()).await {
        Ok(rows) => rows_response(rows),
        Err(e) => {
            warn!(error = %e, "Year listing failed");
            envelope_response(&store_failure(&e))
        }
    }
}

pub async fn create_record<S>(store: &S, params: &Params) -> Result<Response<Body>, Error>
where
    S: StoreConnector + ?Sized,
{
    let event = match NewEvent::from_params(params) {
        Ok(event) => event,
        Err(e) => return envelope_response(&Envelope::error(e.to_string())),
    };

    match store.execute(&query::insert(&event)).await {
        Ok(()) => {
            info!("Created calendar record {} ({})", event.id, event.name);
            envelope_response(&Envelope::ok())
        }
        Err(e) => {
            warn!(error = %e, id = %event.id, "Insert failed");
            envelope_response(&store_failure(&e))
        }
    }
}

pub async fn update_record<S>(store: &S, params: &Params) -> Result<Response<Body>, Error>
where
    S: StoreConnector + ?Sized,
{
    let event = match EventUpdate::from_params(params) {
        Ok(event) => event,
        Err(e) => return text_response(e.status_code(), format!("Error updating record: {}", e)),
    };

    match store.execute(&query::update(&event)).await {
        Ok(()) => {
            info!("Updated calendar record {}", event.id);
            text_response(200, "Done")
        }
        Err(e @ shared::Error::Connection(_)) => text_response(500, e.to_string()),
        Err(e) => {
            warn!(error = %e, id = %event.id, "Update failed");
            text_response(200, format!("Error updating record: {}", e))
        }
    }
}
