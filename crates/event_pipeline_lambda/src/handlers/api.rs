use event_pipeline_core::clock::{iso_timestamp, Clock};
use event_pipeline_core::contract::{
    empty_object, CreateEventRequest, EventCreatedResponse, EventListResponse, QueuedEvent,
    Record, EVENT_CREATED_MESSAGE, LIST_EVENTS_LIMIT, NOT_FOUND_MESSAGE,
};
use event_pipeline_core::ids::{generate_id, IdPrefix};
use serde_json::Value;

use crate::adapters::queue::EventQueue;
use crate::adapters::record_store::RecordStore;
use crate::error::HandlerError;
use crate::handlers::response::{error_response, json_response, LambdaResponse};

pub const EVENTS_PATH: &str = "/api/events";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    CreateEvent,
    ListEvents,
    NotFound,
}

pub fn resolve_route(method: &str, path: &str) -> Route {
    match (method, path) {
        ("POST", EVENTS_PATH) => Route::CreateEvent,
        ("GET", EVENTS_PATH) => Route::ListEvents,
        _ => Route::NotFound,
    }
}

/// The parts of an HTTP API (payload v2) event the router consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: String,
    pub path: String,
    pub body: Value,
}

impl ApiRequest {
    pub fn from_event(event: &Value) -> Self {
        let method = event
            .pointer("/requestContext/http/method")
            .and_then(Value::as_str)
            .unwrap_or("GET")
            .to_string();
        let path = event
            .get("rawPath")
            .and_then(Value::as_str)
            .unwrap_or("/")
            .to_string();

        Self {
            method,
            path,
            body: decode_body(event.get("body")),
        }
    }
}

/// Missing, null, malformed or non-object bodies all decode to `{}`.
fn decode_body(body: Option<&Value>) -> Value {
    let decoded = match body {
        Some(Value::String(text)) => serde_json::from_str(text).unwrap_or_else(|_| empty_object()),
        Some(value @ Value::Object(_)) => value.clone(),
        _ => empty_object(),
    };

    if decoded.is_object() {
        decoded
    } else {
        empty_object()
    }
}

pub fn handle_api_event(
    event: &Value,
    store: &impl RecordStore,
    queue: &impl EventQueue,
    clock: &dyn Clock,
) -> LambdaResponse {
    let request = ApiRequest::from_event(event);
    let route = resolve_route(&request.method, &request.path);

    let result = match route {
        Route::CreateEvent => {
            create_event(&request.body, store, queue, clock).map(|body| json_response(201, body))
        }
        Route::ListEvents => list_events(store).map(|body| json_response(200, body)),
        Route::NotFound => {
            tracing::info!(
                component = "api_handler",
                method = %request.method,
                path = %request.path,
                "no route matched"
            );
            Ok(error_response(404, NOT_FOUND_MESSAGE))
        }
    };

    result
        .unwrap_or_else(|error| {
            tracing::error!(
                component = "api_handler",
                route = ?route,
                error = %error,
                "request failed"
            );
            error_response(500, &error.to_string())
        })
        .with_cors()
}

/// Stores a pending event record, then enqueues it for the finalizer.
pub fn create_event(
    body: &Value,
    store: &impl RecordStore,
    queue: &impl EventQueue,
    clock: &dyn Clock,
) -> Result<EventCreatedResponse, HandlerError> {
    let request = CreateEventRequest::from_body(body);
    let event_id = generate_id(IdPrefix::Event, clock);
    let record = Record::pending_event(
        event_id.clone(),
        request.event_type,
        request.data,
        clock.now_secs(),
    );

    store.put_record(&record).map_err(HandlerError::Store)?;

    let message = serde_json::to_string(&QueuedEvent::from(&record))?;
    queue.send_message(&message).map_err(HandlerError::Queue)?;

    tracing::info!(
        component = "api_handler",
        event_id = %event_id,
        event_type = %record.record_type,
        "event created"
    );

    Ok(EventCreatedResponse {
        id: event_id,
        message: EVENT_CREATED_MESSAGE.to_string(),
        timestamp: iso_timestamp(clock.now()),
    })
}

pub fn list_events(store: &impl RecordStore) -> Result<EventListResponse, HandlerError> {
    let events = store
        .scan_records(LIST_EVENTS_LIMIT)
        .map_err(HandlerError::Store)?;
    Ok(EventListResponse::from(events))
}
