use event_pipeline_core::clock::Clock;
use event_pipeline_core::contract::{
    Record, WorkflowRequest, WorkflowResponse, RECORD_TYPE_WORKFLOW,
};
use event_pipeline_core::ids::{generate_id, IdPrefix};
use event_pipeline_core::workflow::{complete_steps, summarize};
use serde_json::Value;

use crate::adapters::record_store::RecordStore;
use crate::error::HandlerError;
use crate::handlers::response::{error_response, json_response, LambdaResponse};

pub fn handle_workflow_event(
    event: Value,
    store: &impl RecordStore,
    clock: &dyn Clock,
) -> LambdaResponse {
    match run_workflow(event, store, clock) {
        Ok(response) => json_response(200, response),
        Err(error) => {
            tracing::error!(component = "workflow_orchestrator", error = %error, "workflow failed");
            error_response(500, &error.to_string())
        }
    }
}

pub fn run_workflow(
    event: Value,
    store: &impl RecordStore,
    clock: &dyn Clock,
) -> Result<WorkflowResponse, HandlerError> {
    let request: WorkflowRequest = serde_json::from_value(event)?;
    let workflow_id = request
        .workflow_id
        .clone()
        .unwrap_or_else(|| generate_id(IdPrefix::Workflow, clock));

    let steps = complete_steps(&request.steps, clock.now_secs());
    let summary = summarize(steps.clone());
    let record = Record::new(
        workflow_id.clone(),
        RECORD_TYPE_WORKFLOW,
        serde_json::to_value(&summary)?,
        clock.now_secs(),
    );
    store.put_record(&record).map_err(HandlerError::Store)?;

    tracing::info!(
        component = "workflow_orchestrator",
        workflow_id = %workflow_id,
        steps = steps.len(),
        "workflow completed"
    );

    Ok(WorkflowResponse {
        workflow_id,
        steps,
        status: summary.status,
    })
}
