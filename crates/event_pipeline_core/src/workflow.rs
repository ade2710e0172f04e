use crate::contract::{CompletionStatus, StepResult, WorkflowStep, WorkflowSummary};

/// Stamps every step as completed at `timestamp`, preserving input order.
/// Step payloads are carried by the request but never inspected.
pub fn complete_steps(steps: &[WorkflowStep], timestamp: i64) -> Vec<StepResult> {
    steps
        .iter()
        .map(|step| StepResult {
            step: step.name.clone(),
            status: CompletionStatus::Completed,
            timestamp,
        })
        .collect()
}

pub fn summarize(steps: Vec<StepResult>) -> WorkflowSummary {
    WorkflowSummary {
        steps,
        status: CompletionStatus::Completed,
    }
}
