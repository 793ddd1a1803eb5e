//! Routes widget actions onto the UI queue and workflow results into dialogs.

use crossbeam_channel::{Sender, TrySendError};
use release_core::{ActionOutcome, WorkflowError};

use super::events::{UiError, UiEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Error(UiError),
    Info(String),
    RelocatePrompt,
}

pub fn dispatch_ui_event(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    let event_name = event.name();
    match ui_tx.try_send(event) {
        Ok(()) => tracing::debug!(event = event_name, "queued ui event"),
        Err(TrySendError::Full(_)) => {
            tracing::warn!(event = event_name, "ui event queue is full; dropping event");
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::warn!(event = event_name, "ui event queue disconnected");
        }
    }
}

/// Dialogs to queue for an action's result, in display order.
pub fn dialogs_for(result: Result<ActionOutcome, WorkflowError>) -> Vec<Dialog> {
    match result {
        Ok(outcome) => {
            let mut dialogs: Vec<Dialog> = outcome.reports.into_iter().map(Dialog::Info).collect();
            if outcome.prompt_relocate {
                dialogs.push(Dialog::RelocatePrompt);
            }
            dialogs
        }
        Err(err) => {
            tracing::warn!(error = %err, "workflow action failed");
            vec![Dialog::Error(UiError::from_workflow(&err))]
        }
    }
}
