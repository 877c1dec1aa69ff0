//! Respondent flow handlers.
//!
//! Each live flow sits in the `FlowSessionStore` behind its own lock; every
//! handler here takes that lock for the whole operation, including the
//! follow-up call made while advancing.

mod adaptive_next;
mod advance_flow;
mod get_flow_state;
mod go_back;
mod record_answer;
mod set_contact;
mod snapshot;
mod start_flow;
mod submit_flow;

pub use adaptive_next::AdaptiveNextHandler;
pub use advance_flow::{AdvanceFlowCommand, AdvanceFlowHandler, AdvanceFlowResult};
pub use get_flow_state::{GetFlowStateHandler, GetFlowStateQuery};
pub use go_back::{GoBackCommand, GoBackHandler};
pub use record_answer::{RecordAnswerCommand, RecordAnswerHandler};
pub use set_contact::{SetContactCommand, SetContactHandler};
pub use snapshot::FlowSnapshot;
pub use start_flow::{StartFlowCommand, StartFlowHandler};
pub use submit_flow::{SubmitFlowCommand, SubmitFlowHandler};

use crate::domain::flow::FlowError;
use crate::domain::foundation::FlowSessionId;
use crate::ports::{FlowSessionStore, SharedFlowSession};

async fn load_session(
    store: &dyn FlowSessionStore,
    id: &FlowSessionId,
) -> Result<SharedFlowSession, FlowError> {
    store
        .get(id)
        .await
        .ok_or(FlowError::SessionNotFound(*id))
}
