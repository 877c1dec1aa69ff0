//! StartFlowHandler - Opens a respondent flow on a published form.

use std::sync::Arc;

use crate::domain::flow::{FlowError, FlowSession, FlowStart, RespondentContact, VisibilityPolicy};
use crate::domain::form::FormError;
use crate::domain::foundation::{FlowSessionId, FormId};
use crate::ports::{FlowSessionStore, FormRepository};

use super::FlowSnapshot;

#[derive(Debug, Clone, Default)]
pub struct StartFlowCommand {
    pub form_id: FormId,
    pub contact: Option<RespondentContact>,
    pub client_session_id: Option<String>,
    pub user_agent: Option<String>,
}

/// Handler for starting flows. Missing or unpublished forms never get a
/// session.
pub struct StartFlowHandler {
    forms: Arc<dyn FormRepository>,
    sessions: Arc<dyn FlowSessionStore>,
    policy: VisibilityPolicy,
}

impl StartFlowHandler {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        sessions: Arc<dyn FlowSessionStore>,
        policy: VisibilityPolicy,
    ) -> Self {
        Self {
            forms,
            sessions,
            policy,
        }
    }

    pub async fn handle(&self, cmd: StartFlowCommand) -> Result<FlowSnapshot, FlowError> {
        let form = self
            .forms
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or_else(|| FormError::not_found(cmd.form_id))?;

        let session = FlowSession::start(
            FlowSessionId::new(),
            &form,
            self.policy,
            FlowStart {
                contact: cmd.contact,
                client_session_id: cmd.client_session_id,
                user_agent: cmd.user_agent,
            },
        )?;
        let snapshot = FlowSnapshot::capture(&session);
        self.sessions.insert(session).await;
        tracing::debug!(session_id = %snapshot.session_id, form_id = %cmd.form_id, "flow started");

        Ok(snapshot)
    }
}
