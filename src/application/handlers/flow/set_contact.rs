//! SetContactHandler - Stores the respondent's name and email.

use std::sync::Arc;

use crate::domain::flow::{FlowError, RespondentContact};
use crate::domain::foundation::FlowSessionId;
use crate::ports::FlowSessionStore;

use super::{load_session, FlowSnapshot};

#[derive(Debug, Clone)]
pub struct SetContactCommand {
    pub session_id: FlowSessionId,
    pub name: String,
    pub email: String,
}

pub struct SetContactHandler {
    sessions: Arc<dyn FlowSessionStore>,
}

impl SetContactHandler {
    pub fn new(sessions: Arc<dyn FlowSessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: SetContactCommand) -> Result<FlowSnapshot, FlowError> {
        let shared = load_session(self.sessions.as_ref(), &cmd.session_id).await?;
        let mut session = shared.lock().await;
        session.set_contact(RespondentContact::new(cmd.name, cmd.email));
        Ok(FlowSnapshot::capture(&session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::flow::test_support::{published_form, stores};
    use crate::application::handlers::flow::{StartFlowCommand, StartFlowHandler};
    use crate::domain::flow::VisibilityPolicy;

    #[tokio::test]
    async fn complete_contact_unlocks_intro() {
        let (store, sessions) = stores();
        let form = published_form(&store).await;
        let started = StartFlowHandler::new(store, sessions.clone(), VisibilityPolicy::default())
            .handle(StartFlowCommand {
                form_id: *form.id(),
                ..Default::default()
            })
            .await
            .unwrap();
        let handler = SetContactHandler::new(sessions);

        let snapshot = handler
            .handle(SetContactCommand {
                session_id: started.session_id,
                name: "  Ada ".to_string(),
                email: "ada@example.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(snapshot.contact.name, "Ada");
        assert!(snapshot.can_proceed);
    }
}
