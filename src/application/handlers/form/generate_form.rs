//! GenerateFormHandler - Drafts a form from a research goal with the LLM.

use std::sync::Arc;

use crate::domain::form::{Form, FormError, FormSettings, NewForm};
use crate::domain::foundation::{FormId, UserId};
use crate::ports::{FormGenerator, FormRepository};

/// Maximum accepted goal length.
pub const MAX_GOAL_LENGTH: usize = 2000;

/// Command to generate and save a form.
#[derive(Debug, Clone)]
pub struct GenerateFormCommand {
    pub owner: UserId,
    pub goal: String,
}

/// Handler for AI form generation.
///
/// The generated form is saved unpublished with adaptive flow switched on.
pub struct GenerateFormHandler {
    generator: Arc<dyn FormGenerator>,
    repository: Arc<dyn FormRepository>,
}

impl GenerateFormHandler {
    pub fn new(generator: Arc<dyn FormGenerator>, repository: Arc<dyn FormRepository>) -> Self {
        Self {
            generator,
            repository,
        }
    }

    pub async fn handle(&self, cmd: GenerateFormCommand) -> Result<Form, FormError> {
        let goal = cmd.goal.trim();
        if goal.is_empty() {
            return Err(FormError::validation("goal", "Goal is required"));
        }
        if goal.chars().count() > MAX_GOAL_LENGTH {
            return Err(FormError::validation(
                "goal",
                format!("Goal must be at most {} characters", MAX_GOAL_LENGTH),
            ));
        }

        let generated = self.generator.generate_form(goal).await.map_err(|e| {
            tracing::warn!(error = %e, "form generation failed");
            FormError::generation_failed(e.to_string())
        })?;

        let form = Form::create(
            FormId::new(),
            cmd.owner,
            NewForm {
                title: generated.title,
                description: generated.description,
                goal: Some(goal.to_string()),
                questions: generated.questions,
                settings: FormSettings {
                    adaptive_flow: true,
                    ..FormSettings::default()
                },
            },
        )
        .map_err(|e| match e {
            FormError::ValidationFailed { message, .. } => {
                FormError::generation_failed(format!("generated form is invalid: {}", message))
            }
            other => other,
        })?;

        self.repository.save(&form).await?;
        tracing::info!(
            form_id = %form.id(),
            questions = form.questions().len(),
            "generated form saved"
        );

        Ok(form)
    }
}
