//! Form generator port: turns a research goal into a draft form.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::form::Question;

use super::AIError;

/// Draft produced by the generator, not yet validated or saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedForm {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[async_trait]
pub trait FormGenerator: Send + Sync {
    /// Design a form for `goal`.
    ///
    /// # Errors
    ///
    /// - `AIError::Parse` if the model output is not a usable form
    /// - any provider error from the underlying call
    async fn generate_form(&self, goal: &str) -> Result<GeneratedForm, AIError>;
}
