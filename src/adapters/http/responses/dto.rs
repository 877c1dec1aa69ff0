//! HTTP DTOs for response endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::response::{AnswerRecord, ResponseRecord};

/// Client-reported submission metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionMetadataInput {
    pub user_agent: Option<String>,
    pub time_spent_seconds: Option<u64>,
}

/// Request body for a direct submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    #[serde(default)]
    pub respondent_name: Option<String>,
    #[serde(default)]
    pub respondent_email: Option<String>,
    #[serde(default)]
    pub metadata: SubmissionMetadataInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseResponse {
    pub message: String,
    pub response_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseListResponse {
    pub responses: Vec<ResponseRecord>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_reads_answers_and_metadata() {
        let req: SubmitResponseRequest = serde_json::from_str(
            r#"{
                "sessionId": "s-1",
                "answers": [{"questionId": "q1", "answer": 4}],
                "metadata": {"timeSpentSeconds": 42}
            }"#,
        )
        .unwrap();
        assert_eq!(req.answers.len(), 1);
        assert_eq!(req.answers[0].question_text, "");
        assert_eq!(req.metadata.time_spent_seconds, Some(42));
        assert!(req.respondent_name.is_none());
    }
}
