//! HTTP DTOs for AI endpoints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::flow::{AnswerValue, FollowUpRequest, GivenAnswer};
use crate::domain::form::Question;
use crate::domain::foundation::QuestionId;
use crate::domain::insight::Insight;

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateFormRequest {
    #[serde(default)]
    pub goal: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightEnvelope {
    pub insight: Insight,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub insight: Insight,
}

/// Answers as either `[{questionId, answer}]` or `{questionId: answer}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnswersInput {
    List(Vec<GivenAnswer>),
    Map(HashMap<String, AnswerValue>),
}

impl Default for AnswersInput {
    fn default() -> Self {
        AnswersInput::List(Vec::new())
    }
}

/// Body of the stateless follow-up helper.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveNextRequest {
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub answers: AnswersInput,
    #[serde(default)]
    pub current_question_id: QuestionId,
}

impl AdaptiveNextRequest {
    /// Map-shaped answers are ordered by the question list; unknown ids go last.
    pub fn into_follow_up_request(self) -> FollowUpRequest {
        let answers = match self.answers {
            AnswersInput::List(list) => list,
            AnswersInput::Map(mut map) => {
                let mut ordered: Vec<GivenAnswer> = self
                    .questions
                    .iter()
                    .filter_map(|q| {
                        map.remove(q.id.as_str()).map(|answer| GivenAnswer {
                            question_id: q.id.clone(),
                            answer,
                        })
                    })
                    .collect();
                let mut rest: Vec<(String, AnswerValue)> = map.into_iter().collect();
                rest.sort_by(|a, b| a.0.cmp(&b.0));
                ordered.extend(rest.into_iter().map(|(id, answer)| GivenAnswer {
                    question_id: QuestionId::new(id),
                    answer,
                }));
                ordered
            }
        };

        FollowUpRequest {
            questions: self.questions,
            answers,
            current_question_id: self.current_question_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_answers_follow_question_order() {
        let req: AdaptiveNextRequest = serde_json::from_str(
            r#"{
                "questions": [
                    {"id": "q1", "type": "rating", "question": "Rate"},
                    {"id": "q2", "type": "text", "question": "Why"}
                ],
                "answers": {"q2": "slow", "q1": 2, "extra": true},
                "currentQuestionId": "q1"
            }"#,
        )
        .unwrap();

        let request = req.into_follow_up_request();
        let ids: Vec<&str> = request
            .answers
            .iter()
            .map(|a| a.question_id.as_str())
            .collect();
        assert_eq!(ids, vec!["q1", "q2", "extra"]);
        assert_eq!(request.current_question_id.as_str(), "q1");
    }

    #[test]
    fn list_answers_are_kept_as_given() {
        let req: AdaptiveNextRequest = serde_json::from_str(
            r#"{"questions": [], "answers": [{"questionId": "q9", "answer": "x"}]}"#,
        )
        .unwrap();
        let request = req.into_follow_up_request();
        assert_eq!(request.answers[0].question_id.as_str(), "q9");
        assert!(request.current_question_id.is_blank());
    }
}
