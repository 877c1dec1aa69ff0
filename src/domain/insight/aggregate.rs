//! AI-generated analysis of a form's responses.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::{FormId, Timestamp};

use super::InsightError;

/// Overall tone of the responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Parses a label, mapping anything unrecognized to `Neutral`.
    pub fn from_lossy(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl<'de> Deserialize<'de> for SentimentLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::from_lossy).unwrap_or_default())
    }
}

/// Accepts a number or a numeric string; anything else reads as 0.
fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    let score = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(score)
}

/// Per-question takeaway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionInsight {
    pub question_id: String,
    pub question_text: String,
    pub top_answers: Vec<String>,
    pub insight: String,
}

/// Structured analysis as returned by the insight generator.
///
/// Every field is optional on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsightPayload {
    #[serde(deserialize_with = "lenient_score")]
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub key_themes: Vec<String>,
    pub pain_points: Vec<String>,
    pub positive_highlights: Vec<String>,
    pub actionable_recommendations: Vec<String>,
    pub executive_summary: Option<String>,
    pub question_insights: Vec<QuestionInsight>,
}

impl InsightPayload {
    /// Parses generator output that has already had code fences removed.
    ///
    /// # Errors
    ///
    /// - `MalformedPayload` if the text is not a JSON object
    pub fn parse(text: &str) -> Result<Self, InsightError> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| InsightError::malformed(format!("not JSON: {}", e)))?;
        if !value.is_object() {
            return Err(InsightError::malformed("expected a JSON object"));
        }
        serde_json::from_value(value).map_err(|e| InsightError::malformed(e.to_string()))
    }

    /// Clamps the score into [-1, 1] and drops blank list entries.
    pub fn normalized(mut self) -> Self {
        self.sentiment_score = if self.sentiment_score.is_finite() {
            self.sentiment_score.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        for list in [
            &mut self.key_themes,
            &mut self.pain_points,
            &mut self.positive_highlights,
            &mut self.actionable_recommendations,
        ] {
            list.retain(|item| !item.trim().is_empty());
        }
        self.executive_summary = self
            .executive_summary
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }
}

/// Stored insight; at most one per form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub form_id: FormId,
    pub total_responses: u64,
    #[serde(flatten)]
    pub payload: InsightPayload,
    pub generated_at: Timestamp,
}

impl Insight {
    pub fn new(form_id: FormId, total_responses: u64, payload: InsightPayload) -> Self {
        Self {
            form_id,
            total_responses,
            payload: payload.normalized(),
            generated_at: Timestamp::now(),
        }
    }

    /// Replaces the executive summary with a freshly written one.
    pub fn set_executive_summary(&mut self, summary: impl Into<String>) {
        let summary = summary.into();
        let trimmed = summary.trim();
        self.payload.executive_summary = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }
}
