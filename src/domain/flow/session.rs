//! The respondent flow evaluator.
//!
//! A `FlowSession` walks one respondent through a published form: an intro
//! step collecting contact details, then the effective question sequence
//! (the form's questions with any follow-ups spliced in), then a terminal
//! state from which the answers can be submitted.
//!
//! The session is a pure state machine. Fetching a follow-up question is
//! the caller's job: it asks `follow_up_request()` whether one is wanted,
//! calls the generator however it likes (with a timeout), and passes the
//! result, or `None`, to `advance()`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::form::{Form, FormError, FormSettings, Question, QuestionType};
use crate::domain::foundation::{FlowSessionId, FormId, QuestionId, Timestamp};
use crate::domain::response::AnswerRecord;

use super::{compute_visibility, AnswerMap, AnswerValue, FlowError, VisibilityPolicy};

/// Where the respondent currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "questionId", rename_all = "camelCase")]
pub enum FlowPosition {
    /// Contact step before the first question.
    Intro,
    /// Showing the question with this id.
    Question(QuestionId),
    /// Past the last visible question; ready to submit.
    Complete,
}

/// Respondent contact details gathered on the intro step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondentContact {
    pub name: String,
    pub email: String,
}

impl RespondentContact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
        }
    }

    /// Both name and email are present.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}

/// One `{questionId, answer}` pair handed to a follow-up generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GivenAnswer {
    pub question_id: QuestionId,
    pub answer: AnswerValue,
}

/// Everything a follow-up generator gets to see.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowUpRequest {
    pub questions: Vec<Question>,
    /// Answers so far, in effective sequence order.
    pub answers: Vec<GivenAnswer>,
    pub current_question_id: QuestionId,
}

/// Result of a successful `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceOutcome {
    pub position: FlowPosition,
    /// Id of the follow-up spliced in on this step, if any.
    pub follow_up_added: Option<QuestionId>,
}

/// Flattened answers plus respondent details, ready for the response store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmissionDraft {
    pub session_id: Option<String>,
    pub answers: Vec<AnswerRecord>,
    pub respondent_name: Option<String>,
    pub respondent_email: Option<String>,
    pub user_agent: Option<String>,
    pub time_spent_seconds: Option<u64>,
}

/// Optional inputs when starting a session.
#[derive(Debug, Clone, Default)]
pub struct FlowStart {
    pub contact: Option<RespondentContact>,
    pub client_session_id: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
struct FollowUp {
    anchor: QuestionId,
    question: Question,
}

/// One respondent's traversal of a form.
#[derive(Debug, Clone)]
pub struct FlowSession {
    id: FlowSessionId,
    form_id: FormId,
    form_title: String,
    form_description: Option<String>,
    settings: FormSettings,
    policy: VisibilityPolicy,
    base: Vec<Question>,
    follow_ups: Vec<FollowUp>,
    answers: AnswerMap,
    position: FlowPosition,
    contact: RespondentContact,
    client_session_id: Option<String>,
    user_agent: Option<String>,
    started_at: Timestamp,
    last_active: Timestamp,
}

impl FlowSession {
    /// Starts a flow on the intro step.
    ///
    /// # Errors
    ///
    /// - `NotAcceptingResponses` if the form is unpublished
    pub fn start(
        id: FlowSessionId,
        form: &Form,
        policy: VisibilityPolicy,
        start: FlowStart,
    ) -> Result<Self, FormError> {
        form.ensure_accepting_responses()?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            form_id: *form.id(),
            form_title: form.title().to_string(),
            form_description: form.description().map(str::to_string),
            settings: form.settings().clone(),
            policy,
            base: form.questions().to_vec(),
            follow_ups: Vec::new(),
            answers: AnswerMap::new(),
            position: FlowPosition::Intro,
            contact: start.contact.unwrap_or_default(),
            client_session_id: start.client_session_id,
            user_agent: start.user_agent,
            started_at: now,
            last_active: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &FlowSessionId {
        &self.id
    }

    pub fn form_id(&self) -> &FormId {
        &self.form_id
    }

    pub fn form_title(&self) -> &str {
        &self.form_title
    }

    pub fn form_description(&self) -> Option<&str> {
        self.form_description.as_deref()
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn contact(&self) -> &RespondentContact {
        &self.contact
    }

    pub fn position(&self) -> &FlowPosition {
        &self.position
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn last_active(&self) -> &Timestamp {
        &self.last_active
    }

    /// Base questions with follow-ups spliced in after their anchors.
    ///
    /// A newer follow-up for the same anchor sits closer to it.
    pub fn effective_questions(&self) -> Vec<&Question> {
        let mut sequence = Vec::with_capacity(self.base.len() + self.follow_ups.len());
        for question in &self.base {
            self.push_with_follow_ups(question, &mut sequence);
        }
        sequence
    }

    fn push_with_follow_ups<'a>(&'a self, question: &'a Question, out: &mut Vec<&'a Question>) {
        out.push(question);
        for follow_up in self.follow_ups.iter().rev() {
            if follow_up.anchor == question.id {
                self.push_with_follow_ups(&follow_up.question, out);
            }
        }
    }

    /// Ids of questions currently hidden by their trigger conditions.
    pub fn suppressed(&self) -> HashSet<QuestionId> {
        compute_visibility(self.effective_questions(), &self.answers, self.policy)
    }

    pub fn current_question(&self) -> Option<&Question> {
        match &self.position {
            FlowPosition::Question(id) => self.find_question(id),
            _ => None,
        }
    }

    fn find_question(&self, id: &QuestionId) -> Option<&Question> {
        self.effective_questions().into_iter().find(|q| &q.id == id)
    }

    /// Position as an index: -1 on intro, the sequence length when complete.
    pub fn position_index(&self) -> i64 {
        let sequence = self.effective_questions();
        match &self.position {
            FlowPosition::Intro => -1,
            FlowPosition::Question(id) => sequence
                .iter()
                .position(|q| &q.id == id)
                .map(|i| i as i64)
                .unwrap_or(-1),
            FlowPosition::Complete => sequence.len() as i64,
        }
    }

    /// `(position + 1) / (len + 1)`, counting the intro step.
    ///
    /// May move backwards when a follow-up grows the sequence.
    pub fn progress_fraction(&self) -> f64 {
        let len = self.effective_questions().len() as f64;
        let position = self.position_index() as f64;
        ((position + 1.0) / (len + 1.0)).clamp(0.0, 1.0)
    }

    /// Whether `advance` would pass the gate from here.
    pub fn can_proceed(&self) -> bool {
        match &self.position {
            FlowPosition::Intro => self.contact.is_complete(),
            FlowPosition::Question(id) => match self.find_question(id) {
                Some(q) => !q.required || self.answers.is_answered(id),
                None => false,
            },
            FlowPosition::Complete => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_contact(&mut self, contact: RespondentContact) {
        self.contact = contact;
        self.touch();
    }

    /// Stores an answer; last write wins.
    ///
    /// # Errors
    ///
    /// - `UnknownQuestion` if the id is not in the effective sequence
    /// - `QuestionSuppressed` if the question is currently hidden
    pub fn record_answer(&mut self, id: QuestionId, value: AnswerValue) -> Result<(), FlowError> {
        if self.find_question(&id).is_none() {
            return Err(FlowError::UnknownQuestion(id));
        }
        if self.suppressed().contains(&id) {
            return Err(FlowError::QuestionSuppressed(id));
        }
        self.answers.insert(id, value);
        self.touch();
        Ok(())
    }

    /// Describes the follow-up to ask for before advancing, if one is wanted.
    ///
    /// Only answered rating questions on adaptive forms ask for one.
    pub fn follow_up_request(&self) -> Option<FollowUpRequest> {
        if !self.follow_up_eligible() {
            return None;
        }
        let FlowPosition::Question(current) = &self.position else {
            return None;
        };

        let sequence = self.effective_questions();
        let answers = sequence
            .iter()
            .filter_map(|q| {
                self.answers.answered(&q.id).map(|a| GivenAnswer {
                    question_id: q.id.clone(),
                    answer: a.clone(),
                })
            })
            .collect();

        Some(FollowUpRequest {
            questions: sequence.into_iter().cloned().collect(),
            answers,
            current_question_id: current.clone(),
        })
    }

    fn follow_up_eligible(&self) -> bool {
        self.settings.adaptive_flow
            && self.current_question().is_some_and(|q| {
                q.question_type == QuestionType::Rating && self.answers.is_answered(&q.id)
            })
    }

    /// Moves to the next visible question, splicing in `follow_up` first.
    ///
    /// The follow-up is ignored unless a follow-up was wanted for this step
    /// and its id is new to the sequence.
    ///
    /// # Errors
    ///
    /// - `ContactIncomplete` on the intro step without name and email
    /// - `AnswerRequired` if the current question is required and unanswered
    /// - `AlreadyComplete` past the last question
    pub fn advance(&mut self, follow_up: Option<Question>) -> Result<AdvanceOutcome, FlowError> {
        let next = match &self.position {
            FlowPosition::Complete => return Err(FlowError::AlreadyComplete),
            FlowPosition::Intro => {
                if !self.contact.is_complete() {
                    return Err(FlowError::ContactIncomplete);
                }
                self.next_visible_after(None)
            }
            FlowPosition::Question(current) => {
                let current = current.clone();
                if !self.can_proceed() {
                    return Err(FlowError::AnswerRequired(current));
                }
                let added = follow_up.and_then(|fq| self.splice_follow_up(&current, fq));
                let index = self
                    .effective_questions()
                    .iter()
                    .position(|q| q.id == current);
                let position = self.next_visible_after(index);
                self.position = position.clone();
                self.touch();
                return Ok(AdvanceOutcome {
                    position,
                    follow_up_added: added,
                });
            }
        };

        self.position = next.clone();
        self.touch();
        Ok(AdvanceOutcome {
            position: next,
            follow_up_added: None,
        })
    }

    fn splice_follow_up(&mut self, anchor: &QuestionId, question: Question) -> Option<QuestionId> {
        if !self.follow_up_eligible() || question.validate().is_err() {
            return None;
        }
        if self.find_question(&question.id).is_some() {
            return None;
        }
        let id = question.id.clone();
        self.follow_ups.push(FollowUp {
            anchor: anchor.clone(),
            question,
        });
        Some(id)
    }

    fn next_visible_after(&self, index: Option<usize>) -> FlowPosition {
        let sequence = self.effective_questions();
        let suppressed = compute_visibility(sequence.iter().copied(), &self.answers, self.policy);
        let start = index.map_or(0, |i| i + 1);

        sequence
            .iter()
            .skip(start)
            .find(|q| !suppressed.contains(&q.id))
            .map(|q| FlowPosition::Question(q.id.clone()))
            .unwrap_or(FlowPosition::Complete)
    }

    /// Steps back to the previous visible question, or to the intro.
    ///
    /// Answers are kept.
    pub fn back(&mut self) -> &FlowPosition {
        let sequence = self.effective_questions();
        let suppressed = compute_visibility(sequence.iter().copied(), &self.answers, self.policy);

        let end = match &self.position {
            FlowPosition::Intro => None,
            FlowPosition::Question(id) => sequence.iter().position(|q| &q.id == id),
            FlowPosition::Complete => Some(sequence.len()),
        };

        let target = end
            .and_then(|end| {
                sequence[..end]
                    .iter()
                    .rev()
                    .find(|q| !suppressed.contains(&q.id))
            })
            .map(|q| FlowPosition::Question(q.id.clone()))
            .unwrap_or(FlowPosition::Intro);

        self.position = target;
        self.touch();
        &self.position
    }

    /// Flattens the answers for the response store.
    ///
    /// Answers follow the effective sequence; questions hidden at this point
    /// and empty answers are left out.
    ///
    /// # Errors
    ///
    /// - `NotComplete` unless the flow is in its terminal state
    /// - `AnswerRequired` if an answer edited via `back` revealed a required
    ///   question that was never answered
    pub fn to_submission(&self) -> Result<SubmissionDraft, FlowError> {
        if self.position != FlowPosition::Complete {
            return Err(FlowError::NotComplete);
        }

        let sequence = self.effective_questions();
        let suppressed = compute_visibility(sequence.iter().copied(), &self.answers, self.policy);

        let mut answers = Vec::new();
        for question in sequence.iter().filter(|q| !suppressed.contains(&q.id)) {
            match self.answers.answered(&question.id) {
                Some(answer) => answers.push(AnswerRecord {
                    question_id: question.id.clone(),
                    question_text: question.question.clone(),
                    answer: answer.clone(),
                    question_type: question.question_type,
                }),
                None if question.required => {
                    return Err(FlowError::AnswerRequired(question.id.clone()))
                }
                None => {}
            }
        }

        let elapsed = Timestamp::now().duration_since(&self.started_at);
        Ok(SubmissionDraft {
            session_id: self.client_session_id.clone(),
            answers,
            respondent_name: Some(self.contact.name.clone()),
            respondent_email: Some(self.contact.email.clone()),
            user_agent: self.user_agent.clone(),
            time_spent_seconds: u64::try_from(elapsed.num_seconds()).ok(),
        })
    }

    pub fn touch(&mut self) {
        self.last_active = Timestamp::now();
    }

    /// True when the session has been untouched for longer than `ttl_secs`.
    pub fn is_idle(&self, ttl_secs: u64, now: &Timestamp) -> bool {
        self.last_active.plus_secs(ttl_secs).is_before(now)
    }
}
