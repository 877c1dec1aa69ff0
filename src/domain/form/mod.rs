//! Form module - authored survey definitions.
//!
//! - `question` - question types and their conditional-logic rules
//! - `condition` - the `op:value` trigger condition language
//! - `settings` - respondent experience toggles
//! - `aggregate` - the `Form` aggregate

mod aggregate;
mod condition;
mod errors;
mod question;
mod settings;

pub use aggregate::{Form, FormPatch, NewForm, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};
pub use condition::{ConditionOperand, TriggerCondition, UnknownOperatorPolicy};
pub use errors::FormError;
pub use question::{ConditionAction, ConditionalLogic, Question, QuestionType};
pub use settings::{FormSettings, DEFAULT_THANK_YOU_MESSAGE};
