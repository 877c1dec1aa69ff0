//! Per-form respondent experience settings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_THANK_YOU_MESSAGE: &str = "Thank you for your response! 🎉";

/// Maximum length of the thank-you message.
pub const MAX_THANK_YOU_LENGTH: usize = 500;

fn default_true() -> bool {
    true
}

fn default_thank_you() -> String {
    DEFAULT_THANK_YOU_MESSAGE.to_string()
}

/// Settings a form owner can toggle. Every field is optional on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    #[serde(default = "default_true")]
    pub allow_anonymous: bool,
    #[serde(default)]
    pub collect_email: bool,
    #[serde(default = "default_true")]
    pub show_progress_bar: bool,
    /// Request AI follow-ups after rating answers.
    #[serde(default = "default_true")]
    pub adaptive_flow: bool,
    #[serde(default = "default_thank_you")]
    pub thank_you_message: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            allow_anonymous: true,
            collect_email: false,
            show_progress_bar: true,
            adaptive_flow: true,
            thank_you_message: default_thank_you(),
        }
    }
}
