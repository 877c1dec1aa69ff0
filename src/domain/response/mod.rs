//! Response module - submitted answer sets.

mod record;

pub use record::{AnswerRecord, ResponseMetadata, ResponseRecord};
