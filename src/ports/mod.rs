//! Ports - interfaces between the application core and the outside world.
//!
//! # Repositories
//!
//! - `FormRepository`, `ResponseRepository`, `InsightRepository`
//! - `FlowSessionStore` - live respondent flows
//!
//! # External services
//!
//! - `SessionValidator` - bearer token validation
//! - `AIProvider` - raw chat completions
//! - `FormGenerator`, `FollowUpGenerator`, `InsightGenerator`, `DataAssistant`
//!   - prompt-level AI features built on a provider

mod ai_provider;
mod data_assistant;
mod flow_session_store;
mod follow_up_generator;
mod form_generator;
mod form_repository;
mod insight_generator;
mod insight_repository;
mod response_repository;
mod session_validator;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use data_assistant::{AssistantContext, DataAssistant};
pub use flow_session_store::{FlowSessionStore, SharedFlowSession};
pub use follow_up_generator::{FollowUpDecision, FollowUpGenerator};
pub use form_generator::{FormGenerator, GeneratedForm};
pub use form_repository::FormRepository;
pub use insight_generator::InsightGenerator;
pub use insight_repository::InsightRepository;
pub use response_repository::ResponseRepository;
pub use session_validator::SessionValidator;
