//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::flow::{
    AdaptiveNextHandler, AdvanceFlowCommand, AdvanceFlowHandler, AdvanceFlowResult, FlowSnapshot,
    GetFlowStateHandler, GetFlowStateQuery, GoBackCommand, GoBackHandler, RecordAnswerCommand,
    RecordAnswerHandler, SetContactCommand, SetContactHandler, StartFlowCommand, StartFlowHandler,
    SubmitFlowCommand, SubmitFlowHandler,
};
pub use handlers::form::{
    CreateFormCommand, CreateFormHandler, DeleteFormCommand, DeleteFormHandler,
    GenerateFormCommand, GenerateFormHandler, GetFormHandler, GetFormQuery, ListFormsHandler,
    ListFormsQuery, TogglePublishCommand, TogglePublishHandler, UpdateFormCommand,
    UpdateFormHandler,
};
pub use handlers::insight::{
    AssistantChatCommand, AssistantChatHandler, GenerateInsightsCommand, GenerateInsightsHandler,
    GenerateSummaryCommand, GenerateSummaryHandler, GetInsightsHandler, GetInsightsQuery,
};
pub use handlers::response::{
    ListResponsesHandler, ListResponsesQuery, ResponseList, SubmitResponseCommand,
    SubmitResponseHandler,
};
