//! Form command and query handlers.

mod create_form;
mod delete_form;
mod generate_form;
mod get_form;
mod list_forms;
mod toggle_publish;
mod update_form;

pub use create_form::{CreateFormCommand, CreateFormHandler};
pub use delete_form::{DeleteFormCommand, DeleteFormHandler};
pub use generate_form::{GenerateFormCommand, GenerateFormHandler, MAX_GOAL_LENGTH};
pub use get_form::{GetFormHandler, GetFormQuery};
pub use list_forms::{ListFormsHandler, ListFormsQuery};
pub use toggle_publish::{TogglePublishCommand, TogglePublishHandler};
pub use update_form::{UpdateFormCommand, UpdateFormHandler};
