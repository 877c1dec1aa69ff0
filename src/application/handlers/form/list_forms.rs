//! ListFormsHandler - Query handler for an owner's forms.

use std::sync::Arc;

use crate::domain::form::{Form, FormError};
use crate::domain::foundation::UserId;
use crate::ports::FormRepository;

/// Query to list the forms a user owns.
#[derive(Debug, Clone)]
pub struct ListFormsQuery {
    pub owner: UserId,
}

/// Handler for listing forms, newest first.
pub struct ListFormsHandler {
    repository: Arc<dyn FormRepository>,
}

impl ListFormsHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListFormsQuery) -> Result<Vec<Form>, FormError> {
        Ok(self.repository.find_by_owner(&query.owner).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::form::NewForm;
    use crate::domain::foundation::FormId;

    #[tokio::test]
    async fn lists_only_own_forms() {
        let store = Arc::new(InMemoryStore::new());
        let alice = UserId::new("alice").unwrap();
        let bob = UserId::new("bob").unwrap();
        for (owner, title) in [(&alice, "A1"), (&alice, "A2"), (&bob, "B1")] {
            let form = Form::create(
                FormId::new(),
                owner.clone(),
                NewForm {
                    title: title.to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
            store.save(&form).await.unwrap();
        }

        let handler = ListFormsHandler::new(store);
        let forms = handler.handle(ListFormsQuery { owner: alice }).await.unwrap();

        assert_eq!(forms.len(), 2);
        assert!(forms.iter().all(|f| f.title().starts_with('A')));
    }
}
