use expensekit::{
    expense::{Category, Expense, ExpenseId, Filter, ValidationError},
    store::ExpenseStore,
};

/// View-side state: the store plus what the user is currently looking at
/// and which record, if any, the form is editing
pub struct Session {
    store: ExpenseStore,
    filter: Filter,
    edit_target: Option<ExpenseId>,
}

/// What a form submission did
#[derive(Debug, Clone, PartialEq)]
pub enum Submitted {
    Added(Expense),
    Updated(Expense),
    /// The record under edit disappeared before the update
    Missing(ExpenseId),
}

impl Session {
    pub fn new(store: ExpenseStore) -> Self {
        Self {
            store,
            filter: Filter::All,
            edit_target: None,
        }
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn edit_target(&self) -> Option<ExpenseId> {
        self.edit_target
    }

    /// Put an existing record into edit mode
    pub fn begin_edit(&mut self, id: ExpenseId) -> Option<&Expense> {
        let expense = self.store.get(id)?;
        self.edit_target = Some(id);
        Some(expense)
    }

    pub fn cancel_edit(&mut self) {
        self.edit_target = None;
    }

    /// Submit the form: update the record under edit, or add a new one.
    /// Edit mode ends only when the input was valid.
    pub async fn submit(
        &mut self,
        name: &str,
        amount: f64,
        category: Category,
    ) -> Result<Submitted, ValidationError> {
        let submitted = match self.edit_target {
            Some(id) => match self.store.update(id, name, amount, category).await? {
                Some(expense) => Submitted::Updated(expense),
                None => Submitted::Missing(id),
            },
            None => Submitted::Added(self.store.add(name, amount, category).await?),
        };
        self.edit_target = None;
        Ok(submitted)
    }

    pub async fn delete(&mut self, id: ExpenseId) -> Option<Expense> {
        if self.edit_target == Some(id) {
            self.edit_target = None;
        }
        self.store.remove(id).await
    }

    /// Records matching the current filter
    pub fn visible(&self) -> impl Iterator<Item = &Expense> {
        self.store.list(self.filter)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use expensekit::storage::MemoryKeyValueStorage;

    use super::*;

    async fn session() -> Session {
        let mut store = ExpenseStore::new(Arc::new(MemoryKeyValueStorage::new()));
        store.load().await;
        Session::new(store)
    }

    #[tokio::test]
    async fn test_submit_adds_when_not_editing() {
        let mut session = session().await;
        let submitted = session.submit("Lunch", 250.0, Category::Food).await.unwrap();
        assert!(matches!(submitted, Submitted::Added(ref e) if e.name == "Lunch"));
        assert_eq!(session.store().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_updates_edit_target_and_leaves_edit_mode() {
        let mut session = session().await;
        let Submitted::Added(lunch) = session.submit("Lunch", 250.0, Category::Food).await.unwrap()
        else {
            panic!("expected an added expense");
        };

        assert!(session.begin_edit(lunch.id).is_some());
        assert_eq!(session.edit_target(), Some(lunch.id));

        let submitted = session.submit("Brunch", 300.0, Category::Food).await.unwrap();
        assert!(matches!(submitted, Submitted::Updated(ref e) if e.id == lunch.id && e.name == "Brunch"));
        assert_eq!(session.edit_target(), None);
        assert_eq!(session.store().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_submit_keeps_edit_mode() {
        let mut session = session().await;
        let Submitted::Added(lunch) = session.submit("Lunch", 250.0, Category::Food).await.unwrap()
        else {
            panic!("expected an added expense");
        };
        session.begin_edit(lunch.id);

        let result = session.submit("Lunch", 0.0, Category::Food).await;
        assert_eq!(result, Err(ValidationError::InvalidAmount(0.0)));
        assert_eq!(session.edit_target(), Some(lunch.id));
        assert_eq!(session.store().get(lunch.id), Some(&lunch));
    }

    #[tokio::test]
    async fn test_begin_edit_unknown_id() {
        let mut session = session().await;
        assert!(session.begin_edit(42).is_none());
        assert_eq!(session.edit_target(), None);
    }

    #[tokio::test]
    async fn test_delete_clears_matching_edit_target() {
        let mut session = session().await;
        let Submitted::Added(lunch) = session.submit("Lunch", 250.0, Category::Food).await.unwrap()
        else {
            panic!("expected an added expense");
        };
        session.begin_edit(lunch.id);

        assert_eq!(session.delete(lunch.id).await, Some(lunch));
        assert_eq!(session.edit_target(), None);
        assert!(session.store().is_empty());
    }

    #[tokio::test]
    async fn test_visible_follows_filter() {
        let mut session = session().await;
        session.submit("Lunch", 250.0, Category::Food).await.unwrap();
        session.submit("Bus", 40.0, Category::Transport).await.unwrap();

        session.set_filter(Filter::Category(Category::Transport));
        let names: Vec<&str> = session.visible().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bus"]);

        session.set_filter(Filter::All);
        assert_eq!(session.visible().count(), 2);
    }
}
