use std::{collections::HashSet, sync::Arc};

use chrono::Local;

use super::{
    expense::{
        Category, Expense, ExpenseId, Filter, Summary, ValidationError, format_display_date,
        validate_fields,
    },
    storage::key_value_storage::KeyValueStorageTrait,
};

/// Key under which the expense list is persisted
pub const DEFAULT_STORAGE_KEY: &str = "expenses";

/// Largest id that survives the persisted JSON as an exact number
pub const MAX_EXPENSE_ID: ExpenseId = (1 << 53) - 1;

/// Authoritative in-memory list of expenses, mirrored to a key-value storage
/// after every mutation. Newest expense first.
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    storage: Arc<dyn KeyValueStorageTrait>,
    key: String,
}

impl ExpenseStore {
    /// Create an empty store persisting under the default key
    /// Call `load` to pick up previously saved expenses
    pub fn new(storage: Arc<dyn KeyValueStorageTrait>) -> Self {
        Self {
            expenses: Vec::new(),
            storage,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Builder-like method to persist under a different key
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Replace the in-memory list with the persisted one.
    /// Absent or malformed data results in an empty list.
    pub async fn load(&mut self) {
        self.expenses = match self.storage.get(&self.key).await {
            Some(content) => match parse_expenses(&content) {
                Ok(expenses) => expenses,
                Err(e) => {
                    log::warn!("Discarding malformed expenses under `{}`: {}", self.key, e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        log::info!("Loaded {} expenses", self.expenses.len());
    }

    /// Add a new expense at the front of the list and persist
    pub async fn add(
        &mut self,
        name: &str,
        amount: f64,
        category: Category,
    ) -> Result<Expense, ValidationError> {
        let name = validate_fields(name, amount)?;
        let now = Local::now();
        let timestamp = now.timestamp_millis();
        // Two expenses created within the same millisecond must still differ
        let next = self
            .expenses
            .iter()
            .map(|e| e.id.saturating_add(1))
            .max()
            .map_or(timestamp, |next| next.max(timestamp));
        let id = if next <= MAX_EXPENSE_ID {
            next
        } else {
            (timestamp..=MAX_EXPENSE_ID)
                .find(|candidate| self.get(*candidate).is_none())
                .unwrap_or(timestamp)
        };

        let expense = Expense {
            id,
            name,
            amount,
            category,
            date: format_display_date(&now),
            timestamp,
        };
        self.expenses.insert(0, expense.clone());
        log::info!("Added expense {} ({} {})", expense.id, expense.amount, category);
        self.persist().await;
        Ok(expense)
    }

    /// Update an existing expense in place, refreshing its date.
    /// Returns `Ok(None)` without touching anything when the id is unknown.
    pub async fn update(
        &mut self,
        id: ExpenseId,
        name: &str,
        amount: f64,
        category: Category,
    ) -> Result<Option<Expense>, ValidationError> {
        let name = validate_fields(name, amount)?;
        let Some(expense) = self.expenses.iter_mut().find(|e| e.id == id) else {
            log::info!("Update skipped, expense {} not found", id);
            return Ok(None);
        };

        expense.name = name;
        expense.amount = amount;
        expense.category = category;
        expense.date = format_display_date(&Local::now());
        let updated = expense.clone();

        log::info!("Updated expense {}", id);
        self.persist().await;
        Ok(Some(updated))
    }

    /// Remove the expense with the given id, if present, and persist
    pub async fn remove(&mut self, id: ExpenseId) -> Option<Expense> {
        let removed = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .map(|pos| self.expenses.remove(pos));
        match &removed {
            Some(_) => log::info!("Removed expense {}", id),
            None => log::info!("Remove skipped, expense {} not found", id),
        }
        self.persist().await;
        removed
    }

    /// Expenses matching the filter, newest first
    pub fn list(&self, filter: Filter) -> impl Iterator<Item = &Expense> {
        self.expenses.iter().filter(move |e| filter.matches(e))
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn summarize(&self) -> Summary {
        Summary::from_expenses(&self.expenses)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Write the whole list through to storage. Failures are logged, the
    /// in-memory list stays as it is.
    async fn persist(&self) {
        let content = match serde_json::to_string(&self.expenses) {
            Ok(content) => content,
            Err(e) => {
                log::error!("Failed to serialize expenses: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, content).await {
            log::error!("Failed to persist expenses under `{}`: {}", self.key, e);
        }
    }
}

/// Decode a persisted list, rejecting data that breaks the record invariants
fn parse_expenses(content: &str) -> Result<Vec<Expense>, String> {
    let expenses: Vec<Expense> = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let mut ids = HashSet::new();
    for expense in &expenses {
        if !(1..=MAX_EXPENSE_ID).contains(&expense.id) {
            return Err(format!("expense id {} out of range", expense.id));
        }
        if !ids.insert(expense.id) {
            return Err(format!("duplicate expense id {}", expense.id));
        }
        validate_fields(&expense.name, expense.amount)
            .map_err(|e| format!("expense {}: {}", expense.id, e))?;
    }
    Ok(expenses)
}
