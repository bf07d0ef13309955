//! Expensekit - expense records, summaries and their key-value persistence

// Private API modules
pub(crate) mod api;

// Public expense module with re-exports
pub mod expense {
    // Re-export domain types from internal API
    pub use crate::api::expense::{
        Category, Expense, ExpenseId, Filter, Summary, ValidationError, format_display_date,
    };
}

// Public store module with re-exports
pub mod store {
    pub use crate::api::store::{DEFAULT_STORAGE_KEY, ExpenseStore, MAX_EXPENSE_ID};
}

// Public storage module with re-exports
pub mod storage {
    // Re-export types and traits from internal API
    pub use crate::api::storage::file_storage::FileKeyValueStorage;
    pub use crate::api::storage::key_value_storage::{
        KeyValueStorageTrait, MemoryKeyValueStorage, StorageError,
    };
}
