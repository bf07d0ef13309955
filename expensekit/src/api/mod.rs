pub mod expense;
pub mod storage;
pub mod store;
