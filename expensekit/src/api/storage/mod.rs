pub mod file_storage;
pub mod key_value_storage;
