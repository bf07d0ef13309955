use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_STORAGE_FILE: &str = "expenses.yaml";
pub const STORAGE_FILE_HELP: &str =
    "Keep expenses in a YAML file (default: expenses.yaml). Without this flag expenses live in memory only";

/// A terminal budget tracker for personal expenses
#[derive(Parser, Debug)]
#[command(name = "budgettracker")]
#[command(about = "Track, filter and summarize personal expenses", long_about = None)]
pub struct Args {
    #[arg(long, num_args = 0..=1, value_name = "PATH", help = STORAGE_FILE_HELP)]
    pub storage_file: Option<Option<PathBuf>>,

    /// Key the expense list is stored under
    #[arg(long, default_value = expensekit::store::DEFAULT_STORAGE_KEY)]
    pub storage_key: String,
}

impl Args {
    /// Resolve the storage file, if persistent storage was requested
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage_file
            .clone()
            .map(|path| path.unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_FILE)))
    }
}
