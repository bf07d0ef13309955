mod commands;
mod config;
mod handlers;
mod parser;
mod session;
mod view;

use std::sync::Arc;

use clap::Parser;
use config::Args;
use expensekit::{
    storage::{FileKeyValueStorage, KeyValueStorageTrait, MemoryKeyValueStorage},
    store::ExpenseStore,
};
use session::Session;
use tokio::io::{BufReader, stdin, stdout};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    pretty_env_logger::init();
    log::info!("Starting budget tracker...");

    // Initialize storage based on CLI arguments
    let storage: Arc<dyn KeyValueStorageTrait> = if let Some(storage_file) = args.storage_path() {
        log::info!("Using persistent storage in file: {:?}", storage_file);
        Arc::new(FileKeyValueStorage::new(storage_file))
    } else {
        log::info!("Using in-memory storage");
        Arc::new(MemoryKeyValueStorage::new())
    };

    let mut store = ExpenseStore::new(storage).storage_key(args.storage_key);
    store.load().await;

    let mut session = Session::new(store);
    handlers::run(&mut session, BufReader::new(stdin()), stdout()).await
}
