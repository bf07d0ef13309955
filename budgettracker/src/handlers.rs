use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    commands::{Command, Reply, execute_command, help::help_text, render_state},
    parser::{is_confirmation, parse_command},
    session::Session,
};

const PROMPT: &str = "> ";

/// Handle one line of user input
/// Returns `None` for blank lines
pub async fn handle_text_line(session: &mut Session, line: &str) -> Option<Reply> {
    match parse_command(line) {
        Ok(Some(command)) => Some(execute_command(session, command).await),
        Ok(None) => None,
        Err(err_msg) => {
            log::warn!("Parse error: {}", err_msg);
            Some(Reply::Text(format!("❌ {}", err_msg)))
        }
    }
}

/// Handle the answer to a confirmation prompt for a pending command
pub async fn handle_confirmation(session: &mut Session, answer: &str, command: Command) -> Reply {
    if is_confirmation(answer) {
        execute_command(session, command).await
    } else {
        Reply::Text("Cancelled".to_string())
    }
}

/// Read commands line by line until `quit` or end of input
pub async fn run<R, W>(session: &mut Session, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut pending: Option<Command> = None;

    output
        .write_all(format!("{}\n\n{}\n{}", help_text(), render_state(session), PROMPT).as_bytes())
        .await?;
    output.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let reply = match pending.take() {
            Some(command) => Some(handle_confirmation(session, &line, command).await),
            None => handle_text_line(session, &line).await,
        };

        let text = match reply {
            Some(Reply::Text(text)) => text,
            Some(Reply::Confirm { prompt, command }) => {
                pending = Some(command);
                prompt
            }
            Some(Reply::Quit) => break,
            None => String::new(),
        };

        if !text.is_empty() {
            output.write_all(format!("{}\n", text).as_bytes()).await?;
        }
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;
    }

    log::info!("Input finished, {} expenses in store", session.store().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use expensekit::{
        expense::{Category, Filter},
        storage::MemoryKeyValueStorage,
        store::ExpenseStore,
    };

    use super::*;

    async fn session_with(storage: &MemoryKeyValueStorage) -> Session {
        let mut store = ExpenseStore::new(Arc::new(storage.clone()));
        store.load().await;
        Session::new(store)
    }

    #[tokio::test]
    async fn test_blank_line_has_no_reply() {
        let mut session = session_with(&MemoryKeyValueStorage::new()).await;
        assert_eq!(handle_text_line(&mut session, "  ").await, None);
    }

    #[tokio::test]
    async fn test_parse_error_reply() {
        let mut session = session_with(&MemoryKeyValueStorage::new()).await;
        assert_eq!(
            handle_text_line(&mut session, "add Lunch abc food").await,
            Some(Reply::Text("❌ Amount `abc` is not a number".to_string()))
        );
    }

    #[tokio::test]
    async fn test_run_session_script() {
        let storage = MemoryKeyValueStorage::new();
        let mut session = session_with(&storage).await;
        let input: &[u8] = b"add Lunch 250 food\nadd Bus 40 transport\nfilter food\nsummary\nquit\nadd Ignored 1 other\n";
        let mut output = Vec::new();

        run(&mut session, input, &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Expenses (food):"));
        assert!(output.contains("Total: ₹290.00"));
        assert_eq!(session.store().len(), 2);
        assert_eq!(session.filter(), Filter::Category(Category::Food));

        // Everything was written through to storage
        let reloaded = session_with(&storage).await;
        let names: Vec<&str> = reloaded
            .store()
            .list(Filter::All)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Bus", "Lunch"]);
    }

    #[tokio::test]
    async fn test_run_delete_confirmation() {
        let mut session = session_with(&MemoryKeyValueStorage::new()).await;
        session.submit("Lunch", 250.0, Category::Food).await.unwrap();
        session.submit("Bus", 40.0, Category::Transport).await.unwrap();
        let ids: Vec<i64> = session.store().list(Filter::All).map(|e| e.id).collect();

        let script = format!("delete {}\nn\ndelete {}\ny\n", ids[0], ids[1]);
        let mut output = Vec::new();
        run(&mut session, script.as_bytes(), &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Cancelled"));
        assert!(output.contains("🗑️ Deleted Lunch"));
        let remaining: Vec<i64> = session.store().list(Filter::All).map(|e| e.id).collect();
        assert_eq!(remaining, vec![ids[0]]);
    }
}
