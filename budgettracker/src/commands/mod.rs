pub mod help;

use expensekit::expense::{Category, ExpenseId, Filter};

use crate::{
    session::{Session, Submitted},
    view::{
        format_money, render_categories, render_edit_form, render_expense, render_list,
        render_summary,
    },
};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this expense? [y/N]";

/// Tracker commands, one per input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Submit the expense form: adds, or updates the record under edit
    Add {
        name: String,
        amount: f64,
        category: Category,
    },
    Edit(ExpenseId),
    Cancel,
    Delete {
        id: ExpenseId,
        confirmed: bool,
    },
    Filter(Filter),
    List,
    Summary,
    Categories,
    Help,
    Quit,
}

/// Result of executing a command, for the loop to print or act on
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    /// Ask the user first, then run the command on a yes
    Confirm { prompt: String, command: Command },
    Quit,
}

/// Current list under the active filter followed by the summary
pub fn render_state(session: &Session) -> String {
    let mut text = format!(
        "Expenses ({}):\n{}\n\n{}",
        session.filter(),
        render_list(session.visible(), session.filter()),
        render_summary(&session.store().summarize())
    );
    if let Some(id) = session.edit_target() {
        text.push_str(&format!("\n\nEditing expense {}", id));
    }
    text
}

pub async fn execute_command(session: &mut Session, command: Command) -> Reply {
    match command {
        Command::Add {
            name,
            amount,
            category,
        } => match session.submit(&name, amount, category).await {
            Ok(Submitted::Added(expense)) => Reply::Text(format!(
                "✅ Added {}\n\n{}",
                render_expense(&expense),
                render_state(session)
            )),
            Ok(Submitted::Updated(expense)) => Reply::Text(format!(
                "✏️ Updated {}\n\n{}",
                render_expense(&expense),
                render_state(session)
            )),
            Ok(Submitted::Missing(id)) => Reply::Text(format!(
                "ℹ️ Expense {} no longer exists, nothing was updated",
                id
            )),
            Err(e) => {
                log::warn!("Rejected expense input: {}", e);
                Reply::Text(format!("❌ {}", e))
            }
        },
        Command::Edit(id) => match session.begin_edit(id) {
            Some(expense) => Reply::Text(render_edit_form(expense)),
            None => Reply::Text(format!("❌ No expense with id {}", id)),
        },
        Command::Cancel => {
            session.cancel_edit();
            Reply::Text("Edit cancelled".to_string())
        }
        Command::Delete { id, confirmed } => {
            let Some(expense) = session.store().get(id) else {
                return Reply::Text(format!("❌ No expense with id {}", id));
            };
            if !confirmed {
                return Reply::Confirm {
                    prompt: format!("{}\n{}", render_expense(expense), DELETE_PROMPT),
                    command: Command::Delete {
                        id,
                        confirmed: true,
                    },
                };
            }
            match session.delete(id).await {
                Some(removed) => Reply::Text(format!(
                    "🗑️ Deleted {} ({})\n\n{}",
                    removed.name,
                    format_money(removed.amount),
                    render_state(session)
                )),
                None => Reply::Text(format!("❌ No expense with id {}", id)),
            }
        }
        Command::Filter(filter) => {
            session.set_filter(filter);
            Reply::Text(render_state(session))
        }
        Command::List => Reply::Text(render_state(session)),
        Command::Summary => Reply::Text(render_summary(&session.store().summarize())),
        Command::Categories => Reply::Text(render_categories(session.filter())),
        Command::Help => Reply::Text(help::help_text()),
        Command::Quit => Reply::Quit,
    }
}
