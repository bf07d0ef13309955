use expensekit::expense::{Category, ExpenseId, Filter};
use regex::Regex;

use crate::commands::Command;

/// `<name...> <amount> <category>`: the name may contain spaces, the last two words may not
const ADD_PATTERN: &str = r"^(?P<name>.+?)\s+(?P<amount>\S+)\s+(?P<category>\S+)$";

/// Parse one input line into a command
/// Returns `Ok(None)` for blank lines and an error message for anything unrecognized
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    // Accept chat-style "/command" as well as plain "command"
    let line = line.trim().trim_start_matches('/');
    if line.is_empty() {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword.to_lowercase().as_str() {
        "add" => parse_add(rest)?,
        "edit" => Command::Edit(parse_id(rest)?),
        "cancel" => no_arguments(keyword, rest, Command::Cancel)?,
        "delete" | "remove" => parse_delete(rest)?,
        "filter" => {
            if rest.is_empty() {
                return Err("Usage: filter <all|category>".to_string());
            }
            Command::Filter(rest.parse::<Filter>().map_err(|e| e.to_string())?)
        }
        "list" => no_arguments(keyword, rest, Command::List)?,
        "summary" | "report" => no_arguments(keyword, rest, Command::Summary)?,
        "categories" => no_arguments(keyword, rest, Command::Categories)?,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => {
            return Err(format!(
                "Unknown command `{}`, type `help` to see what is supported",
                keyword
            ));
        }
    };
    Ok(Some(command))
}

fn parse_add(rest: &str) -> Result<Command, String> {
    let re = Regex::new(ADD_PATTERN).map_err(|e| e.to_string())?;
    let Some(captures) = re.captures(rest) else {
        return Err("Usage: add <name> <amount> <category>".to_string());
    };

    let amount_str = &captures["amount"];
    let amount = amount_str
        .parse::<f64>()
        .map_err(|_| format!("Amount `{}` is not a number", amount_str))?;
    let category = captures["category"]
        .parse::<Category>()
        .map_err(|e| e.to_string())?;

    Ok(Command::Add {
        name: captures["name"].trim().to_string(),
        amount,
        category,
    })
}

fn parse_delete(rest: &str) -> Result<Command, String> {
    let mut id = None;
    let mut confirmed = false;
    for word in rest.split_whitespace() {
        match word {
            "-y" | "--yes" => confirmed = true,
            _ if id.is_none() => id = Some(parse_id(word)?),
            _ => return Err(format!("Unexpected argument `{}`", word)),
        }
    }
    let id = id.ok_or_else(|| "Usage: delete <id> [-y]".to_string())?;
    Ok(Command::Delete { id, confirmed })
}

fn parse_id(s: &str) -> Result<ExpenseId, String> {
    if s.is_empty() {
        return Err("Expense id is required".to_string());
    }
    s.parse::<ExpenseId>()
        .map_err(|_| format!("`{}` is not a valid expense id", s))
}

fn no_arguments(keyword: &str, rest: &str, command: Command) -> Result<Command, String> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(format!("`{}` takes no arguments", keyword))
    }
}

/// Interpret the answer to a yes/no prompt; anything but yes means no
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
