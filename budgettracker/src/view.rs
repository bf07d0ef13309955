use std::fmt::Write;

use expensekit::expense::{Category, Expense, Filter, Summary};

pub const CURRENCY_SYMBOL: &str = "₹";

/// Format an amount with two decimals and Indian digit grouping (12,34,567.00)
/// Values too large for exact cents fall back to scientific notation.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "overflow".to_string();
    }
    if amount.abs() * 100.0 >= u64::MAX as f64 {
        return format!("{:.2e}", amount);
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        // Last three digits form one group, the rest are grouped by two
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    format!("{}{}.{:02}", sign, grouped, cents % 100)
}

pub fn format_money(amount: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_amount(amount))
}

pub fn category_badge(category: Category) -> String {
    format!("{} {}", category.icon(), category.label())
}

/// One expense as a single line: id, name, category, date and amount
pub fn render_expense(expense: &Expense) -> String {
    format!(
        "[{}] {} | {} | {} | {}",
        expense.id,
        expense.name,
        category_badge(expense.category),
        expense.date,
        format_money(expense.amount)
    )
}

pub fn render_list<'a>(expenses: impl IntoIterator<Item = &'a Expense>, filter: Filter) -> String {
    let lines: Vec<String> = expenses.into_iter().map(render_expense).collect();
    if lines.is_empty() {
        return match filter {
            Filter::All => "No expenses yet. Add your first one above!".to_string(),
            Filter::Category(_) => "No expenses in this category yet.".to_string(),
        };
    }
    lines.join("\n")
}

pub fn render_summary(summary: &Summary) -> String {
    let mut text = format!("Total: {}", format_money(summary.total));
    for category in Category::ALL {
        let _ = write!(
            text,
            "\n  {}: {}",
            category_badge(category),
            format_money(summary.category_total(category))
        );
    }
    text
}

/// Shown when a record is put into edit mode, mirroring the prefilled form
pub fn render_edit_form(expense: &Expense) -> String {
    format!(
        "Editing [{}]: {} {} {}\nSend `add <name> <amount> <category>` to update it or `cancel`",
        expense.id, expense.name, expense.amount, expense.category
    )
}

pub fn render_categories(filter: Filter) -> String {
    let mut text = String::from("Categories:");
    for category in Category::ALL {
        let marker = if filter == Filter::Category(category) {
            " (active filter)"
        } else {
            ""
        };
        let _ = write!(
            text,
            "\n  {} - {}{}",
            category.as_str(),
            category_badge(category),
            marker
        );
    }
    text
}
