use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Identifier of an expense record: Unix milliseconds at creation time
pub type ExpenseId = i64;

/// Fixed set of expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Other,
    ];

    /// Lowercase key used in persisted data and in commands
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Utilities => "utilities",
            Category::Other => "other",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "🍔",
            Category::Transport => "🚗",
            Category::Entertainment => "🎮",
            Category::Utilities => "💡",
            Category::Other => "📦",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == key)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// A single expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    pub amount: f64,
    pub category: Category,
    /// Display date (day-first), refreshed on every update
    pub date: String,
    /// Creation time in Unix milliseconds
    pub timestamp: i64,
}

/// Category restriction for listing expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Category(Category),
}

impl Filter {
    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(category) => expense.category == *category,
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::All => write!(f, "all"),
            Filter::Category(category) => write!(f, "{}", category),
        }
    }
}

impl FromStr for Filter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Filter::All)
        } else {
            s.parse().map(Filter::Category)
        }
    }
}

/// Aggregate totals over the current record set
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: f64,
    /// Has an entry for every category, zero when no expenses match
    pub per_category: BTreeMap<Category, f64>,
}

impl Summary {
    pub fn from_expenses<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Self {
        let mut per_category: BTreeMap<Category, f64> =
            Category::ALL.into_iter().map(|c| (c, 0.0)).collect();
        let mut total = 0.0;
        for expense in expenses {
            total += expense.amount;
            *per_category.entry(expense.category).or_default() += expense.amount;
        }
        Self {
            total,
            per_category,
        }
    }

    pub fn category_total(&self, category: Category) -> f64 {
        self.per_category.get(&category).copied().unwrap_or_default()
    }
}

/// Rejected input, reported before any state change
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyName,
    InvalidAmount(f64),
    UnknownCategory(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "Expense name must not be empty"),
            ValidationError::InvalidAmount(amount) => {
                write!(f, "Amount must be greater than zero, got {}", amount)
            }
            ValidationError::UnknownCategory(name) => write!(
                f,
                "Unknown category `{}`, expected one of: {}",
                name,
                Category::ALL.map(|c| c.as_str()).join(", ")
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check name and amount, returning the trimmed name
pub(crate) fn validate_fields(name: &str, amount: f64) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::InvalidAmount(amount));
    }
    Ok(name.to_string())
}

/// Format a date the way Indian English locales show it: `d/m/yyyy`
pub fn format_display_date<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    datetime.format("%-d/%-m/%Y").to_string()
}
