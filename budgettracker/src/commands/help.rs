use expensekit::expense::Category;

/// Text printed at startup and for `help`
pub fn help_text() -> String {
    let categories = Category::ALL.map(|c| c.as_str()).join(", ");
    format!(
        "💰 Budget Tracker v{}\n\
         These commands are supported:\n\
         \x20 add <name> <amount> <category>  add an expense (updates it while editing)\n\
         \x20 edit <id>                       load an expense into the form\n\
         \x20 cancel                          leave edit mode\n\
         \x20 delete <id> [-y]                delete an expense\n\
         \x20 filter <all|category>           show only one category\n\
         \x20 list                            show expenses and totals\n\
         \x20 summary                         show totals per category\n\
         \x20 categories                      list categories\n\
         \x20 help                            display this help\n\
         \x20 quit                            exit\n\
         Categories: {}",
        env!("CARGO_PKG_VERSION"),
        categories
    )
}
