pub use crate::error::Error;

pub use anstream::eprintln;
pub use anstream::println;
pub use color_eyre::eyre::{eyre, Context, Result};
pub use colored::Colorize;
pub use std::format as f;

/// Width of the `=` rules around section headings.
pub const RULE_WIDTH: usize = 80;

pub fn new_table() -> prettytable::Table {
    let mut table = prettytable::Table::new();

    let format = prettytable::format::FormatBuilder::new()
        .padding(1, 1)
        .build();

    table.set_format(format);

    table
}

/// Section heading framed by two rules, all in `color`.
pub fn heading(title: &str, color: colored::Color) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    f!(
        "\n{}\n{}\n{}\n",
        rule.color(color),
        title.color(color).bold(),
        rule.color(color)
    )
}
