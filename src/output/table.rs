//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format data as a table, or `empty_message` when there are no rows
pub fn format_table<T: Tabled>(data: &[T], empty_message: &str) -> String {
    if data.is_empty() {
        return empty_message.to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}
