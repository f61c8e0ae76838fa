//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// One labelled value in a detail view
#[derive(Debug, Clone, Tabled)]
pub struct Field {
    #[tabled(rename = "FIELD")]
    pub name: &'static str,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

impl Field {
    /// Field whose empty value renders as `--`
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            name,
            value: if value.is_empty() {
                "--".to_string()
            } else {
                value
            },
        }
    }
}

/// Format rows as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}
