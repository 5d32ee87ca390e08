//! Output formatting for tlf
//!
//! Table and detail rendering for filters and resolved task defaults.

use std::collections::BTreeMap;
use tasklists_core::schema::list_metadata;
use tasklists_core::{Filter, Value};

/// Maximum width for the name column before truncation
const MAX_NAME_WIDTH: usize = 30;

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    let len = s.chars().count();
    if len <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{}...", head)
    }
}

/// Remote list id a filter tags new tasks with, or "-"
fn remote_id(filter: &Filter) -> String {
    match filter.defaults.get(list_metadata::LIST_ID) {
        Some(Value::Text(id)) => id.clone(),
        _ => "-".to_string(),
    }
}

/// Local list id from the filter's extras, or "-"
fn list_id(filter: &Filter) -> String {
    filter
        .list_id()
        .map_or_else(|| "-".to_string(), |id| id.to_string())
}

/// Format filters into an aligned table string.
///
/// Produces output in the format:
/// ```text
/// ID  Name       Remote ID  View
/// --  ---------  ---------  -----------
/// 1   Groceries  MTAxOTk2   remote_list
/// ```
pub fn format_filter_table(filters: &[Filter]) -> String {
    if filters.is_empty() {
        return "No filters available.".to_string();
    }

    let headers = ["ID", "Name", "Remote ID", "View"];

    let rows: Vec<[String; 4]> = filters
        .iter()
        .map(|f| {
            [
                list_id(f),
                truncate(&f.name, MAX_NAME_WIDTH),
                remote_id(f),
                f.view.to_string(),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(&headers.map(String::from), &widths));
    lines.push(format_row(&widths.map(|w| "-".repeat(w)), &widths));
    for row in &rows {
        lines.push(format_row(row, &widths));
    }

    lines.join("\n")
}

fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Format a single filter with its query and defaults.
pub fn format_filter_details(filter: &Filter) -> String {
    let mut output = String::new();

    output.push_str(&format!("Name:      {}\n", filter.name));
    output.push_str(&format!("List ID:   {}\n", list_id(filter)));
    output.push_str(&format!("Icon:      {}\n", filter.icon));
    output.push_str(&format!("View:      {}\n", filter.view));
    output.push_str(&format!("Query:     {}\n", filter.sql()));
    output.push_str("Defaults:\n");
    for (column, value) in &filter.defaults {
        output.push_str(&format!("  {} = {}\n", column, value));
    }

    output.pop();
    output
}

/// Format resolved defaults as `column = value` lines.
pub fn format_defaults(values: &BTreeMap<String, Value>) -> String {
    if values.is_empty() {
        return "No defaults.".to_string();
    }

    values
        .iter()
        .map(|(column, value)| format!("{} = {}", column, value))
        .collect::<Vec<_>>()
        .join("\n")
}
