//! Plain-text rendering of panels for terminal output.
//!
//! Output is deterministic (no colours, no terminal width probing) so it can be
//! piped and compared in golden tests.

use super::{Item, Level, Panel, Section};

/// Format one panel as text.
pub fn format_panel(panel: &Panel) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", panel.title));

    for section in &panel.sections {
        match section {
            Section::Items(items) => {
                for item in items {
                    out.push_str(&format_item(item));
                    out.push('\n');
                }
            }
            Section::Heading(text) => {
                out.push('\n');
                out.push_str(text);
                out.push('\n');
            }
            Section::Bullets(lines) => {
                for line in lines {
                    out.push_str(&format!("- {line}\n"));
                }
            }
            Section::Table { headers, rows } => out.push_str(&format_table(headers, rows)),
            Section::Note(text) => {
                out.push_str(text);
                out.push('\n');
            }
            Section::Article {
                title,
                url,
                description,
                byline,
            } => {
                out.push_str(&format!("* {title}\n  {url}\n  {description}\n  {byline}\n\n"));
            }
            Section::Json(text) => {
                out.push_str("\nJSON:\n");
                out.push_str(text);
                out.push('\n');
            }
        }
    }

    out
}

fn format_item(item: &Item) -> String {
    let marker = match item.indicator {
        Some(Level::Ok) => "[ok] ",
        Some(Level::Warning) => "[warn] ",
        Some(Level::Error) => "[error] ",
        None => "",
    };
    format!("{marker}{}: {}", item.label, item.value)
}

fn format_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    out.push_str(format_row(headers, &widths).trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(format_row(&rule, &widths).trim_end());
    out.push('\n');

    for row in rows {
        out.push_str(format_row(row, &widths).trim_end());
        out.push('\n');
    }
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{cell:<w$}", w = *w))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Outcome;

    #[test]
    fn panel_golden_snapshot() {
        let panel = Panel {
            title: "Database Contents".to_string(),
            outcome: Outcome::Success,
            sections: vec![
                Section::Items(vec![Item {
                    label: "Status".to_string(),
                    value: "Successfully read 1 tables".to_string(),
                    indicator: Some(Level::Ok),
                }]),
                Section::Heading("Table: sea_level".to_string()),
                Section::Table {
                    headers: vec!["year".to_string(), "gmsl".to_string()],
                    rows: vec![
                        vec!["1993".to_string(), "NULL".to_string()],
                        vec!["1994".to_string(), "12.25".to_string()],
                    ],
                },
                Section::Bullets(vec!["a: 1 rows".to_string()]),
            ],
        };

        let expected = concat!(
            "=== Database Contents ===\n",
            "[ok] Status: Successfully read 1 tables\n",
            "\n",
            "Table: sea_level\n",
            "year  gmsl\n",
            "----  -----\n",
            "1993  NULL\n",
            "1994  12.25\n",
            "- a: 1 rows\n",
        );
        assert_eq!(format_panel(&panel), expected);
    }

    #[test]
    fn article_block() {
        let panel = Panel {
            title: "Climate News".to_string(),
            outcome: Outcome::Success,
            sections: vec![Section::Article {
                title: "T".to_string(),
                url: "https://x".to_string(),
                description: "D".to_string(),
                byline: "Wire • 2025-03-01".to_string(),
            }],
        };
        assert_eq!(
            format_panel(&panel),
            "=== Climate News ===\n* T\n  https://x\n  D\n  Wire • 2025-03-01\n\n"
        );
    }
}
