//! Render-ready panels for admin diagnostics and the news feed.
//!
//! Builders here turn API payloads into a small, surface-agnostic model
//! (`Panel`). The text formatter in `format` and the TUI both consume it, so
//! wording and layout decisions live in one place.

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::domain::{ApiDetails, Article, DatabaseContents, DatabaseStatus, NewsFeed, TableDump};
use crate::error::AppError;

pub mod format;

pub use format::format_panel;

/// Rows shown per table in the database contents panel.
pub const TABLE_PREVIEW_ROWS: usize = 20;
/// Rows the server returns per table at most.
const SERVER_ROW_LIMIT: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Status light shown next to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub label: String,
    pub value: String,
    pub indicator: Option<Level>,
}

impl Item {
    fn new(label: &str, value: impl ToString) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            indicator: None,
        }
    }

    fn flagged(level: Level, label: &str, value: impl ToString) -> Self {
        Self {
            indicator: Some(level),
            ..Self::new(label, value)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Items(Vec<Item>),
    Heading(String),
    Bullets(Vec<String>),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Note(String),
    Article {
        title: String,
        url: String,
        description: String,
        byline: String,
    },
    Json(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub outcome: Outcome,
    pub sections: Vec<Section>,
}

impl Panel {
    fn new(title: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            title: title.into(),
            outcome,
            sections: Vec::new(),
        }
    }

    fn push(&mut self, section: Section) -> &mut Self {
        self.sections.push(section);
        self
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

pub fn database_status_panel(status: &DatabaseStatus) -> Panel {
    if !status.is_success() {
        let mut panel = Panel::new("Database Connection Status - FAILED", Outcome::Failure);
        panel
            .push(Section::Items(vec![
                Item::flagged(Level::Error, "Error", failure_text(&status.message, &status.error)),
                Item::new("Database Path", status.database_path.as_deref().unwrap_or("-")),
                Item::new("Database Exists", yes_no(status.database_exists.unwrap_or(false))),
            ]))
            .push(json_section(status));
        return panel;
    }

    let mut panel = Panel::new("Database Connection Status - SUCCESS", Outcome::Success);
    panel
        .push(Section::Items(vec![
            Item::flagged(Level::Ok, "Status", status.message.as_deref().unwrap_or("")),
            Item::new("Database Path", status.database_path.as_deref().unwrap_or("-")),
            Item::new(
                "Database Size",
                format!("{} MB", status.database_size_mb.unwrap_or(0.0)),
            ),
            Item::new("Tables Found", status.tables.len()),
        ]))
        .push(Section::Heading("Table Information:".to_string()))
        .push(Section::Bullets(
            status
                .table_counts
                .iter()
                .map(|(table, count)| format!("{table}: {count} rows"))
                .collect(),
        ))
        .push(json_section(status));
    panel
}

pub fn database_contents_panel(contents: &DatabaseContents) -> Panel {
    if !contents.is_success() {
        let mut panel = Panel::new("Read Database - ERROR", Outcome::Failure);
        panel
            .push(Section::Items(vec![Item::flagged(
                Level::Error,
                "Error",
                failure_text(&contents.message, &contents.error),
            )]))
            .push(json_section(contents));
        return panel;
    }

    let mut panel = Panel::new("Database Contents", Outcome::Success);
    panel.push(Section::Items(vec![
        Item::flagged(Level::Ok, "Status", contents.message.as_deref().unwrap_or("")),
        Item::new("Tables Found", contents.tables.len()),
    ]));

    for (name, dump) in contents.ordered_tables() {
        push_table(&mut panel, name, dump);
    }

    panel.push(json_section(contents));
    panel
}

fn push_table(panel: &mut Panel, name: &str, dump: &TableDump) {
    let showing = if dump.showing_rows < dump.total_rows {
        format!("{} (limited to first {SERVER_ROW_LIMIT} rows)", dump.showing_rows)
    } else {
        dump.showing_rows.to_string()
    };
    let columns = dump
        .columns
        .iter()
        .map(|c| format!("{} ({})", c.name, c.kind))
        .collect::<Vec<_>>()
        .join(", ");

    panel
        .push(Section::Heading(format!("Table: {name}")))
        .push(Section::Items(vec![
            Item::new("Total Rows", dump.total_rows),
            Item::new("Showing", showing),
            Item::new("Columns", columns),
        ]));

    if dump.sample_data.is_empty() {
        panel.push(Section::Note("No data in this table.".to_string()));
        return;
    }

    let headers: Vec<String> = dump.columns.iter().map(|c| c.name.clone()).collect();
    let rows = dump
        .sample_data
        .iter()
        .take(TABLE_PREVIEW_ROWS)
        .map(|row| headers.iter().map(|col| cell_text(row.get(col))).collect())
        .collect();
    panel.push(Section::Table { headers, rows });

    if dump.sample_data.len() > TABLE_PREVIEW_ROWS {
        panel.push(Section::Note(format!(
            "Showing first {TABLE_PREVIEW_ROWS} of {} rows",
            dump.sample_data.len()
        )));
    }
}

pub fn api_details_panel(details: &ApiDetails) -> Panel {
    if !details.is_success() {
        let mut panel = Panel::new("API Details - ERROR", Outcome::Failure);
        panel
            .push(Section::Items(vec![Item::flagged(
                Level::Error,
                "Error",
                failure_text(&details.message, &details.error),
            )]))
            .push(json_section(details));
        return panel;
    }

    let mut panel = Panel::new("API Details", Outcome::Success);
    panel
        .push(Section::Items(vec![
            Item::new("API Base URL", details.api_base_url.as_deref().unwrap_or("-")),
            Item::new("Total Endpoints", details.total_endpoints),
        ]))
        .push(Section::Heading("Available Endpoints:".to_string()))
        .push(Section::Bullets(
            details
                .endpoints
                .iter()
                .map(|e| format!("{} {} - {}", e.method, e.path, e.description))
                .collect(),
        ));

    if let Some(news) = &details.news_api {
        panel
            .push(Section::Heading("News API Status:".to_string()))
            .push(Section::Items(vec![
                Item::flagged(news_level(&news.status), "Status", news.status.to_uppercase()),
                Item::new("Message", &news.message),
                Item::new("API Key Configured", yes_no(news.key_configured)),
                Item::new("API URL", &news.url),
            ]));
    }

    if let Some(server) = &details.server_info {
        panel
            .push(Section::Heading("Server Information:".to_string()))
            .push(Section::Items(vec![
                Item::new("Server Version", &server.server_version),
                Item::new("CORS Enabled", yes_no(server.cors_enabled)),
            ]));
    }

    panel.push(json_section(details));
    panel
}

pub fn news_panel(feed: &NewsFeed) -> Panel {
    let mut panel = Panel::new("Climate News", Outcome::Success);
    if feed.articles.is_empty() {
        panel.push(Section::Note("No news articles available.".to_string()));
        return panel;
    }
    for article in &feed.articles {
        panel.push(article_section(article));
    }
    panel
}

fn article_section(article: &Article) -> Section {
    let description = match article.description.as_deref() {
        Some(d) if !d.trim().is_empty() => d.to_string(),
        _ => "No description available.".to_string(),
    };
    Section::Article {
        title: article.title.clone(),
        url: article.url.clone(),
        description,
        byline: format!("{} • {}", article.source, publish_date(&article.published_at)),
    }
}

pub fn site_details_panel() -> Panel {
    let mut panel = Panel::new("Site Details", Outcome::Success);
    panel.push(Section::Note(format!(
        "Climate Change Dashboard v{}\nTerminal client for the climate data API.",
        env!("CARGO_PKG_VERSION")
    )));
    panel
}

/// Panel shown when a request could not be completed at all.
pub fn connection_error_panel(title: &str, err: &AppError, config: &ApiConfig) -> Panel {
    let mut panel = Panel::new(format!("{title} - ERROR"), Outcome::Failure);
    panel
        .push(Section::Items(vec![Item::flagged(
            Level::Error,
            "Connection Error",
            err.message(),
        )]))
        .push(Section::Note(format!(
            "Make sure the API server is reachable at {}.",
            config.base_url
        )));
    panel
}

/// Render an article timestamp as `YYYY-MM-DD`, keeping the raw text if it
/// does not parse.
fn publish_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.date().format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

fn news_level(status: &str) -> Level {
    match status {
        "connected" => Level::Ok,
        "error" => Level::Error,
        _ => Level::Warning,
    }
}

fn failure_text(message: &Option<String>, error: &Option<String>) -> String {
    message
        .as_deref()
        .or(error.as_deref())
        .unwrap_or("unknown error")
        .to_string()
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "NULL".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn json_section<T: Serialize>(payload: &T) -> Section {
    let text = serde_json::to_string_pretty(payload)
        .unwrap_or_else(|e| format!("<unserializable payload: {e}>"));
    Section::Json(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColumnInfo, EndpointInfo, NewsApiStatus};
    use serde_json::{Map, json};

    fn row(year: i64, value: Value) -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("year".to_string(), json!(year));
        m.insert("gmsl".to_string(), value);
        m
    }

    #[test]
    fn status_success_lists_counts() {
        let status = DatabaseStatus {
            status: "success".to_string(),
            connected: true,
            message: Some("Database connected successfully. Found 2 tables.".to_string()),
            database_path: Some("/srv/climate.db".to_string()),
            database_size_mb: Some(0.05),
            tables: vec!["sea_level".to_string(), "temperature".to_string()],
            table_counts: [("temperature".to_string(), 174), ("sea_level".to_string(), 140)]
                .into_iter()
                .collect(),
            ..DatabaseStatus::default()
        };
        let panel = database_status_panel(&status);
        assert!(panel.is_success());
        assert_eq!(panel.title, "Database Connection Status - SUCCESS");
        assert!(panel.sections.contains(&Section::Bullets(vec![
            "sea_level: 140 rows".to_string(),
            "temperature: 174 rows".to_string()
        ])));
        let Section::Items(items) = &panel.sections[0] else {
            panic!("expected items first");
        };
        assert_eq!(items[2].value, "0.05 MB");
        assert_eq!(items[0].indicator, Some(Level::Ok));
    }

    #[test]
    fn status_failure_reports_existence() {
        let status = DatabaseStatus {
            status: "error".to_string(),
            error: Some("unable to open database file".to_string()),
            database_path: Some("/srv/climate.db".to_string()),
            database_exists: Some(false),
            ..DatabaseStatus::default()
        };
        let panel = database_status_panel(&status);
        assert!(!panel.is_success());
        let Section::Items(items) = &panel.sections[0] else {
            panic!("expected items first");
        };
        assert_eq!(items[0].value, "unable to open database file");
        assert_eq!(items[2].value, "No");
    }

    #[test]
    fn contents_preview_is_capped_with_nulls() {
        let rows: Vec<_> = (0..25)
            .map(|i| row(1990 + i, if i == 0 { Value::Null } else { json!(1.5) }))
            .collect();
        let dump = TableDump {
            columns: vec![
                ColumnInfo { name: "year".to_string(), kind: "INTEGER".to_string() },
                ColumnInfo { name: "gmsl".to_string(), kind: "REAL".to_string() },
            ],
            sample_data: rows,
            showing_rows: 25,
            total_rows: 140,
        };
        let contents = DatabaseContents {
            status: "success".to_string(),
            tables: vec!["sea_level".to_string()],
            data: [("sea_level".to_string(), dump)].into_iter().collect(),
            ..DatabaseContents::default()
        };

        let panel = database_contents_panel(&contents);
        let table = panel
            .sections
            .iter()
            .find_map(|s| match s {
                Section::Table { headers, rows } => Some((headers, rows)),
                _ => None,
            })
            .unwrap();
        assert_eq!(table.0, &vec!["year".to_string(), "gmsl".to_string()]);
        assert_eq!(table.1.len(), TABLE_PREVIEW_ROWS);
        assert_eq!(table.1[0], vec!["1990".to_string(), "NULL".to_string()]);
        assert!(panel.sections.contains(&Section::Note("Showing first 20 of 25 rows".to_string())));
        assert!(panel.sections.iter().any(|s| matches!(s, Section::Items(items)
            if items.iter().any(|i| i.value == "25 (limited to first 100 rows)"))));
    }

    #[test]
    fn empty_table_gets_a_note() {
        let contents = DatabaseContents {
            status: "success".to_string(),
            tables: vec!["future_predictions".to_string()],
            data: [("future_predictions".to_string(), TableDump::default())].into_iter().collect(),
            ..DatabaseContents::default()
        };
        let panel = database_contents_panel(&contents);
        assert!(panel.sections.contains(&Section::Note("No data in this table.".to_string())));
    }

    #[test]
    fn api_details_levels_follow_news_status() {
        let mut details = ApiDetails {
            status: "success".to_string(),
            api_base_url: Some("http://127.0.0.1:5000".to_string()),
            total_endpoints: 1,
            endpoints: vec![EndpointInfo {
                path: "/api/news".to_string(),
                method: "GET".to_string(),
                description: "Get recent climate change news articles".to_string(),
            }],
            news_api: Some(NewsApiStatus {
                status: "unauthorized".to_string(),
                message: "News API key is invalid or expired".to_string(),
                url: "https://newsapi.org/v2/everything".to_string(),
                key_configured: true,
            }),
            ..ApiDetails::default()
        };
        let panel = api_details_panel(&details);
        assert!(panel.sections.contains(&Section::Bullets(vec![
            "GET /api/news - Get recent climate change news articles".to_string()
        ])));
        let status_item = panel
            .sections
            .iter()
            .filter_map(|s| match s {
                Section::Items(items) => items.iter().find(|i| i.value == "UNAUTHORIZED"),
                _ => None,
            })
            .next()
            .unwrap();
        assert_eq!(status_item.indicator, Some(Level::Warning));

        details.status = "error".to_string();
        details.message = Some("Failed to get API details: x".to_string());
        assert_eq!(api_details_panel(&details).title, "API Details - ERROR");
    }

    #[test]
    fn news_fallbacks() {
        let feed = NewsFeed {
            articles: vec![Article {
                title: "Sea level rise accelerates".to_string(),
                description: None,
                url: "https://news.example/a".to_string(),
                published_at: "2025-03-01T10:00:00Z".to_string(),
                source: "Wire".to_string(),
            }],
        };
        let panel = news_panel(&feed);
        assert_eq!(
            panel.sections[0],
            Section::Article {
                title: "Sea level rise accelerates".to_string(),
                url: "https://news.example/a".to_string(),
                description: "No description available.".to_string(),
                byline: "Wire • 2025-03-01".to_string(),
            }
        );

        let empty = news_panel(&NewsFeed::default());
        assert_eq!(empty.sections, vec![Section::Note("No news articles available.".to_string())]);
    }

    #[test]
    fn publish_date_accepts_naive_iso_and_keeps_garbage() {
        assert_eq!(publish_date("2025-06-30T08:15:00.123456"), "2025-06-30");
        assert_eq!(publish_date("yesterday"), "yesterday");
    }

    #[test]
    fn connection_error_names_the_base_url() {
        let panel = connection_error_panel(
            "Read Database",
            &AppError::io("connection refused"),
            &ApiConfig::default(),
        );
        assert_eq!(panel.title, "Read Database - ERROR");
        assert!(panel.sections.contains(&Section::Note(
            "Make sure the API server is reachable at http://127.0.0.1:5000/api.".to_string()
        )));
    }
}
