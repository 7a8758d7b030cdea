use std::sync::Arc;

use axum::{
    Router,
    extract::Extension,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use reqwest::Client;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::calendar::{date_for, format_date, today_local};
use crate::config::Config;
use crate::error::MenuError;
use crate::export::{MenuRecord, day_records, records_to_csv, today_records, week_records};
use crate::menu::Weekday;
use crate::source::{WeekSnapshot, scrape_week};

#[derive(Clone)]
pub struct AppState {
    pub client: Client,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(client: Client, config: Config) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/menu.json", get(menu_json))
        .route("/save.csv", get(today_csv))
        .route("/week.json", get(week_json))
        .route("/week.csv", get(week_csv))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
}

const NOTHING_FOUND: &str = "Keine Daten gefunden.";

fn fetch_failed(err: MenuError) -> Response {
    error!(error = %err, fetch_failure = err.is_fetch_failure(), "could not load weekly menu");
    (
        StatusCode::BAD_GATEWAY,
        format!("Failed to fetch menu data: {err}"),
    )
        .into_response()
}

fn csv_attachment(records: &[MenuRecord], filename: String) -> Response {
    if records.is_empty() {
        return (StatusCode::NOT_FOUND, NOTHING_FOUND).into_response();
    }
    match records_to_csv(records) {
        Ok(body) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ],
            body,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "CSV encoding failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// Records for the landing page: today's dishes, or Friday's on weekends.
pub fn display_records(snapshot: &WeekSnapshot, today: NaiveDate) -> Vec<MenuRecord> {
    let source = snapshot.source_url.as_str();
    let records = today_records(&snapshot.menu, today, source);
    if records.is_empty() && Weekday::from_date(today).is_none() {
        let friday = date_for(today, Weekday::Freitag);
        return day_records(&snapshot.menu, Weekday::Freitag, friday, source);
    }
    records
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_page(records: &[MenuRecord], today: NaiveDate, source: Option<&str>) -> String {
    let table = if records.is_empty() {
        "<p>Für heute wurde nichts gefunden (evtl. Wochenende oder PDF-Layout geändert).</p>"
            .to_string()
    } else {
        let rows: String = records
            .iter()
            .map(|r| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape_html(&r.date),
                    escape_html(&r.weekday),
                    escape_html(&r.title),
                    escape_html(r.price_chf.as_deref().unwrap_or("")),
                )
            })
            .collect();
        format!(
            "<table><thead><tr><th>date</th><th>weekday</th><th>title</th><th>price_chf</th></tr></thead><tbody>{rows}</tbody></table>"
        )
    };
    let source = source.map(escape_html).unwrap_or_else(|| "–".to_string());
    let today = format_date(today);

    format!(
        r#"<!doctype html>
<html lang="de">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Restaurant UniSG – Menü heute</title>
  <style>
    body {{ font-family: system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial, sans-serif; margin: 2rem; }}
    table {{ border-collapse: collapse; width: 100%; }}
    th, td {{ border: 1px solid #ddd; padding: 8px; }}
    th {{ background: #f5f5f5; text-align: left; }}
    a {{ color: #06c; }}
  </style>
</head>
<body>
  <h1>Restaurant UniSG – Menü heute ({today})</h1>
  <p>Quelle: <a href="{source}">{source}</a></p>
  {table}
  <p><a href="/menu.json">JSON</a> · <a href="/save.csv">CSV (heute)</a> · <a href="/week.json">Woche JSON</a> · <a href="/week.csv">Woche CSV</a></p>
</body>
</html>
"#
    )
}

async fn index(Extension(state): Extension<AppState>) -> Response {
    let today = today_local();
    match scrape_week(&state.client, &state.config).await {
        Ok(snapshot) => {
            let records = display_records(&snapshot, today);
            Html(render_page(&records, today, Some(snapshot.source_url.as_str()))).into_response()
        }
        Err(err) => fetch_failed(err),
    }
}

async fn menu_json(Extension(state): Extension<AppState>) -> Response {
    match scrape_week(&state.client, &state.config).await {
        Ok(snapshot) => axum::Json(today_records(
            &snapshot.menu,
            today_local(),
            snapshot.source_url.as_str(),
        ))
        .into_response(),
        Err(err) => fetch_failed(err),
    }
}

async fn today_csv(Extension(state): Extension<AppState>) -> Response {
    let today = today_local();
    match scrape_week(&state.client, &state.config).await {
        Ok(snapshot) => {
            let records = today_records(&snapshot.menu, today, snapshot.source_url.as_str());
            csv_attachment(&records, format!("unisg_menu_{}.csv", format_date(today)))
        }
        Err(err) => fetch_failed(err),
    }
}

async fn week_json(Extension(state): Extension<AppState>) -> Response {
    match scrape_week(&state.client, &state.config).await {
        Ok(snapshot) => axum::Json(week_records(
            &snapshot.menu,
            today_local(),
            snapshot.source_url.as_str(),
        ))
        .into_response(),
        Err(err) => fetch_failed(err),
    }
}

async fn week_csv(Extension(state): Extension<AppState>) -> Response {
    let today = today_local();
    match scrape_week(&state.client, &state.config).await {
        Ok(snapshot) => {
            let records = week_records(&snapshot.menu, today, snapshot.source_url.as_str());
            csv_attachment(&records, format!("unisg_menu_week_{}.csv", format_date(today)))
        }
        Err(err) => fetch_failed(err),
    }
}
