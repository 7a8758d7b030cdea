//! Fetching the current week's menu PDF and turning it into text lines.

use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

use crate::config::Config;
use crate::error::{MenuError, Result};
use crate::menu::WeekMenu;
use crate::normalize::collapse_whitespace;
use crate::parser::parse_week_lines_with_strategy;

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("link selector is valid"));

const CURRENT_WEEK_LABEL: &str = "aktuelle woche";
const MENU_FILE_MARKERS: [&str; 2] = ["menueplan", "menueplaene"];

/// A parsed week together with the PDF it was read from.
#[derive(Debug, Clone)]
pub struct WeekSnapshot {
    pub source_url: Url,
    pub menu: WeekMenu,
}

pub fn build_client(config: &Config) -> Result<Client> {
    let client = Client::builder()
        // Avoid macOS system proxy lookup that can panic in sandboxed contexts.
        .no_proxy()
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// Picks the current week's PDF from the restaurant's start page.
///
/// A link labelled "Aktuelle Woche" wins; otherwise any PDF whose file name
/// looks like a menu plan is taken.
pub fn find_week_pdf_link(html: &str, base: &Url) -> Option<Url> {
    let doc = Html::parse_document(html);
    let links: Vec<(String, &str)> = doc
        .select(&LINK_SELECTOR)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            let text = collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "));
            let text = text.to_lowercase();
            Some((text, href))
        })
        .collect();

    let labelled = links.iter().find(|(text, href)| {
        text.contains(CURRENT_WEEK_LABEL) && href.to_lowercase().ends_with(".pdf")
    });
    let by_name = || {
        links.iter().find(|(_, href)| {
            let href = href.to_lowercase();
            href.ends_with(".pdf") && MENU_FILE_MARKERS.iter().any(|marker| href.contains(marker))
        })
    };

    let (_, href) = labelled.or_else(by_name)?;
    base.join(href).ok()
}

pub async fn fetch_current_week_pdf_url(client: &Client, config: &Config) -> Result<Url> {
    let html = client
        .get(config.base_url.clone())
        .timeout(config.page_timeout())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let url = find_week_pdf_link(&html, &config.base_url)
        .ok_or_else(|| MenuError::NoMenuLink(config.base_url.to_string()))?;
    debug!(%url, "found weekly menu link");
    Ok(url)
}

pub async fn download_pdf(client: &Client, url: &Url, config: &Config) -> Result<Vec<u8>> {
    let bytes = client
        .get(url.clone())
        .timeout(config.pdf_timeout())
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    Ok(bytes.to_vec())
}

/// Raw text lines of a PDF, trimmed, without blank lines.
pub fn extract_pdf_lines(bytes: &[u8]) -> Result<Vec<String>> {
    let text = pdf_extract::extract_text_from_mem(bytes)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Parses PDF bytes into a week. Text extraction runs on a blocking thread.
pub async fn parse_week_pdf(bytes: Vec<u8>) -> Result<WeekMenu> {
    let lines = tokio::task::spawn_blocking(move || extract_pdf_lines(&bytes)).await??;
    Ok(parse_week_lines_with_strategy(&lines).menu)
}

pub async fn scrape_week(client: &Client, config: &Config) -> Result<WeekSnapshot> {
    let source_url = fetch_current_week_pdf_url(client, config).await?;
    let bytes = download_pdf(client, &source_url, config).await?;
    info!(url = %source_url, bytes = bytes.len(), "downloaded weekly menu");
    let menu = parse_week_pdf(bytes).await?;
    Ok(WeekSnapshot { source_url, menu })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.restaurant-unisg.ch/").unwrap()
    }

    #[test]
    fn prefers_current_week_link() {
        let html = r#"
            <a href="/files/menueplan-kw42.pdf">Menüplan KW 42</a>
            <a href="/files/woche-43.pdf"><span>Aktuelle</span> <span>Woche</span> (pdf)</a>
        "#;
        let link = find_week_pdf_link(html, &base()).unwrap();
        assert_eq!(link.as_str(), "https://www.restaurant-unisg.ch/files/woche-43.pdf");
    }

    #[test]
    fn falls_back_to_menu_plan_file_name() {
        let html = r#"
            <a href="https://cdn.example.ch/agb.pdf">AGB</a>
            <a href="uploads/Menueplaene_Oktober.PDF">Download</a>
        "#;
        let link = find_week_pdf_link(html, &base()).unwrap();
        assert_eq!(
            link.as_str(),
            "https://www.restaurant-unisg.ch/uploads/Menueplaene_Oktober.PDF"
        );
    }

    #[test]
    fn absolute_links_are_kept() {
        let html = r#"<a href="https://cdn.example.ch/menueplan.pdf">Aktuelle Woche</a>"#;
        let link = find_week_pdf_link(html, &base()).unwrap();
        assert_eq!(link.as_str(), "https://cdn.example.ch/menueplan.pdf");
    }

    #[test]
    fn no_pdf_link_found() {
        let html = r#"<a href="/aktuelle-woche">Aktuelle Woche</a><a href="/kontakt">Kontakt</a>"#;
        assert!(find_week_pdf_link(html, &base()).is_none());
    }
}
