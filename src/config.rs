use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.restaurant-unisg.ch/";

#[derive(Debug, Clone, Parser)]
#[command(name = "unisg-menu")]
#[command(about = "Serves the UniSG restaurant's weekly menu as JSON and CSV")]
pub struct Config {
    /// Page that links the current week's menu PDF.
    #[arg(long, env = "UNISG_MENU_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: Url,

    #[arg(long, env = "UNISG_MENU_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    #[arg(long, env = "UNISG_MENU_PAGE_TIMEOUT_SECS", default_value_t = 20)]
    pub page_timeout_secs: u64,

    #[arg(long, env = "UNISG_MENU_PDF_TIMEOUT_SECS", default_value_t = 30)]
    pub pdf_timeout_secs: u64,

    #[arg(long, env = "UNISG_MENU_USER_AGENT", default_value = "Mozilla/5.0 (MenuBot/1.0)")]
    pub user_agent: String,

    #[arg(long, short, env = "UNISG_MENU_VERBOSE", help = "Enable debug logging")]
    pub verbose: bool,
}

impl Config {
    /// Configuration taken from environment variables and defaults only.
    pub fn from_env() -> Self {
        Self::parse_from(["unisg-menu"])
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn pdf_timeout(&self) -> Duration {
        Duration::from_secs(self.pdf_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_restaurant_page() {
        let config = Config::try_parse_from(["unisg-menu"]).unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.page_timeout(), Duration::from_secs(20));
        assert_eq!(config.pdf_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "unisg-menu",
            "--base-url",
            "http://127.0.0.1:9000/",
            "--bind",
            "127.0.0.1:8080",
            "--pdf-timeout-secs",
            "5",
        ])
        .unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.pdf_timeout_secs, 5);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(Config::try_parse_from(["unisg-menu", "--base-url", "not a url"]).is_err());
    }
}
