use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Proxy endpoint used for both http and https when a call doesn't supply its own.
    #[serde(default)]
    pub proxy_url: Option<String>,
    /// Fail on non-2xx responses for apartment pages and search as well.
    /// Property detail pages are always checked.
    #[serde(default)]
    pub strict_status: bool,
    #[serde(default = "default_page_headers")]
    pub page_headers: BTreeMap<String, String>,
    #[serde(default = "default_search_headers")]
    pub search_headers: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_timeout(),
            proxy_url: None,
            strict_status: false,
            page_headers: default_page_headers(),
            search_headers: default_search_headers(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.zillow.com".into()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36".into()
}

fn default_timeout() -> u64 {
    30
}

const NAVIGATION_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
    ),
    ("Accept-Language", "en"),
    ("Cache-Control", "no-cache"),
    ("Pragma", "no-cache"),
    ("Sec-Ch-Ua-Mobile", "?0"),
    ("Sec-Ch-Ua-Platform", "\"Windows\""),
    ("Sec-Fetch-Dest", "document"),
    ("Sec-Fetch-Mode", "navigate"),
    ("Sec-Fetch-Site", "none"),
    ("Sec-Fetch-User", "?1"),
    ("Upgrade-Insecure-Requests", "1"),
];

fn navigation_headers() -> BTreeMap<String, String> {
    NAVIGATION_HEADERS
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn default_page_headers() -> BTreeMap<String, String> {
    let mut headers = navigation_headers();
    headers.insert(
        "Sec-Ch-Ua".into(),
        "\"Chromium\";v=\"130\", \"Google Chrome\";v=\"130\", \"Not?A_Brand\";v=\"99\"".into(),
    );
    headers
}

fn default_search_headers() -> BTreeMap<String, String> {
    let mut headers = navigation_headers();
    headers.insert("Content-Type".into(), "application/json".into());
    headers.insert("Origin".into(), default_base_url());
    headers.insert(
        "Sec-Ch-Ua".into(),
        "\"Not_A Brand\";v=\"8\", \"Chromium\";v=\"120\", \"Google Chrome\";v=\"120\"".into(),
    );
    headers
}
