use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Proxy, Response};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};
use url::Url;

use crate::adapters::scraper::entity_parser;
use crate::adapters::scraper::search_parser;
use crate::config::types::ClientConfig;
use crate::domain::search_params::SearchParams;
use crate::error::{Result, ZillowError};
use crate::ports::zillow_client::ZillowClient;

pub struct ZillowScraper {
    http: Client,
    config: ClientConfig,
    page_headers: HeaderMap,
    search_headers: HeaderMap,
}

impl ZillowScraper {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = build_http(&config, config.proxy_url.as_deref())?;
        let page_headers = header_map(&config.page_headers)?;
        let search_headers = header_map(&config.search_headers)?;

        Ok(Self {
            http,
            config,
            page_headers,
            search_headers,
        })
    }

    pub fn property_url(&self, id: u64) -> String {
        format!("{}/homedetails/any-title/{id}_zpid/", self.base_url())
    }

    pub fn department_url(&self, id: &str) -> String {
        format!("{}/apartments/texas/the-lennox/{id}", self.base_url())
    }

    pub fn search_url(&self) -> String {
        format!("{}/async-create-search-page-state", self.base_url())
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// The shared client, or a dedicated one when the call names its own proxy.
    fn http_for(&self, proxy: Option<&str>) -> Result<Client> {
        match proxy {
            Some(proxy) => build_http(&self.config, Some(proxy)),
            None => Ok(self.http.clone()),
        }
    }

    async fn fetch_page(&self, url: &str, proxy: Option<&str>, check_status: bool) -> Result<Vec<u8>> {
        let url = Url::parse(url)?;
        let http = self.http_for(proxy)?;

        debug!(url = %url, proxied = proxy.is_some(), "Fetching page");

        let response = http
            .get(url.as_str())
            .headers(self.page_headers.clone())
            .send()
            .await?;
        let response = check_response(response, url.as_str(), check_status)?;

        let body = response.bytes().await?;
        trace!(url = %url, body_len = body.len(), "Page body received");
        Ok(body.to_vec())
    }
}

#[async_trait]
impl ZillowClient for ZillowScraper {
    async fn fetch_property_by_id(
        &self,
        id: u64,
        proxy: Option<&str>,
    ) -> Result<Map<String, Value>> {
        let url = self.property_url(id);
        self.fetch_property_by_url(&url, proxy).await
    }

    async fn fetch_property_by_url(
        &self,
        url: &str,
        proxy: Option<&str>,
    ) -> Result<Map<String, Value>> {
        let body = self.fetch_page(url, proxy, true).await?;
        let record = entity_parser::parse_property_page(&body)?;
        debug!(url, fields = record.len(), "Resolved property record");
        Ok(record)
    }

    async fn fetch_department_by_id(
        &self,
        id: &str,
        proxy: Option<&str>,
    ) -> Result<Option<Value>> {
        let url = self.department_url(id);
        self.fetch_department_by_url(&url, proxy).await
    }

    async fn fetch_department_by_url(
        &self,
        url: &str,
        proxy: Option<&str>,
    ) -> Result<Option<Value>> {
        let body = self
            .fetch_page(url, proxy, self.config.strict_status)
            .await?;
        let department = entity_parser::parse_department_page(&body)?;
        debug!(url, found = department.is_some(), "Resolved department record");
        Ok(department)
    }

    async fn search(
        &self,
        params: &SearchParams,
        proxy: Option<&str>,
    ) -> Result<Map<String, Value>> {
        params.validate()?;

        let url = self.search_url();
        let body = params.to_request_body();
        let http = self.http_for(proxy)?;

        debug!(
            url,
            kind = %params.kind,
            page = params.pagination,
            proxied = proxy.is_some(),
            "Submitting search"
        );

        let response = http
            .put(&url)
            .headers(self.search_headers.clone())
            .json(&body)
            .send()
            .await?;
        let response = check_response(response, &url, self.config.strict_status)?;

        let bytes = response.bytes().await?;
        trace!(body_len = bytes.len(), "Search body received");
        search_parser::parse_search_body(&bytes)
    }
}

fn build_http(config: &ClientConfig, proxy: Option<&str>) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .cookie_store(true);
    if let Some(proxy) = proxy {
        builder = builder.proxy(Proxy::all(proxy)?);
    }
    Ok(builder.build()?)
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ZillowError::Config(format!("invalid header name '{name}': {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| ZillowError::Config(format!("invalid value for header '{name}': {e}")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Non-success responses fail only when `strict` is set; otherwise the body
/// is still handed to the extractor.
fn check_response(response: Response, url: &str, strict: bool) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if strict {
        warn!(status = status.as_u16(), url, "Request rejected");
        return Err(ZillowError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    warn!(status = status.as_u16(), url, "Non-success status, extracting anyway");
    Ok(response)
}
