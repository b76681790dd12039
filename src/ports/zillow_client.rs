use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::search_params::SearchParams;
use crate::error::Result;

/// Every call issues one request; `proxy` overrides the configured proxy for
/// that call only.
#[async_trait]
pub trait ZillowClient: Send + Sync {
    async fn fetch_property_by_id(
        &self,
        id: u64,
        proxy: Option<&str>,
    ) -> Result<Map<String, Value>>;

    async fn fetch_property_by_url(
        &self,
        url: &str,
        proxy: Option<&str>,
    ) -> Result<Map<String, Value>>;

    async fn fetch_department_by_id(&self, id: &str, proxy: Option<&str>)
    -> Result<Option<Value>>;

    async fn fetch_department_by_url(
        &self,
        url: &str,
        proxy: Option<&str>,
    ) -> Result<Option<Value>>;

    async fn search(
        &self,
        params: &SearchParams,
        proxy: Option<&str>,
    ) -> Result<Map<String, Value>>;
}
