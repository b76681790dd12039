use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::domain::search_params::SearchParams;
use crate::error::Result;
use crate::ports::zillow_client::ZillowClient;

type PropertyFn = Box<dyn Fn(&str, Option<&str>) -> Result<Map<String, Value>> + Send + Sync>;
type DepartmentFn = Box<dyn Fn(&str, Option<&str>) -> Result<Option<Value>> + Send + Sync>;
type SearchFn = Box<dyn Fn(&SearchParams, Option<&str>) -> Result<Map<String, Value>> + Send + Sync>;

/// Id lookups are forwarded to the URL closures with the canonical URL,
/// the same way the real client delegates.
#[allow(clippy::struct_field_names)]
pub struct MockZillowClient {
    property_fn: Mutex<PropertyFn>,
    department_fn: Mutex<DepartmentFn>,
    search_fn: Mutex<SearchFn>,
}

impl Default for MockZillowClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockZillowClient {
    pub fn new() -> Self {
        Self {
            property_fn: Mutex::new(Box::new(|url, _| Ok(make_property(url_zpid(url))))),
            department_fn: Mutex::new(Box::new(|_, _| Ok(Some(make_department("The Lennox"))))),
            search_fn: Mutex::new(Box::new(|_, _| Ok(make_search_results(0)))),
        }
    }

    #[must_use]
    pub fn with_property(
        self,
        f: impl Fn(&str, Option<&str>) -> Result<Map<String, Value>> + Send + Sync + 'static,
    ) -> Self {
        *self.property_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_department(
        self,
        f: impl Fn(&str, Option<&str>) -> Result<Option<Value>> + Send + Sync + 'static,
    ) -> Self {
        *self.department_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_search(
        self,
        f: impl Fn(&SearchParams, Option<&str>) -> Result<Map<String, Value>> + Send + Sync + 'static,
    ) -> Self {
        *self.search_fn.lock().unwrap() = Box::new(f);
        self
    }
}

#[async_trait]
impl ZillowClient for MockZillowClient {
    async fn fetch_property_by_id(
        &self,
        id: u64,
        proxy: Option<&str>,
    ) -> Result<Map<String, Value>> {
        let url = format!("https://www.zillow.com/homedetails/any-title/{id}_zpid/");
        self.fetch_property_by_url(&url, proxy).await
    }

    async fn fetch_property_by_url(
        &self,
        url: &str,
        proxy: Option<&str>,
    ) -> Result<Map<String, Value>> {
        (self.property_fn.lock().unwrap())(url, proxy)
    }

    async fn fetch_department_by_id(
        &self,
        id: &str,
        proxy: Option<&str>,
    ) -> Result<Option<Value>> {
        let url = format!("https://www.zillow.com/apartments/texas/the-lennox/{id}");
        self.fetch_department_by_url(&url, proxy).await
    }

    async fn fetch_department_by_url(
        &self,
        url: &str,
        proxy: Option<&str>,
    ) -> Result<Option<Value>> {
        (self.department_fn.lock().unwrap())(url, proxy)
    }

    async fn search(
        &self,
        params: &SearchParams,
        proxy: Option<&str>,
    ) -> Result<Map<String, Value>> {
        (self.search_fn.lock().unwrap())(params, proxy)
    }
}

fn url_zpid(url: &str) -> u64 {
    url.split('/')
        .find_map(|segment| segment.strip_suffix("_zpid"))
        .and_then(|id| id.parse().ok())
        .unwrap_or(0)
}

// ---------- Factory functions ----------

pub fn make_property(zpid: u64) -> Map<String, Value> {
    let record = json!({
        "zpid": zpid,
        "streetAddress": "4102 Oak St",
        "city": "Houston",
        "state": "TX",
        "price": 325_000,
        "bedrooms": 3,
        "bathrooms": 2,
        "homeStatus": "FOR_SALE",
    });
    record.as_object().cloned().unwrap_or_default()
}

pub fn make_department(name: &str) -> Value {
    json!({
        "building": {
            "buildingName": name,
            "city": "Houston",
            "floorPlans": [
                {"name": "A1", "beds": 1, "baths": 1, "minPrice": 1150},
                {"name": "B2", "beds": 2, "baths": 2, "minPrice": 1675}
            ]
        }
    })
}

pub fn make_search_results(count: usize) -> Map<String, Value> {
    let listings: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "zpid": format!("{}", 1000 + i),
                "address": format!("{i} Test Ave, Houston, TX"),
                "price": "$250,000",
            })
        })
        .collect();
    let first_page: Vec<Value> = listings.iter().take(2).cloned().collect();
    let results = json!({
        "mapResults": listings,
        "listResults": first_page,
    });
    results.as_object().cloned().unwrap_or_default()
}
