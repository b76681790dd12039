use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::json_path;
use crate::error::{Result, ZillowError};

const SEARCH_RESULTS_PATH: &str = "cat1.searchResults";

/// Decode a search response body and narrow it to `cat1.searchResults`.
pub fn parse_search_body(body: &[u8]) -> Result<Map<String, Value>> {
    let data: Value = serde_json::from_slice(body).map_err(|e| ZillowError::Parse {
        reason: format!("search response JSON parse error: {e}"),
    })?;
    Ok(parse_search_results(&data))
}

/// `cat1.searchResults` unchanged, or an empty map when the response lacks it.
pub fn parse_search_results(data: &Value) -> Map<String, Value> {
    match json_path::lookup_path(data, SEARCH_RESULTS_PATH).and_then(Value::as_object) {
        Some(results) => {
            debug!(
                map_results = result_count(results, "mapResults"),
                list_results = result_count(results, "listResults"),
                "Search results received"
            );
            results.clone()
        }
        None => {
            warn!("search response has no {SEARCH_RESULTS_PATH}");
            Map::new()
        }
    }
}

/// Length of the named result array, 0 when absent.
pub fn result_count(results: &Map<String, Value>, key: &str) -> usize {
    results.get(key).and_then(Value::as_array).map_or(0, Vec::len)
}
