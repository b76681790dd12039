use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::adapters::scraper::page_parser::extract_component_props;
use crate::domain::json_path;
use crate::error::{Result, ZillowError};

const CLIENT_CACHE_KEY: &str = "gdpClientCache";
const PROPERTY_KEY: &str = "property";
const DEPARTMENT_PATH: &str = "initialReduxState.gdp";

/// Parse a home-details page into its property record.
pub fn parse_property_page(html: &[u8]) -> Result<Map<String, Value>> {
    let props = extract_component_props(html)?;
    resolve_property(props.as_ref())
}

/// Parse an apartment (building) page into its department record.
pub fn parse_department_page(html: &[u8]) -> Result<Option<Value>> {
    let props = extract_component_props(html)?;
    Ok(resolve_department(props.as_ref()))
}

/// Pick the property record out of the client cache.
///
/// The cache is a JSON-encoded string whose values are per-query entries.
/// The last entry carrying a `property` object wins. A void region, a missing
/// cache or no matching entry all give an empty map.
pub fn resolve_property(component_props: Option<&Value>) -> Result<Map<String, Value>> {
    let Some(props) = component_props else {
        return Ok(Map::new());
    };
    let Some(raw_cache) = json_path::get(props, CLIENT_CACHE_KEY) else {
        warn!("component props have no {CLIENT_CACHE_KEY}");
        return Ok(Map::new());
    };

    let cache = decode_client_cache(raw_cache)?;
    let Value::Object(entries) = cache else {
        return Err(ZillowError::Parse {
            reason: format!("{CLIENT_CACHE_KEY} is not a JSON object"),
        });
    };
    debug!(entries = entries.len(), "Decoded client cache");

    let record = entries
        .values()
        .rev()
        .find_map(|entry| entry.get(PROPERTY_KEY).and_then(Value::as_object));

    match record {
        Some(property) => Ok(property.clone()),
        None => {
            warn!("no {CLIENT_CACHE_KEY} entry carries a {PROPERTY_KEY} record");
            Ok(Map::new())
        }
    }
}

/// Department records live at a fixed path, no cache decoding involved.
pub fn resolve_department(component_props: Option<&Value>) -> Option<Value> {
    let department = component_props.and_then(|props| json_path::get(props, DEPARTMENT_PATH));
    if component_props.is_some() && department.is_none() {
        warn!("component props have no {DEPARTMENT_PATH}");
    }
    department.cloned()
}

fn decode_client_cache(raw: &Value) -> Result<Value> {
    match raw {
        Value::String(encoded) => serde_json::from_str(encoded).map_err(|e| ZillowError::Parse {
            reason: format!("{CLIENT_CACHE_KEY} JSON parse error: {e}"),
        }),
        Value::Object(_) => Ok(raw.clone()),
        other => Err(ZillowError::Parse {
            reason: format!("{CLIENT_CACHE_KEY} has unexpected type: {}", json_type(other)),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
