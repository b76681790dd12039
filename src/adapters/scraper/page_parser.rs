use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, warn};

use crate::adapters::scraper::text::normalize;
use crate::domain::json_path;
use crate::error::{Result, ZillowError};

const NEXT_DATA_SELECTOR: &str = "#__NEXT_DATA__";
const COMPONENT_PROPS_PATH: &str = "props.pageProps.componentProps";

/// Parse the embedded `__NEXT_DATA__` state of a page.
///
/// Returns `Ok(None)` when the page carries no such element (error pages,
/// captcha walls, redirects). Malformed JSON inside the element is an error.
pub fn extract_next_data(html: &[u8]) -> Result<Option<Value>> {
    let html = String::from_utf8_lossy(html);
    let document = Html::parse_document(&html);
    let selector = Selector::parse(NEXT_DATA_SELECTOR).map_err(|e| ZillowError::Parse {
        reason: format!("invalid selector {NEXT_DATA_SELECTOR}: {e}"),
    })?;

    let Some(element) = document.select(&selector).next() else {
        warn!("page has no {NEXT_DATA_SELECTOR} element");
        return Ok(None);
    };

    let raw = element.text().collect::<String>();
    let text = normalize(&raw);
    debug!(raw_len = raw.len(), normalized_len = text.len(), "Found embedded page state");

    let state: Value = serde_json::from_str(&text).map_err(|e| ZillowError::Parse {
        reason: format!("{NEXT_DATA_SELECTOR} JSON parse error: {e}"),
    })?;
    if !state.is_object() {
        return Err(ZillowError::Parse {
            reason: format!("{NEXT_DATA_SELECTOR} root is not a JSON object"),
        });
    }

    Ok(Some(state))
}

/// Narrow the embedded page state down to `props.pageProps.componentProps`.
pub fn extract_component_props(html: &[u8]) -> Result<Option<Value>> {
    let Some(state) = extract_next_data(html)? else {
        return Ok(None);
    };

    let props = json_path::get(&state, COMPONENT_PROPS_PATH).cloned();
    if props.is_none() {
        warn!("page state has no {COMPONENT_PROPS_PATH}, page shape may have changed");
    }
    Ok(props)
}
