#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(props) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = mcp_zillow::adapters::scraper::entity_parser::resolve_property(Some(&props));
        let _ = mcp_zillow::adapters::scraper::entity_parser::resolve_department(Some(&props));
    }
});
