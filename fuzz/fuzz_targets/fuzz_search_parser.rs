#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = mcp_zillow::adapters::scraper::search_parser::parse_search_body(data);
});
