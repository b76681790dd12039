#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = mcp_zillow::adapters::scraper::page_parser::extract_next_data(data);
});
