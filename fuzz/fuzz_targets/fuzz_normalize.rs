#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let normalized = mcp_zillow::adapters::scraper::text::normalize(text);
        assert!(!normalized.starts_with(char::is_whitespace));
    }
});
