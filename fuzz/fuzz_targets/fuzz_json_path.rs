#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some(split) = data.iter().position(|b| *b == 0) else {
        return;
    };
    let (path, doc) = data.split_at(split);
    if let (Ok(path), Ok(value)) = (
        std::str::from_utf8(path),
        serde_json::from_slice::<serde_json::Value>(&doc[1..]),
    ) {
        let first = mcp_zillow::domain::json_path::get(&value, path);
        let second = mcp_zillow::domain::json_path::get(&value, path);
        assert_eq!(first, second);
    }
});
