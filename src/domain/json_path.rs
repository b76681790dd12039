//! Lookups over untyped JSON trees.
//!
//! Paths are dot-delimited (`props.pageProps.componentProps`). A bare key that
//! isn't present at the top level is searched for at any depth instead.

use serde_json::Value;

/// Resolve `path` against `data`.
///
/// Path mode applies when `path` contains a dot or names a key at the top
/// level. Otherwise the whole tree is searched for the first occurrence of
/// the key.
pub fn get<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    if path.contains('.') || data.get(path).is_some() {
        return lookup_path(data, path);
    }
    find_key(data, path)
}

/// Descend one segment at a time. Numeric segments index into arrays.
pub fn lookup_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(data, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Pre-order depth-first search for the first value stored under `key`.
///
/// Objects are walked in insertion order and arrays in index order, so the
/// same document always yields the same match.
pub fn find_key<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    match data {
        Value::Object(map) => map.iter().find_map(|(k, v)| {
            if k == key {
                Some(v)
            } else {
                find_key(v, key)
            }
        }),
        Value::Array(items) => items.iter().find_map(|item| find_key(item, key)),
        _ => None,
    }
}
