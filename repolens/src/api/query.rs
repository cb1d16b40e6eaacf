//! Canonical query serialization and cache-key construction.
//!
//! Cache keys must be reproducible across calls with logically identical
//! parameters, so serialization is deterministic: pairs are sorted by
//! parameter name and unset/empty values are omitted entirely. The same
//! canonical string doubles as the request query string, keeping the key
//! and the wire request trivially in sync.

/// A parameter set, as produced by the typed `to_pairs()` helpers on
/// request types. `None` and empty values are treated as absent.
pub type Params<'a> = [(&'a str, Option<String>)];

/// Serialize parameters into a canonical `k=v&k=v` string.
///
/// Pairs are sorted by key; unset and empty values are dropped. Returns
/// an empty string when nothing survives filtering.
pub fn canonical_query(params: &Params<'_>) -> String {
    let mut pairs: Vec<(&str, &str)> = params
        .iter()
        .filter_map(|(key, value)| match value {
            Some(v) if !v.is_empty() => Some((*key, v.as_str())),
            _ => None,
        })
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::new();
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            out.push('&');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }
    out
}

/// Build the cache key for an endpoint and parameter set.
///
/// The key is the endpoint path plus the canonical query, so two calls
/// with logically identical params always collide on the same key.
pub fn cache_key(endpoint: &str, params: &Params<'_>) -> String {
    let query = canonical_query(params);
    if query.is_empty() {
        endpoint.to_string()
    } else {
        format!("{}?{}", endpoint, query)
    }
}

/// Build the full request URL for a base URL, endpoint and parameter set.
pub fn request_url(base_url: &str, endpoint: &str, params: &Params<'_>) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), cache_key(endpoint, params))
}
